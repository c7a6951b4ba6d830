use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mindcare",
    bin_name = "mindcare",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Offline-first wellness companion", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $MINDCARE_DATA or the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Community,
    Wellness,
    Insights,
    Data,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Community => "Community & Safety:",
            CommandGroup::Wellness => "Wellness Tracking:",
            CommandGroup::Insights => "Insights:",
            CommandGroup::Data => "Data Commands:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "post" | "posts" | "sos" => Some(CommandGroup::Community),
            "mood" | "assess" | "badge" | "points" | "sleep" | "habit" => {
                Some(CommandGroup::Wellness)
            }
            "dashboard" | "risk" | "report" => Some(CommandGroup::Insights),
            "export" | "import" | "clear" | "seed" => Some(CommandGroup::Data),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Community,
            CommandGroup::Wellness,
            CommandGroup::Insights,
            CommandGroup::Data,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("mindcare {version}\n"));
    output.push_str("Offline-first wellness companion\n");
    output.push('\n');
    output.push_str("Usage: mindcare [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data <DIR>  Data directory\n");
    output.push_str("  -v, --verbose     Increase log verbosity\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Community(CommunityCommands),

    #[command(flatten)]
    Wellness(WellnessCommands),

    #[command(flatten)]
    Insights(InsightCommands),

    #[command(flatten)]
    Data(DataCommands),
}

#[derive(Subcommand, Debug)]
pub enum CommunityCommands {
    /// Share an anonymous post on the community board
    #[command(display_order = 1)]
    Post {
        /// Post title
        title: String,

        /// Post body (words joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        content: Vec<String>,
    },

    /// List community posts
    #[command(display_order = 2)]
    Posts,

    /// Send an SOS alert to a trusted contact
    #[command(display_order = 3)]
    Sos {
        /// Contact phone number (10-15 digits, optional leading +)
        #[arg(long)]
        phone: Option<String>,

        /// Contact name
        #[arg(long)]
        name: Option<String>,

        /// Relation to you (friend, parent, ...)
        #[arg(long)]
        relation: Option<String>,

        /// Extra details for the contact
        #[arg(long)]
        details: Option<String>,

        /// List recorded alerts instead of sending one
        #[arg(long, conflicts_with_all = ["phone", "name", "relation", "details"])]
        list: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum WellnessCommands {
    /// Log how you feel (happy, neutral, sad, anxious)
    #[command(display_order = 10)]
    Mood {
        /// Mood name; omit to list logged moods
        mood: Option<String>,

        /// Mood score from 0 (low) to 3 (high)
        #[arg(short, long)]
        score: Option<u8>,

        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Record a screening assessment (PHQ-9, GAD-7, GHQ-12, DASS-21)
    #[command(display_order = 11)]
    Assess {
        /// Instrument name; omit to list past results
        instrument: Option<String>,

        /// Answers, each 0-3, in question order
        answers: Vec<u32>,
    },

    /// Award a badge, or list badges with --list
    #[command(display_order = 12)]
    Badge {
        /// Badge name
        #[arg(long)]
        name: Option<String>,

        /// Badge description
        #[arg(long)]
        description: Option<String>,

        /// List earned badges and points
        #[arg(long, conflicts_with_all = ["name", "description"])]
        list: bool,
    },

    /// Add points (defaults to the daily check-in bonus)
    #[command(display_order = 13)]
    Points {
        /// Points to add
        amount: Option<u64>,
    },

    /// Log hours slept; omit to list the sleep log
    #[command(display_order = 14)]
    Sleep { hours: Option<f64> },

    /// Track a habit; omit to list habits
    #[command(display_order = 15)]
    Habit {
        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum InsightCommands {
    /// Moods, assessments and badges at a glance
    #[command(display_order = 20)]
    Dashboard,

    /// Compute your current risk level
    #[command(display_order = 21)]
    Risk,

    /// Summary report of everything stored
    #[command(display_order = 22)]
    Report,
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export all data to a single JSON file
    #[command(display_order = 30)]
    Export {
        /// Directory to write into (defaults to the current directory)
        dir: Option<PathBuf>,
    },

    /// Restore data from an exported JSON file
    #[command(display_order = 31)]
    Import { file: PathBuf },

    /// Delete all local data
    #[command(display_order = 32)]
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace local data with a demo dataset
    #[command(display_order = 33)]
    Seed {
        /// RNG seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
    },
}
