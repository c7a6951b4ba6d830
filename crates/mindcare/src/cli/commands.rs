//! # CLI Layer
//!
//! This module is **one possible UI client** for mindcare; it is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the log subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments into typed commands via clap
//! 2. **Context Setup**: [`initialize`] with the `--data` override
//! 3. **API Dispatch**: call the matching `MindcareApi` method
//! 4. **Output Formatting**: `CmdResult` into colored terminal output
//! 5. **Error Handling**: errors bubble up to `main`, which prints them and
//!    exits with status 1

use super::render::{
    print_assessments, print_badges, print_delivery, print_empty_notice, print_habits,
    print_heading, print_messages, print_moods, print_points, print_posts, print_report,
    print_risk, print_sleep_logs, print_sos_records,
};
use super::setup::{
    print_grouped_help, Cli, Commands, CommunityCommands, DataCommands, InsightCommands,
    WellnessCommands,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use mindcareapp::api::MindcareApi;
use mindcareapp::commands::gamification::CHECK_IN_POINTS;
use mindcareapp::init::initialize;
use mindcareapp::model::{Instrument, Mood, SosAlert};
use mindcareapp::store::fs_backend::FsBackend;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Api = MindcareApi<FsBackend>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        print_grouped_help();
        return Ok(());
    };

    let ctx = initialize(cli.data).context("failed to initialize mindcare")?;
    debug!(data_dir = %ctx.data_dir.display(), "context ready");
    let api = ctx.api;

    match command {
        Commands::Community(cmd) => match cmd {
            CommunityCommands::Post { title, content } => handle_post(&api, &title, &content),
            CommunityCommands::Posts => handle_posts(&api),
            CommunityCommands::Sos {
                phone,
                name,
                relation,
                details,
                list,
            } => {
                if list {
                    handle_sos_list(&api)
                } else {
                    handle_sos(
                        &api,
                        SosAlert {
                            name,
                            phone,
                            relation,
                            details,
                        },
                    )
                }
            }
        },
        Commands::Wellness(cmd) => match cmd {
            WellnessCommands::Mood { mood, score, note } => handle_mood(&api, mood, score, &note),
            WellnessCommands::Assess {
                instrument,
                answers,
            } => handle_assess(&api, instrument, &answers),
            WellnessCommands::Badge {
                name,
                description,
                list,
            } => handle_badge(&api, name, description, list),
            WellnessCommands::Points { amount } => handle_points(&api, amount),
            WellnessCommands::Sleep { hours } => handle_sleep(&api, hours),
            WellnessCommands::Habit { name } => handle_habit(&api, &name),
        },
        Commands::Insights(cmd) => match cmd {
            InsightCommands::Dashboard => handle_dashboard(&api),
            InsightCommands::Risk => handle_risk(&api),
            InsightCommands::Report => handle_report(&api),
        },
        Commands::Data(cmd) => match cmd {
            DataCommands::Export { dir } => handle_export(&api, dir),
            DataCommands::Import { file } => handle_import(&api, file),
            DataCommands::Clear { yes } => handle_clear(&api, yes),
            DataCommands::Seed { seed } => handle_seed(&api, seed),
        },
    }
}

/// `RUST_LOG` wins; otherwise errors only, `-v` for warnings, `-vv` for
/// info, `-vvv` for debug.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_post(api: &Api, title: &str, content: &[String]) -> Result<()> {
    let result = api.create_post(title, &content.join(" "))?;
    print_messages(&result.messages);
    print_delivery(result.delivery.as_ref());
    Ok(())
}

fn handle_posts(api: &Api) -> Result<()> {
    let result = api.list_posts();
    print_posts(&result.posts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_sos(api: &Api, alert: SosAlert) -> Result<()> {
    let result = api.send_sos(alert)?;
    print_messages(&result.messages);
    print_delivery(result.delivery.as_ref());
    Ok(())
}

fn handle_sos_list(api: &Api) -> Result<()> {
    let result = api.list_sos();
    print_empty_notice(result.sos_records.is_empty(), "No SOS alerts recorded.");
    print_sos_records(&result.sos_records);
    Ok(())
}

fn handle_mood(api: &Api, mood: Option<String>, score: Option<u8>, note: &str) -> Result<()> {
    let Some(mood) = mood else {
        let result = api.list_moods();
        print_empty_notice(result.moods.is_empty(), "No moods logged yet.");
        print_moods(&result.moods);
        return Ok(());
    };
    let mood: Mood = mood.parse()?;
    let result = api.log_mood(mood, score, note)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_assess(api: &Api, instrument: Option<String>, answers: &[u32]) -> Result<()> {
    let Some(instrument) = instrument else {
        let result = api.list_assessments();
        print_empty_notice(result.assessments.is_empty(), "No assessments yet.");
        print_assessments(&result.assessments);
        return Ok(());
    };
    let instrument: Instrument = instrument.parse()?;
    let result = api.record_assessment(instrument, answers)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_badge(
    api: &Api,
    name: Option<String>,
    description: Option<String>,
    list: bool,
) -> Result<()> {
    let result = if list {
        api.gamification()
    } else {
        api.award_badge(name.as_deref(), description.as_deref())?
    };
    print_messages(&result.messages);
    if list {
        print_badges(&result.badges);
        if let Some(points) = result.points {
            print_points(points);
        }
    }
    Ok(())
}

fn handle_points(api: &Api, amount: Option<u64>) -> Result<()> {
    let result = api.add_points(amount.unwrap_or(CHECK_IN_POINTS))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sleep(api: &Api, hours: Option<f64>) -> Result<()> {
    match hours {
        Some(hours) => print_messages(&api.log_sleep(hours)?.messages),
        None => {
            let result = api.lifestyle();
            print_empty_notice(result.sleep_logs.is_empty(), "No sleep logged yet.");
            print_sleep_logs(&result.sleep_logs);
        }
    }
    Ok(())
}

fn handle_habit(api: &Api, name: &[String]) -> Result<()> {
    if name.is_empty() {
        let result = api.lifestyle();
        print_empty_notice(result.habits.is_empty(), "No habits tracked yet.");
        print_habits(&result.habits);
        return Ok(());
    }
    print_messages(&api.add_habit(&name.join(" "))?.messages);
    Ok(())
}

fn handle_dashboard(api: &Api) -> Result<()> {
    let result = api.dashboard();
    print_messages(&result.messages);

    print_heading("Recent moods");
    print_empty_notice(result.moods.is_empty(), "No moods logged yet.");
    print_moods(&result.moods[..result.moods.len().min(7)]);
    println!();

    print_heading("Assessments");
    print_empty_notice(result.assessments.is_empty(), "No assessments yet.");
    print_assessments(&result.assessments[..result.assessments.len().min(5)]);
    println!();

    print_heading("Badges");
    print_empty_notice(result.badges.is_empty(), "No badges yet, keep engaging!");
    print_badges(&result.badges);
    Ok(())
}

fn handle_risk(api: &Api) -> Result<()> {
    let result = api.risk()?;
    if let Some(risk) = &result.risk {
        print_risk(risk);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_report(api: &Api) -> Result<()> {
    if let Some(report) = api.report().report {
        print_report(&report);
    }
    Ok(())
}

fn handle_export(api: &Api, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    print_messages(&api.export(&dir)?.messages);
    Ok(())
}

fn handle_import(api: &Api, file: PathBuf) -> Result<()> {
    let result = api
        .import(&file)
        .with_context(|| format!("import of {} failed", file.display()))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(api: &Api, yes: bool) -> Result<()> {
    if !yes {
        if !std::io::stdin().is_terminal() {
            bail!("refusing to clear data without --yes");
        }
        print!("Delete all local MindCare data? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }
    print_messages(&api.clear_all()?.messages);
    Ok(())
}

fn handle_seed(api: &Api, seed: Option<u64>) -> Result<()> {
    print_messages(&api.seed_demo(seed)?.messages);
    Ok(())
}
