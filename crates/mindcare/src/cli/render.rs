use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use mindcareapp::commands::{CmdMessage, Delivery, MessageLevel, Report};
use mindcareapp::model::{
    Assessment, Badge, MoodEntry, Post, RiskAssessment, RiskLevel, SleepLog, SosRecord,
};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const EMPTY_MARKER: &str = "—";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_empty_notice(is_empty: bool, notice: &str) {
    if is_empty {
        println!("{}", notice.dimmed());
    }
}

pub(super) fn print_delivery(delivery: Option<&Delivery>) {
    if let Some(Delivery::Local { reason }) = delivery {
        println!("{}", format!("({})", reason).dimmed());
    }
}

pub(super) fn print_posts(posts: &[Post]) {
    for (i, post) in posts.iter().enumerate() {
        let prefix = format!("{:>3}. ", i + 1);
        let byline = format!("  {}", post.nickname);
        let fixed = prefix.width() + byline.width() + TIME_WIDTH;
        let title = truncate_to_width(&post.title, LINE_WIDTH.saturating_sub(fixed));
        let padding = LINE_WIDTH.saturating_sub(fixed + title.width());
        println!(
            "{}{}{}{}{}",
            prefix.yellow(),
            title.bold(),
            " ".repeat(padding),
            byline.dimmed(),
            format_time_ago(post.date).dimmed()
        );
        let preview: String = post
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        println!("     {}", truncate_to_width(&preview, LINE_WIDTH - 5));
    }
}

pub(super) fn print_sos_records(records: &[SosRecord]) {
    for record in records {
        let alert = &record.alert;
        let who = match (&alert.name, &alert.relation) {
            (Some(name), Some(relation)) => format!("{} ({})", name, relation),
            (Some(name), None) => name.clone(),
            (None, Some(relation)) => relation.clone(),
            (None, None) => EMPTY_MARKER.to_string(),
        };
        println!(
            "{}  {}  {}",
            alert.phone.as_deref().unwrap_or(EMPTY_MARKER).red(),
            who,
            format_time_ago(record.date).dimmed()
        );
        if let Some(details) = alert.details.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", truncate_to_width(details, LINE_WIDTH - 4));
        }
    }
}

pub(super) fn print_moods(moods: &[MoodEntry]) {
    for entry in moods {
        let bar = "●".repeat(entry.mood_score.map(usize::from).unwrap_or(0));
        let line = format!("{:<8} {:<3}", entry.mood.as_str(), bar);
        let note = if entry.note.is_empty() {
            String::new()
        } else {
            truncate_to_width(&entry.note, LINE_WIDTH - TIME_WIDTH - 14)
        };
        println!("{} {:<48}{}", line, note, format_time_ago(entry.date).dimmed());
    }
}

pub(super) fn print_assessments(assessments: &[Assessment]) {
    for a in assessments {
        println!(
            "{:<8} {:>5}  {}",
            a.kind.bold(),
            format_score(a.score),
            format_time_ago(a.date).dimmed()
        );
    }
}

pub(super) fn print_badges(badges: &[Badge]) {
    for badge in badges {
        println!(
            "{} {}  {}",
            "★".yellow(),
            badge.badge_name.bold(),
            badge.description.dimmed()
        );
    }
}

pub(super) fn print_sleep_logs(logs: &[SleepLog]) {
    for log in logs {
        println!("{:>5} h  {}", format_score(log.hours), format_time_ago(log.date).dimmed());
    }
}

pub(super) fn print_habits(habits: &[String]) {
    for habit in habits {
        println!("  • {}", truncate_to_width(habit, LINE_WIDTH - 4));
    }
}

pub(super) fn print_points(points: u64) {
    println!("{} {}", "Points:".bold(), points);
}

pub(super) fn print_risk(risk: &RiskAssessment) {
    println!(
        "{} {}  {}",
        "Level:".bold(),
        color_level(risk.level),
        format!("score: {:.2}", risk.score).dimmed()
    );
}

pub(super) fn print_report(report: &Report) {
    let avg_mood = report
        .average_mood
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| EMPTY_MARKER.to_string());
    let avg_sleep = report
        .average_sleep
        .map(|v| format!("{:.1} h", v))
        .unwrap_or_else(|| EMPTY_MARKER.to_string());
    let last = report
        .last_assessment
        .as_ref()
        .map(|a| format!("{} {}", a.kind, format_score(a.score)))
        .unwrap_or_else(|| EMPTY_MARKER.to_string());

    let rows = [
        ("Average mood", format!("{} ({} entries)", avg_mood, report.mood_count)),
        ("Last assessment", last),
        ("Average sleep", format!("{} ({} nights)", avg_sleep, report.sleep_count)),
        ("Points", report.points.to_string()),
        ("Badges", report.badge_count.to_string()),
        ("Posts", report.post_count.to_string()),
        ("Habits", report.habit_count.to_string()),
        ("SOS alerts", report.sos_count.to_string()),
    ];
    for (label, value) in rows {
        println!("{:<16} {}", format!("{}:", label).bold(), value);
    }
}

pub(super) fn print_heading(title: &str) {
    println!("{}", title.bold().underline());
}

fn color_level(level: RiskLevel) -> ColoredString {
    let text = level.to_string();
    match level {
        RiskLevel::High => text.red().bold(),
        RiskLevel::Medium => text.yellow(),
        RiskLevel::Low => text.green(),
    }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{:.1}", score)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
