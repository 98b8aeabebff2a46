use crate::cli::{OutputFormat, SortBy, StatusFilter};
use crate::logic::client::fetch::{build_client, fetch_applications};
use crate::logic::config::PollConfig;
use crate::logic::fleet::{camera_counts, fleet_summary, overall_status, time_since, TimeSince};
use crate::logic::types::{Application, FleetSummary, Status};
use chrono::{DateTime, Utc};
use colored::*;
use std::time::Duration;
use tokio::time::sleep;

/// Colored status indicator dot
fn status_dot(status: Status) -> String {
    match status {
        Status::Online => "●".green().to_string(),
        Status::Warning => "●".yellow().to_string(),
        Status::Offline => "●".red().to_string(),
    }
}

/// Last-recognition label, colored by elapsed-time bucket. The epoch sentinel
/// means the source never answered at all.
fn last_recognition_label(app: &Application, now: DateTime<Utc>) -> String {
    if app.last_recognition_at == DateTime::<Utc>::UNIX_EPOCH {
        return "no response".red().to_string();
    }
    let bucket = time_since(app.last_recognition_at, now);
    match bucket {
        TimeSince::JustNow | TimeSince::Minutes(_) => bucket.to_string().green().to_string(),
        TimeSince::Hours(_) => bucket.to_string().yellow().to_string(),
        TimeSince::Days(_) => bucket.to_string().red().to_string(),
    }
}

/// Sort applications based on the provided criteria
fn sort_applications(apps: &mut Vec<Application>, sort_by: &SortBy) {
    match sort_by {
        SortBy::LastRecognition => {
            apps.sort_by(|a, b| b.last_recognition_at.cmp(&a.last_recognition_at))
        }
        SortBy::Name => apps.sort_by(|a, b| a.id.cmp(&b.id)),
        // worst first, so problems surface at the top
        SortBy::Status => apps.sort_by(|a, b| {
            overall_status(b)
                .severity()
                .cmp(&overall_status(a).severity())
        }),
    }
}

/// Filter applications by overall status
fn filter_applications(
    apps: Vec<Application>,
    status_filter: &Option<StatusFilter>,
) -> Vec<Application> {
    if let Some(filter) = status_filter {
        let want = match filter {
            StatusFilter::Online => Status::Online,
            StatusFilter::Warning => Status::Warning,
            StatusFilter::Offline => Status::Offline,
        };
        apps.into_iter()
            .filter(|app| overall_status(app) == want)
            .collect()
    } else {
        apps
    }
}

/// Truncate a display name to at most `max` characters. Counts chars, not
/// bytes: backend URLs can carry multibyte labels and a byte slice would
/// panic mid-character.
fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let cut: String = name.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        name.to_string()
    }
}

fn camera_breakdown(app: &Application) -> String {
    let counts = camera_counts(app);
    format!(
        "{} {} {}",
        format!("{}●", counts.online).green(),
        format!("{}●", counts.warning).yellow(),
        format!("{}●", counts.offline).red()
    )
}

/// Display applications in table format
fn display_applications_table(apps: &[Application], extended: bool) {
    println!(
        "{:<3} {:<40} {:<6} {:<8} {:<28} {:<16}",
        "ST".bright_white().bold(),
        "APPLICATION".bright_white().bold(),
        "CORE".bright_white().bold(),
        "SERVER".bright_white().bold(),
        "CAMERAS".bright_white().bold(),
        "LAST RECOGNITION".bright_white().bold()
    );
    println!("{}", "─".repeat(100).bright_blue());

    let now = Utc::now();
    for app in apps {
        let name = truncate_name(&app.name, 38);

        println!(
            "{:<3} {:<40} {:<6} {:<8} {:<28} {:<16}",
            status_dot(overall_status(app)),
            name,
            status_dot(app.core_status),
            status_dot(app.server_status),
            camera_breakdown(app),
            last_recognition_label(app, now)
        );

        if extended {
            for camera in &app.cameras {
                println!("      {} {}", status_dot(camera.status), camera.name);
            }
        }
    }
}

/// Display applications in compact format
fn display_applications_compact(apps: &[Application]) {
    println!("{} {}", "Applications:".bright_blue().bold(), apps.len());
    let now = Utc::now();
    for app in apps {
        println!(
            "{} {} ({})",
            status_dot(overall_status(app)),
            app.name,
            last_recognition_label(app, now)
        );
    }
}

fn display_fleet_summary(summary: &FleetSummary) {
    println!(
        "{} {} online, {} warning, {} offline | {} cameras",
        "Summary:".bright_white().bold(),
        summary.applications_online.to_string().green(),
        summary.applications_warning.to_string().yellow(),
        summary.applications_offline.to_string().red(),
        summary.total_cameras.to_string().bright_blue()
    );
}

/// Sort and filter the snapshot for display. The fleet summary always covers
/// the whole snapshot, never the filtered view.
fn prepare(
    apps: Vec<Application>,
    sort: &SortBy,
    status: &Option<StatusFilter>,
) -> (Vec<Application>, FleetSummary) {
    let summary = fleet_summary(&apps);
    let mut apps = filter_applications(apps, status);
    sort_applications(&mut apps, sort);
    (apps, summary)
}

fn render(
    apps: Vec<Application>,
    format: &OutputFormat,
    sort: &SortBy,
    status: &Option<StatusFilter>,
    extended: bool,
) -> anyhow::Result<()> {
    let (apps, summary) = prepare(apps, sort, status);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&apps)?);
        }
        OutputFormat::Table => {
            if apps.is_empty() {
                println!("{}", "No applications found.".yellow());
            } else {
                display_applications_table(&apps, extended);
                println!();
                display_fleet_summary(&summary);
            }
        }
        OutputFormat::Compact => {
            if apps.is_empty() {
                println!("{}", "No applications found.".yellow());
            } else {
                display_applications_compact(&apps);
            }
        }
    }
    Ok(())
}

pub async fn run(
    host: String,
    port: u16,
    base_url: Option<String>,
    format: OutputFormat,
    sort: SortBy,
    status: Option<StatusFilter>,
    watch: bool,
    extended: bool,
    config: PollConfig,
) -> anyhow::Result<()> {
    let client = build_client(config.request_timeout_seconds)?;

    if watch {
        println!(
            "{}",
            "Watch mode enabled. Press Ctrl+C to exit..."
                .bright_cyan()
                .bold()
        );
        loop {
            match fetch_applications(&client, base_url.as_deref(), &host, port).await {
                Ok(apps) => {
                    // Clear screen only on success so a failed poll never
                    // blanks the previous snapshot.
                    print!("\x1B[2J\x1B[1;1H");
                    println!(
                        "{} {}",
                        "Last updated:".bright_cyan(),
                        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
                    );
                    println!();
                    render(apps, &format, &sort, &status, extended)?;
                }
                Err(e) => {
                    eprintln!("{} {:#}", "✗ poll failed:".red().bold(), e);
                }
            }
            sleep(Duration::from_secs(config.poll_interval_seconds)).await;
        }
    } else {
        let apps = fetch_applications(&client, base_url.as_deref(), &host, port).await?;
        render(apps, &format, &sort, &status, extended)
    }
}

/// Fetch once and print fleet-level counts only
pub async fn run_summary(
    host: String,
    port: u16,
    base_url: Option<String>,
    format: OutputFormat,
    config: PollConfig,
) -> anyhow::Result<()> {
    let client = build_client(config.request_timeout_seconds)?;
    let apps = fetch_applications(&client, base_url.as_deref(), &host, port).await?;
    let summary = fleet_summary(&apps);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => {
            println!("{}", "Fleet summary".bright_blue().bold());
            println!(
                "  {} {}",
                "Applications online:".green(),
                summary.applications_online
            );
            println!(
                "  {} {}",
                "Applications warning:".yellow(),
                summary.applications_warning
            );
            println!(
                "  {} {}",
                "Applications offline:".red(),
                summary.applications_offline
            );
            println!(
                "  {} {}",
                "Total cameras:".bright_blue(),
                summary.total_cameras
            );
        }
    }
    Ok(())
}
