//! `overlap` CLI — find when everyone can meet, across timezones.
//!
//! ## Usage
//!
//! ```sh
//! # Create a schedule (prints its id)
//! overlap new "Planning sync"
//!
//! # Declare availability in your own timezone
//! overlap add -s <ID> --user Alice --timezone America/New_York \
//!     --date 2024-03-10 --start 09:00 --end 12:00
//!
//! # Common windows (UTC) for one date, or every date
//! overlap common -s <ID> --date 2024-03-10
//! overlap show -s <ID>
//!
//! # Share a schedule as a link, and import one
//! overlap share -s <ID>
//! overlap import 'https://…?schedule=<ID>#data=<TOKEN>'
//!
//! # Search timezone names
//! overlap zones york
//! ```
//!
//! Schedules and settings live in `$OVERLAP_HOME` (default `~/.overlap`).
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use overlap_engine::normalize::parse_date;
use overlap_engine::report::{format_windows, summarize, summarize_day, DaySummary};
use overlap_engine::store::{FileStore, ScheduleStore};
use overlap_engine::{snapshot, zones};
use overlap_engine::{
    create_schedule, find_common_windows, rename_schedule, submit_availability, DstPolicy,
    Schedule, SchedulerConfig, Submission, SubmissionPolicy,
};
use tracing::{debug, info};

use crate::settings::Settings;

const DEFAULT_BASE_URL: &str = "https://overlap.tools/schedule";

#[derive(Parser)]
#[command(
    name = "overlap",
    version,
    about = "Find common meeting windows across timezones"
)]
struct Cli {
    /// Data directory for schedules and settings
    #[arg(long, env = "OVERLAP_HOME", global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty schedule
    New {
        /// Display name (defaults to "Meeting <Mon DD>")
        name: Option<String>,
    },
    /// Declare a block of availability
    Add {
        /// Schedule id
        #[arg(short, long)]
        schedule: String,
        /// Your name (remembered for next time)
        #[arg(short, long, env = "OVERLAP_USER")]
        user: Option<String>,
        /// IANA timezone of the times given (remembered for next time)
        #[arg(short, long, env = "OVERLAP_TIMEZONE")]
        timezone: Option<String>,
        /// Date, YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        /// Local start time, HH:MM
        #[arg(long, default_value = "09:00")]
        start: String,
        /// Local end time, HH:MM
        #[arg(long, default_value = "17:00")]
        end: String,
        /// Keep your earlier ranges on this date instead of replacing them
        #[arg(long)]
        accumulate: bool,
        /// Fail on times skipped by a DST change instead of shifting them forward
        #[arg(long)]
        reject_dst_gaps: bool,
    },
    /// Print common windows (UTC)
    Common {
        /// Schedule id
        #[arg(short, long)]
        schedule: String,
        /// Only this date, YYYY-MM-DD (all dates if omitted)
        #[arg(short, long)]
        date: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print every date with participants and common windows
    Show {
        /// Schedule id
        #[arg(short, long)]
        schedule: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rename a schedule
    Rename {
        /// Schedule id
        #[arg(short, long)]
        schedule: String,
        /// New name (blank keeps the current one)
        name: String,
    },
    /// Print a share link carrying the whole schedule
    Share {
        /// Schedule id
        #[arg(short, long)]
        schedule: String,
        /// Base URL for the link
        #[arg(long, env = "OVERLAP_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
    /// Import a schedule from a share link or bare token
    Import {
        /// Share link (containing `#data=`) or token
        link: String,
    },
    /// List stored schedules
    List,
    /// List IANA timezone names, optionally filtered
    Zones {
        /// Case-insensitive substring to match
        query: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // `zones` needs no data directory.
    if let Commands::Zones { query } = &cli.command {
        for name in zones::search_zones(query.as_deref().unwrap_or("")) {
            println!("{}", name);
        }
        return Ok(());
    }

    let home = resolve_home(cli.home)?;
    debug!(home = %home.display(), "using data directory");
    let mut store = FileStore::open(&home)
        .with_context(|| format!("Failed to open data directory: {}", home.display()))?;

    match cli.command {
        Commands::New { name } => {
            let schedule = create_schedule(name.as_deref().unwrap_or(""));
            store.save(&schedule)?;
            info!(id = %schedule.id, "created schedule");
            println!("{}", schedule.id);
            eprintln!("Created schedule '{}'", schedule.name);
        }
        Commands::Add {
            schedule,
            user,
            timezone,
            date,
            start,
            end,
            accumulate,
            reject_dst_gaps,
        } => {
            let current = load_schedule(&store, &schedule)?;
            let mut settings = Settings::load(&home)?;

            let user = user
                .or_else(|| settings.user_name.clone())
                .context("No user name: pass --user or set OVERLAP_USER")?;
            let timezone = timezone
                .or_else(|| settings.default_timezone.clone())
                .map(|tz| tz.trim().to_string())
                .unwrap_or_else(|| "UTC".to_string());

            let config = SchedulerConfig {
                dst_policy: if reject_dst_gaps {
                    DstPolicy::Reject
                } else {
                    DstPolicy::ShiftForward
                },
                submission_policy: if accumulate {
                    SubmissionPolicy::Accumulate
                } else {
                    SubmissionPolicy::ReplaceUserDay
                },
            };
            let submission = Submission::new(&user, &timezone, &date, &start, &end);
            let updated = submit_availability(&current, &submission, &config)
                .context("Invalid availability")?;
            store.save(&updated)?;

            if settings.remember(user.trim(), &timezone) {
                settings.save(&home)?;
            }

            let day = parse_date(&date)?;
            print_day(&summarize_day(&updated, day));
        }
        Commands::Common {
            schedule,
            date,
            json,
        } => {
            let schedule = load_schedule(&store, &schedule)?;
            match date {
                Some(date) => {
                    let day = parse_date(&date)?;
                    let windows = find_common_windows(&schedule, day);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&windows)?);
                    } else if windows.is_empty() {
                        println!("No common availability on {}", day);
                    } else {
                        println!("{}", format_windows(&windows));
                    }
                }
                None => {
                    let days = summarize(&schedule);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&days)?);
                    } else {
                        for day in &days {
                            match day.common_label() {
                                Some(label) => println!("{}: {}", day.date, label),
                                None => println!("{}: none", day.date),
                            }
                        }
                    }
                }
            }
        }
        Commands::Show { schedule, json } => {
            let schedule = load_schedule(&store, &schedule)?;
            let days = summarize(&schedule);
            if json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else {
                println!("{} ({})", schedule.name, schedule.id);
                for day in &days {
                    print_day(day);
                }
            }
        }
        Commands::Rename { schedule, name } => {
            let current = load_schedule(&store, &schedule)?;
            let updated = rename_schedule(&current, &name);
            store.save(&updated)?;
            println!("{}", updated.name);
        }
        Commands::Share { schedule, base_url } => {
            let schedule = load_schedule(&store, &schedule)?;
            println!("{}", snapshot::share_link(&base_url, &schedule)?);
        }
        Commands::Import { link } => {
            let schedule = if link.contains("#data=") {
                snapshot::parse_share_link(&link)
            } else {
                snapshot::decode_share_token(&link)
            }
            .context("Failed to decode shared schedule")?;
            store.save(&schedule)?;
            println!("{}", schedule.id);
            eprintln!("Imported schedule '{}'", schedule.name);
        }
        Commands::List => {
            for id in store.list()? {
                match store.load(&id)? {
                    Some(schedule) => println!("{}\t{}", schedule.id, schedule.name),
                    None => continue,
                }
            }
        }
        Commands::Zones { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// `--home` / `OVERLAP_HOME`, else `~/.overlap`, else `./.overlap`.
fn resolve_home(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    let base = match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };
    Ok(base.join(".overlap"))
}

fn load_schedule(store: &FileStore, id: &str) -> Result<Schedule> {
    store
        .load(id)
        .with_context(|| format!("Failed to load schedule {}", id))?
        .with_context(|| format!("No schedule with id {}", id))
}

fn print_day(day: &DaySummary) {
    println!("{}", day.date.format("%b %d, %a"));
    for p in &day.participants {
        println!("  {} ({}): {}", p.user, p.timezone, p.ranges.join(", "));
    }
    match day.common_label() {
        Some(label) => println!("  Common: {}", label),
        None => println!("  Common: none"),
    }
}
