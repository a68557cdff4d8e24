use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use titer_core::*;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "titer")]
#[command(about = "Compound administration tracking and level projection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active profile's administration log (default)
    Log,

    /// Log a new administration under the active profile
    Add {
        /// Compound key from the reference catalog (e.g. test-e)
        #[arg(long)]
        compound: String,

        /// Dose in milligrams
        #[arg(long)]
        dose: f64,

        /// Administration time, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Delete an administration by event id
    Delete {
        id: Uuid,
    },

    /// Show the active profile, or switch to another one
    Profile {
        name: Option<String>,
    },

    /// List known profiles
    Profiles,

    /// Print projected active levels over the sampling window
    Levels {
        /// Restrict to one compound key (default: every active compound)
        #[arg(long)]
        compound: Option<String>,

        /// Days before now to start sampling
        #[arg(long)]
        days_back: Option<i64>,

        /// Days after now to stop sampling
        #[arg(long)]
        days_forward: Option<i64>,

        /// Hours between samples
        #[arg(long)]
        step_hours: Option<i64>,
    },

    /// Export the active profile's log to CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() {
    titer_core::logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = build_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let store = DoseStore::load(FileKv::new(&data_dir), &config.profiles.names)?;
    let mut tracker = Tracker::new(
        store,
        FileKv::new(&data_dir),
        catalog,
        &config.profiles.default,
    )?;

    match cli.command {
        None | Some(Commands::Log) => {
            render_log(&tracker);
            Ok(())
        }
        Some(Commands::Add { compound, dose, at }) => cmd_add(&mut tracker, &compound, dose, at),
        Some(Commands::Delete { id }) => cmd_delete(&mut tracker, id),
        Some(Commands::Profile { name }) => cmd_profile(&mut tracker, name),
        Some(Commands::Profiles) => {
            for name in tracker.profiles() {
                let marker = if name == tracker.current_profile() {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, name);
            }
            Ok(())
        }
        Some(Commands::Levels {
            compound,
            days_back,
            days_forward,
            step_hours,
        }) => cmd_levels(
            &tracker,
            compound,
            days_back.unwrap_or(config.chart.days_back),
            days_forward.unwrap_or(config.chart.days_forward),
            step_hours.unwrap_or(config.chart.step_hours),
        ),
        Some(Commands::Export { out }) => cmd_export(&tracker, &out),
    }
}

fn cmd_add(
    tracker: &mut Tracker<FileKv>,
    compound: &str,
    dose: f64,
    at: Option<String>,
) -> Result<()> {
    let taken_at = match at {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map_err(|_| Error::InvalidTimestamp(raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let refresh = tracker.add_dose(compound, dose, taken_at)?;
    println!("✓ Dose logged");
    rerender(tracker, refresh);
    Ok(())
}

fn cmd_delete(tracker: &mut Tracker<FileKv>, id: Uuid) -> Result<()> {
    let refresh = tracker.delete_dose(id)?;
    println!("✓ Entry deleted");
    rerender(tracker, refresh);
    Ok(())
}

fn cmd_profile(tracker: &mut Tracker<FileKv>, name: Option<String>) -> Result<()> {
    match name {
        None => {
            println!("{}", tracker.current_profile());
            Ok(())
        }
        Some(name) => {
            let refresh = tracker.switch_profile(&name)?;
            println!("✓ Switched to {}'s profile", name);
            rerender(tracker, refresh);
            Ok(())
        }
    }
}

fn cmd_levels(
    tracker: &Tracker<FileKv>,
    compound: Option<String>,
    days_back: i64,
    days_forward: i64,
    step_hours: i64,
) -> Result<()> {
    let compounds = match compound {
        Some(key) => vec![key],
        None => tracker.active_compounds(),
    };

    if compounds.is_empty() {
        println!("No administrations logged - nothing to project.");
        return Ok(());
    }

    let time_points = sample_window(Utc::now(), days_back, days_forward, step_hours);

    for key in compounds {
        let curve = tracker.projection(&key, &time_points)?;
        // Tracker::projection only succeeds for catalog-known keys
        let info = tracker
            .catalog()
            .get(&key)
            .ok_or_else(|| Error::UnknownCompound(key.clone()))?;

        println!();
        println!(
            "{} [{}] - half-life {} days",
            info.name, key, info.half_life_days
        );
        render_curve(&curve);
    }

    Ok(())
}

fn cmd_export(tracker: &Tracker<FileKv>, out: &std::path::Path) -> Result<()> {
    let count = write_log_csv(&tracker.log(), tracker.catalog(), out)?;
    println!("✓ Exported {} entries to {}", count, out.display());
    Ok(())
}

/// Consume a mutation's refresh signal by re-rendering the log
fn rerender(tracker: &Tracker<FileKv>, _refresh: Refresh) {
    println!();
    render_log(tracker);
}

fn render_log(tracker: &Tracker<FileKv>) {
    let log = tracker.log();
    if log.is_empty() {
        println!("No administrations logged for {}.", tracker.current_profile());
        return;
    }

    println!("Profile: {}", tracker.current_profile());
    println!(
        "{:<17} {:<36} {:>10}  {}",
        "DATE", "COMPOUND", "DOSE (mg)", "ID"
    );

    for event in &log {
        let name = tracker
            .catalog()
            .get(&event.compound)
            .map(|c| c.name.as_str())
            .unwrap_or(event.compound.as_str());

        println!(
            "{:<17} {:<36} {:>10}  {}",
            event.taken_at.format("%Y-%m-%d %H:%M"),
            name,
            event.dose_mg,
            event.id
        );
    }
}

const CURVE_WIDTH: usize = 40;

fn render_curve(curve: &[ProjectionPoint]) {
    let max = curve.iter().map(|p| p.level_mg).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        println!("  (no active amount in window)");
        return;
    }

    for point in curve {
        let bar_len = ((point.level_mg / max) * CURVE_WIDTH as f64).round() as usize;
        println!(
            "  {}  {:>8.1}  {}",
            point.at.format("%Y-%m-%d %H:%M"),
            point.level_mg,
            "#".repeat(bar_len)
        );
    }
}
