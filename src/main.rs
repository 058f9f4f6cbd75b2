//! Binary entry point: CLI dispatch and one-shot commands.
//!
//! Argument parsing lives in `args`; this module routes the parsed action
//! to the server, the importer, or the check report, and owns process exit
//! codes.

use std::process::exit;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveTime, Utc};

use sunnyside::args::{CliAction, ParsedArgs, display_help, display_version};
use sunnyside::config::{Config, set_config_dir};
use sunnyside::constants::EXIT_FAILURE;
use sunnyside::logger::Log;
use sunnyside::repository::PlaceRepository;
use sunnyside::{
    Evaluator, SpaProvider, api, import, log_block_start, log_end, log_error_exit, log_indented,
    log_pipe, log_version, log_warning,
};

#[actix_web::main]
async fn main() -> Result<()> {
    let parsed = ParsedArgs::parse(std::env::args());

    let result = match parsed.action {
        CliAction::ShowHelp => {
            display_help();
            return Ok(());
        }
        CliAction::ShowVersion => {
            display_version();
            return Ok(());
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            exit(EXIT_FAILURE);
        }
        CliAction::Serve {
            debug_enabled,
            config_dir,
        } => {
            startup(debug_enabled, config_dir)?;
            let config = Config::load()?;
            config.log_config();
            api::run_server(&config).await
        }
        CliAction::Import {
            debug_enabled,
            csv_path,
            config_dir,
        } => {
            startup(debug_enabled, config_dir)?;
            run_import(&csv_path)
        }
        CliAction::Check {
            debug_enabled,
            place_id,
            at,
            config_dir,
        } => {
            startup(debug_enabled, config_dir)?;
            run_check(place_id.as_deref(), at.as_deref())
        }
    };

    if let Err(e) = result {
        log_error_exit!("{e:#}");
        exit(EXIT_FAILURE);
    }
    log_end!();
    Ok(())
}

fn startup(debug_enabled: bool, config_dir: Option<String>) -> Result<()> {
    Log::set_debug(debug_enabled);
    set_config_dir(config_dir)?;
    log_version!();
    Ok(())
}

fn run_import(csv_path: &str) -> Result<()> {
    let config = Config::load()?;
    let repo = PlaceRepository::open(&config.db_path()?)?;

    log_block_start!("Importing places from {csv_path}");
    let summary = import::run_import(csv_path.as_ref(), &repo)?;
    log_block_start!(
        "Import finished: {} imported, {} skipped",
        summary.imported,
        summary.skipped
    );
    Ok(())
}

fn run_check(place_id: Option<&str>, at: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let repo = PlaceRepository::open(&config.db_path()?)?;
    let evaluator = Evaluator::with_params(SpaProvider, config.sunlight_params());
    let at = resolve_check_time(at)?;

    let places = match place_id {
        Some(id) => vec![
            repo.select_by_id(id)?
                .ok_or_else(|| anyhow!("no place with id '{id}'"))?,
        ],
        None => repo.select_all()?,
    };
    if places.is_empty() {
        log_pipe!();
        log_warning!("No places stored yet; run 'sunnyside import' first");
        return Ok(());
    }

    log_block_start!(
        "Sunlight at {}",
        at.with_timezone(&Local).format("%H:%M on %d %b %Y")
    );
    for place in places {
        match evaluator.is_in_sun(&place, at) {
            Ok(true) => log_indented!("sun    {} ({})", place.name, place.id),
            Ok(false) => log_indented!("shade  {} ({})", place.name, place.id),
            Err(e) => log_warning!("Could not evaluate '{}': {e}", place.id),
        }
    }
    Ok(())
}

/// Resolve an optional `HH:MM` wall-clock time against today's local date.
fn resolve_check_time(at: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(at) = at else {
        return Ok(Utc::now());
    };
    let time = NaiveTime::parse_from_str(at, "%H:%M")
        .with_context(|| format!("invalid time '{at}', expected HH:MM"))?;
    let local = Local::now()
        .date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .context("Could not resolve local time of day")?;
    Ok(local.with_timezone(&Utc))
}
