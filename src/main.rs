//! datatable-tui - A filterable, sortable, paginated table in the terminal
//!
//! This is the main entry point for the datatable-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::Dataset;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use simplelog::WriteLogger;
use std::fs::{self, File};
use std::path::PathBuf;

const USAGE: &str = "\
Usage: datatable-tui [OPTIONS] [DATA_FILE]

Arguments:
  [DATA_FILE]            JSON, YAML or CSV file to show (default: built-in sample)

Options:
  --rows-per-page <N>    Initial page size: 10, 25, 50 or 100
  --log-file <PATH>      Log file (default: ~/.datatable-tui/datatable-tui.log)
  -h, --help             Print help
";

/// Command line arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    rows_per_page: Option<usize>,
    log_file: Option<PathBuf>,
    data_file: Option<PathBuf>,
    help: bool,
}

impl Args {
    fn parse(mut args: pico_args::Arguments) -> Result<Args> {
        let parsed = Args {
            help: args.contains(["-h", "--help"]),
            rows_per_page: args
                .opt_value_from_str("--rows-per-page")
                .context("--rows-per-page expects a number")?,
            log_file: args.opt_value_from_str("--log-file")?,
            data_file: args.opt_free_from_str()?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            anyhow::bail!("Unexpected arguments: {:?}", rest);
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    let args = Args::parse(pico_args::Arguments::from_env())?;
    if args.help {
        print!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load()?;
    init_logging(args.log_file.clone(), config.log_level())?;

    let config = Config {
        rows_per_page: args.rows_per_page.unwrap_or(config.rows_per_page),
        ..config
    };
    let rows_per_page = config.initial_rows_per_page();

    // Load data before touching the terminal so errors print normally
    let data_path = args.data_file.or_else(|| config.data_path.clone().map(PathBuf::from));
    let dataset = match &data_path {
        Some(path) => services::load_dataset(path)?,
        None => {
            log::info!("No data file given, showing the built-in sample");
            Dataset::demo()
        }
    };

    // Setup terminal
    let mut tui = Tui::new()?;
    tui.enter()?;

    let mut app = App::new(dataset, rows_per_page, data_path);

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        log::error!("{:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    log::info!("Exited cleanly");
    Ok(())
}

/// Send log records to a file; the terminal belongs to the UI
fn init_logging(log_file: Option<PathBuf>, level: log::LevelFilter) -> Result<()> {
    let path = match log_file {
        Some(path) => path,
        None => match Config::config_dir() {
            Some(dir) => {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
                dir.join("datatable-tui.log")
            }
            // No home directory, nowhere to log
            None => return Ok(()),
        },
    };

    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, simplelog::Config::default(), file)
        .context("Failed to initialize logger")?;
    log::info!("datatable-tui {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            draw_result = app.draw(frame, area);
        })?;
        draw_result?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(pico_args::Arguments::from_vec(
            args.iter().map(OsString::from).collect(),
        ))
    }

    #[test]
    fn test_parse_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_parse_all_arguments() {
        let args = parse(&["--rows-per-page", "25", "--log-file", "/tmp/t.log", "people.csv"]).unwrap();
        assert_eq!(args.rows_per_page, Some(25));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/t.log")));
        assert_eq!(args.data_file, Some(PathBuf::from("people.csv")));
        assert!(!args.help);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse(&["--rows-per-page", "many"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
    }

    #[test]
    fn test_parse_help() {
        assert!(parse(&["--help"]).unwrap().help);
    }
}
