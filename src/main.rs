//! taildiff - Live-Tailing Terminal Log Viewer
//!
//! Follows a growing log file in a bounded, filterable terminal window.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use taildiff::render::ui::{TerminalUI, ViewOptions};
use taildiff::{Application, Settings};

fn cli() -> Command {
    Command::new("taildiff")
        .version(taildiff::VERSION)
        .about("A live-tailing terminal log viewer")
        .long_about(
            "taildiff follows a growing log file and keeps a bounded window of it on screen, \
             patching only the rows that change. Lines can be filtered, highlighted, masked \
             and tagged as errors while the file keeps growing.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the log file to follow")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .value_name("TEXT")
                .help("Only show lines containing TEXT (case-insensitive)"),
        )
        .arg(
            Arg::new("mask")
                .long("mask")
                .value_name("TEXT")
                .help("Strip the first occurrence of TEXT from each shown line"),
        )
        .arg(
            Arg::new("error-tag")
                .long("error-tag")
                .value_name("TEXT")
                .help("Mark lines containing TEXT as errors"),
        )
        .arg(
            Arg::new("highlight")
                .long("highlight")
                .value_name("TEXT")
                .help("Highlight occurrences of TEXT"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write diagnostics to PATH instead of stderr"),
        )
        .arg(
            Arg::new("no-save")
                .long("no-save")
                .action(ArgAction::SetTrue)
                .help("Do not update the settings file on exit"),
        )
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // The terminal belongs to the UI, so stderr logging stays off unless RUST_LOG asks for it.
    let default_level = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn view_options(matches: &ArgMatches) -> ViewOptions {
    let value = |name: &str| matches.get_one::<String>(name).cloned().unwrap_or_default();
    ViewOptions {
        filter: value("filter"),
        highlight: value("highlight"),
        mask: value("mask"),
        error_tag: value("error-tag"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_logging(matches.get_one::<String>("log-file").map(Path::new))?;

    let Some(file) = matches.get_one::<String>("file") else {
        anyhow::bail!("Missing log file argument");
    };
    let file_path = PathBuf::from(file);

    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", file_path.display());
    }

    if !file_path.is_file() {
        anyhow::bail!("Path is not a regular file: {}", file_path.display());
    }

    let mut settings = Settings::load().context("Failed to load settings")?;

    let ui_renderer = Box::new(TerminalUI::new()?);
    let mut app = Application::new(
        &file_path,
        settings.clone(),
        view_options(&matches),
        ui_renderer,
    )?;

    app.run().await?;

    if !matches.get_flag("no-save") {
        settings.remember_file(file_path.canonicalize().unwrap_or(file_path));
        settings.save().context("Failed to save settings")?;
    }

    Ok(())
}
