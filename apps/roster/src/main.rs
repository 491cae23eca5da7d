use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{PaletteColorPicker, RosterSession, RosterStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod shell;

use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use shell::Shell;

#[derive(Parser, Debug)]
#[command(about = "Manage teams and players from the command line")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Read commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Print replies as JSON lines.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.config);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = build_store(&settings);
    let options = store.options();
    info!(
        require_photo = options.require_photo,
        team_removal = ?options.team_removal,
        "roster session started"
    );
    let mut shell = Shell::new(RosterSession::with_store(store), args.json);

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("failed to open script '{}'", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    run_script(&mut shell, input, &mut stdout.lock())?;

    let store = shell.session().store();
    info!(
        teams = store.team_count(),
        players = store.player_count(),
        "roster session finished"
    );
    Ok(())
}

/// Store configured from settings; a palette, when present, replaces random colors.
fn build_store(settings: &Settings) -> RosterStore {
    let options = settings.store_options();
    match settings.palette.clone().and_then(PaletteColorPicker::new) {
        Some(palette) => RosterStore::with_color_picker(options, palette),
        None => RosterStore::new(options),
    }
}

fn run_script(shell: &mut Shell, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read command line")?;
        if let Some(reply) = shell.run_line(&line) {
            writeln!(out, "{reply}").context("failed to write reply")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
