use anyhow::Context;
use clap::Parser;
use fairychess::app;
use fairychess::cli::Cli;
use fairychess::core::{init_logging, settings_path, AppSettings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let path = cli.config.clone().unwrap_or_else(settings_path);

    // logging needs the level before the load below can report problems
    let level = AppSettings::read_from(&path)
        .map(|settings| settings.log_level)
        .unwrap_or_else(|_| AppSettings::default().log_level);
    init_logging(&level).context("failed to initialise logging")?;

    let mut settings = AppSettings::load(Some(&path));
    settings.json_events |= cli.json;

    // the observer thread writes to stdout too, so the handle is not locked here
    app::run(&cli, &settings, &mut std::io::stdout(), std::io::stdout())?;
    Ok(())
}
