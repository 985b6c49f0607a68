use std::io;
use std::process;
use std::time::Instant;

use anyhow::Context;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifegrid::app::App;
use lifegrid::config::Config;
use lifegrid::life::Life;
use lifegrid::terminal::Terminal;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = run() {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::default();

    let mut life = Life::from_config(&config, Instant::now()).context("Invalid configuration")?;
    let app = App::new(&config);

    info!(
        width = config.grid_width(),
        height = config.grid_height(),
        rules = %life.rules(),
        timestep = ?config.timestep,
        "starting"
    );

    let mut term = Terminal::new(
        config.screen_width as usize,
        config.screen_height as usize,
        &config.title,
    )
    .context("Failed to set up the terminal")?;

    let res = app.run(&mut term, &mut life);

    // restore the terminal before anything gets logged
    drop(term);
    res.context("Simulation loop failed")?;

    info!(
        generation = life.grid().generation(),
        population = life.grid().population(),
        "exiting"
    );

    Ok(())
}
