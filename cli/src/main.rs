use std::io;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

mod config;
mod play;
mod prompt;
mod session;
mod timer;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start with debug logging on, same as typing `debug` in game
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Filtering happens through `log::set_max_level`, the logger itself lets everything through.
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("textsweep")
        .build();
    TermLogger::init(
        LevelFilter::Trace,
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Error initializing logger")?;

    let settings = config::Settings::new(args.verbose.log_level_filter(), args.debug);
    settings.apply();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let prompt = prompt::Prompt::new(io::stdin().lock(), io::stdout().lock());
    session::Session::new(prompt, settings, seed)
        .run()
        .context("Terminal I/O failed")
}
