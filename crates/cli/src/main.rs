use std::process::ExitCode;

use clap::Parser;
use log::debug;

use console_kit_cli::cli_args::Args;
use console_kit_cli::commands::run_demo;
use console_kit_core::config;
use console_kit_core::crossterm_terminal::CrosstermTerminal;
use console_kit_core::error::Result;

fn execute() -> Result<()> {
    let args = Args::parse();

    let theme_path = config::get_theme_path(&args.theme_path);
    debug!("Theme path: `{}`", theme_path);
    let theme = config::load_theme(&theme_path)?;

    let mut terminal = CrosstermTerminal::new();
    run_demo(&mut terminal, &args.demo, &theme)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
