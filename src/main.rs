#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::sync::Arc;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use tripform::api::HttpSubmitter;
use tripform::cli::Cli;
use tripform::config::Config;
use tripform::host::TerminalHost;
use tripform::logging;
use tripform::model::EntryLink;
use tripform::tui::{App, AppError, Screen};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    // Launch problems are reported before the terminal is taken over
    let (config, screen, submitter) = prepare(&cli)?;
    let host = TerminalHost::new(config.embedded);
    info!(link = %cli.link, base_url = %config.api_base_url, "launch");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = runtime.block_on(async {
        let mut app = App::new(screen, &config, Arc::new(submitter), Box::new(host));
        app.run(&mut terminal).await
    });

    let restore_result = restore_terminal();
    match result {
        Err(e) => {
            error!(error = %e, "exiting with error");
            Err(e.into())
        }
        Ok(()) => restore_result.map_err(Into::into),
    }
}

/// Loads configuration, starts logging and resolves the entry link.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn prepare(cli: &Cli) -> Result<(Config, Screen, HttpSubmitter), AppError> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    logging::init(&config.log_path()?)?;
    let screen = Screen::from(EntryLink::parse(&cli.link)?);
    let submitter = HttpSubmitter::new(&config.base_url()?);
    Ok((config, screen, submitter))
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
    raw_result.and(screen_result)
}
