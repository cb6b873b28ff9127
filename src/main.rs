use std::fs::File;
use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Env, Target};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use twincade::app::App;
use twincade::config::{Config, LogConfig};
use twincade::context::GameContext;
use twincade::error::AppError;
use twincade::event::TerminalEvents;
use twincade::runner;

// The terminal belongs to ratatui, so log lines go to a file.
fn init_logging(log: &LogConfig) -> Result<(), AppError> {
    let file = File::create(&log.file).map_err(|source| AppError::LogFile {
        path: log.file.clone(),
        source,
    })?;
    env_logger::Builder::from_env(Env::default().default_filter_or(log.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), AppError> {
    let config = Config::load()?;
    init_logging(&config.log)?;
    log::info!("starting, seed {:?}", config.seed);

    // Sprites load before the terminal is switched over, so a bad asset
    // directory reports on a normal screen
    let mut ctx = GameContext::new(config)?;
    let mut app = App::new(&ctx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut events = TerminalEvents::new();
    let result = runner::run(&mut terminal, &mut events, &mut ctx, &mut app);

    // Restore terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => log::info!("quit"),
        Err(e) => log::error!("loop failed: {e}"),
    }
    result
}
