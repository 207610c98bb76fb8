use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use reqwest::Url;
use std::io::stdout;
use std::sync::mpsc;
use tokio_util::sync::CancellationToken;

mod app;
mod config;
mod error;
mod input;
mod search;
#[cfg(test)]
mod test_utils;
mod theme;

use app::App;
use error::SubsearchError;
use search::LookupClient;
use search::lookup::service_url;
use search::worker::spawn_worker;

const LOG_FILE_NAME: &str = "subsearch-debug.log";

/// Interactive substance search
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Search-as-you-type substance lookup with debounced, cached suggestions"
)]
struct Args {
    /// Root URL of the lookup service (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Text to pre-fill the search field with
    #[arg(long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    init_logging()?;

    color_eyre::install()?;

    // Load config early to avoid defaults during app initialization
    let config_result = config::load_config();

    let args = Args::parse();

    // Validate before touching the terminal so the error stays readable
    let base_url = parse_base_url(
        args.base_url
            .as_deref()
            .unwrap_or(&config_result.config.lookup.base_url),
    )?;
    let client = LookupClient::new(&base_url, config_result.config.lookup.timeout())
        .map_err(SubsearchError::from)?;
    log::info!("Looking up suggestions at {}", client.endpoint());

    let mut app = App::new(&config_result.config);
    app.status = config_result.warning;
    if let Some(query) = args.query {
        app.set_query(&query);
    }

    // Worker lives on its own thread; the UI only talks to it through channels
    let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();
    app.search.set_channels(request_tx, response_rx);
    let shutdown = CancellationToken::new();
    let worker = spawn_worker(client, request_rx, response_tx, shutdown.clone());

    let terminal = init_terminal()?;
    let result = run(terminal, app);
    restore_terminal()?;

    shutdown.cancel();
    if worker.join().is_err() {
        log::error!("Fetch worker thread panicked");
    }

    let app = result?;

    // Output after terminal restore to prevent corruption
    if let Some(path) = app.navigation() {
        let url = service_url(&base_url, path).map_err(SubsearchError::from)?;
        println!("{}", url);
    }

    log::debug!("=== SUBSEARCH SESSION ENDED ===");

    Ok(())
}

/// Send log output to subsearch-debug.log in the temp dir
fn init_logging() -> Result<()> {
    use std::io::Write;

    let path = std::env::temp_dir().join(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== SUBSEARCH SESSION STARTED ===");
    Ok(())
}

fn parse_base_url(raw: &str) -> Result<Url, SubsearchError> {
    Url::parse(raw).map_err(|e| SubsearchError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<App> {
    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}
