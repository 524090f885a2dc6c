use std::fs::{self, File};
use std::io;
use std::sync::{Arc, Mutex};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use postdeck::api::ApiClient;
use postdeck::app::{App, Services};
use postdeck::cache::{FileStore, ImageCache, KeyValueStore, MemoryStore};
use postdeck::config::Config;
use postdeck::error::Result;

/// Send logs to a file under the cache directory; stdout belongs to the TUI.
fn init_tracing(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.cache_dir)?;
    let file = File::create(config.log_path())?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postdeck=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config)?;
    tracing::info!(api = %config.api_base_url, cache = %config.cache_dir.display(), "starting postdeck");

    let client = ApiClient::from_config(&config)?;
    let store: Arc<dyn KeyValueStore> = if config.ephemeral_state {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(config.state_path()))
    };

    let mut app = App::new(Services {
        repository: Arc::new(client),
        images: Arc::new(ImageCache::from_config(&config)),
        store,
        infinite_per_page: config.infinite_per_page,
        pagination_per_page: config.pagination_per_page,
    });

    let mut terminal = init_terminal()?;
    let result = app.run(&mut terminal);
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("exiting");
    Ok(result?)
}
