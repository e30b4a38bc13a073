use anyhow::anyhow;
use std::sync::Arc;
use std::thread;
use tiny_http::Server;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use turbodeck_data::{load_content, load_game_config};
use turbodeck_web::{serve, App, HighScoreStore, SessionDirectory, Settings};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env();
    let config = load_game_config(&settings.assets_dir)?;
    let content = load_content(&settings.assets_dir)?;
    let directory = SessionDirectory::new(Arc::new(config), Arc::new(content));
    let scores = HighScoreStore::load(&settings.highscores_path);
    let app = Arc::new(App::new(directory, scores));

    let server = Server::http(&settings.addr)
        .map_err(|err| anyhow!("start server on {}: {err}", settings.addr))?;
    info!(addr = %settings.addr, "turbodeck server listening");
    for request in server.incoming_requests() {
        let app = Arc::clone(&app);
        thread::spawn(move || {
            if let Err(err) = serve(request, &app) {
                warn!(error = %format!("{err:#}"), "request error");
            }
        });
    }
    Ok(())
}
