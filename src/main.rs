//! logtail - realtime log tailing client
//!
//! This is the binary entry point. All logic lives in the library crates.

use clap::Parser;
use color_eyre::eyre::eyre;

use logtail::Args;
use logtail_app::config::{
    default_config_path, init_config, load_settings, load_settings_strict, Settings,
};
use logtail_core::ResultExt;
use logtail_stream::{resolve_endpoint, WsConnector};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args.config.clone().or_else(default_config_path);

    if args.init_config {
        let path = config_path.ok_or_else(|| eyre!("No config directory available"))?;
        if init_config(&path)? {
            eprintln!("Wrote default config to {}", path.display());
        } else {
            eprintln!("Config already exists at {}", path.display());
        }
        return Ok(());
    }

    logtail_core::logging::init()?;

    // An explicit --config must exist and parse; the default location may not
    let mut settings = match (&args.config, &config_path) {
        (Some(path), _) => load_settings_strict(path)
            .with_context(|| format!("Loading config {}", path.display()))?,
        (None, Some(path)) => load_settings(path),
        (None, None) => Settings::default(),
    };
    args.apply(&mut settings);

    let endpoint = resolve_endpoint(&settings.connection.url).context("Resolving log source")?;
    tracing::info!("Log source: {}", endpoint);

    let config = settings.session_config();
    let connector = Box::new(WsConnector::new(endpoint.clone()));

    if args.headless {
        logtail::run_headless(config, endpoint.as_str(), args.format, settings.ui, connector)
            .await?;
    } else {
        logtail_tui::run(config, settings.ui, connector).await?;
    }

    Ok(())
}
