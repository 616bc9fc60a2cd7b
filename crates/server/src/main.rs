use anyhow::Context;
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voucherdrop_core::ProfanityFilter;
use voucherdrop_extract::Extractor;
use voucherdrop_server::config::{load_settings, AppConfig, LogFormat};
use voucherdrop_server::AppState;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new("voucherdrop-server".into(), std::io::stdout))
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(config.log_format);

    let (extractor_config, moderation) = load_settings(config.config_path.as_deref())
        .with_context(|| match &config.config_path {
            Some(path) => format!("Failed to load settings from {}", path.display()),
            None => "Failed to load default settings".to_string(),
        })?;

    let extractor = Extractor::new(extractor_config).context("Invalid extractor configuration")?;
    info!(
        categories = extractor.categories().len(),
        "Extractor ready with categories: {}",
        extractor.categories()
    );

    let moderation = ProfanityFilter::new(&moderation);
    if !moderation.is_active() {
        tracing::warn!("Profanity screening is off; submissions are not moderated");
    }

    let state = AppState::new(extractor, moderation);
    voucherdrop_server::start_server(&config.addr(), state, config.max_body_bytes).await?;

    Ok(())
}
