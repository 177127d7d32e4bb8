use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ortho_completion::openai::OpenAiClient;
use ortho_server::config::{LogFormat, ServerConfig};
use ortho_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let config = ServerConfig::load()?;
    init_tracing(config.log_format);

    let profile =
        ortho_intake::resolve_profile(&config.intake_profile, config.required_fields.clone())?;
    let client = OpenAiClient::new(&config.api_base_url, &config.model, config.api_key()?);

    tracing::info!(
        profile = profile.id(),
        required = profile.required_fields().len(),
        model = %config.model,
        "intake profile loaded"
    );

    let state = AppState::new(Arc::new(client), Arc::from(profile));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");

    axum::serve(listener, ortho_server::router(state)).await?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
