use medica::config::{self, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    config::load_dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("medica=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client_config = ClientConfig::from_env()?;
    tracing::info!(
        api_base = %client_config.api_base,
        flavor = ?client_config.flavor,
        "starting medica"
    );
    config::install(client_config);

    dioxus::launch(medica::ui::App);
    Ok(())
}
