use orgpulse::models::settings::AssistantSettings;
use orgpulse::providers::OpenAiProvider;
use orgpulse::services::assistant::HrAssistant;
use orgpulse::services::directory::DirectoryService;
use orgpulse::store::PgStore;
use orgpulse::{Config, database};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::load()?;
    tracing::info!(organization = %config.organization.id, "starting orgpulse");

    let question: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        eprintln!("usage: orgpulse <question>");
        return Ok(());
    }

    let pool = database::connect(&config.database).await?;
    let store = Arc::new(PgStore::new(pool));
    let directory = Arc::new(DirectoryService::new(
        store,
        config.organization.id,
        config.cache.ttl_seconds,
    ));

    let provider = Arc::new(OpenAiProvider::new(&config.llm));
    let settings = AssistantSettings {
        model: config.llm.model.clone(),
        ..Default::default()
    };

    let assistant = HrAssistant::new(directory, provider, settings);
    let reply = assistant.answer(&question).await;
    println!("{}", reply);

    Ok(())
}
