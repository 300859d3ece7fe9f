use dotenvy::dotenv;
use stockroom::{
    config,
    console::Console,
    core::InventoryEngine,
    errors::Result,
    store::{SqliteStore, StateStore},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Settings file (optional) plus environment overrides
    let settings = config::settings::load_default_settings()?;
    let database_url = settings.resolve_database_url();

    // 4. Open the database and make sure the tables exist
    let db = config::database::create_connection(&database_url).await?;
    config::database::create_tables(&db).await?;
    info!("database ready");

    // 5. Load the full state once; a failed read degrades to a fresh start
    let store = SqliteStore::new(db);
    let state = store.load().await;
    info!(
        products = state.products.len(),
        transactions = state.transactions.len(),
        "state loaded"
    );

    // 6. Run the menu until the operator quits
    let engine = InventoryEngine::new(state);
    let mut console = Console::new(engine, store, settings.history_limit());
    console.run().await
}
