use std::sync::Arc;

use arbre::config::AppConfig;
use arbre::db;
use arbre::flow::account_api::{AccountApi, HttpAccountApi, LocalAccountApi};
use arbre::routes;
use arbre::state::AppState;
use arbre::store::{AccountStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");

    let store: Arc<dyn AccountStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts and sessions are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let accounts: Arc<dyn AccountApi> = match config.account_api_url.as_deref() {
        Some(endpoint) => {
            tracing::info!(%endpoint, "using remote account endpoint");
            Arc::new(HttpAccountApi::new(endpoint).expect("account api client init failed"))
        }
        None => Arc::new(LocalAccountApi::new(Arc::clone(&store))),
    };

    let port = config.port;
    let state = AppState::new(store, accounts, &config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "arbre listening");
    axum::serve(listener, app).await.expect("server failed");
}
