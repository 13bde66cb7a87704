use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use users_api::{
    app::user::{PgUserStore, UserService},
    build_app,
    config::Settings,
    infrastructure::{database::DatabaseManager, logger::Logger},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 先加载 .env，其中的 RUST_LOG 也会生效
    dotenvy::dotenv().ok();
    Logger::init();

    let settings = Settings::from_env().map_err(|e| {
        error!("Failed to load settings: {}", e);
        e
    })?;

    let database = DatabaseManager::new(&settings.database)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            e
        })?;

    let store = Arc::new(PgUserStore::new(database.get_pool().clone()));
    let state = AppState::new(UserService::new(store));
    let app = build_app(state, settings.http.request_timeout());

    let listener = TcpListener::bind(settings.http.bind_address()).await?;
    info!("User service listening on http://{}", listener.local_addr()?);
    info!("   GET    /users   - List users");
    info!("   POST   /users   - Create user");
    info!("   GET    /health  - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.get_pool().close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
