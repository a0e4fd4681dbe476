use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vacancy_portal::{
    config::Config,
    database::{
        pool::{create_pool, run_migrations},
        MemoryStore, PgStore, Store,
    },
    routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = if config.uses_memory_store() {
        tracing::warn!("DATABASE_URL=memory: data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let pool = create_pool(&config).await?;
        run_migrations(&pool).await?;
        Arc::new(PgStore::new(pool))
    };

    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    info!("Serving uploads from: {}", config.uploads_dir.display());

    let addr: SocketAddr = config.server_address.parse()?;
    let admin = config.admin.clone();
    let app_state = AppState::new(config, store);

    if let Some(admin) = admin {
        app_state
            .auth_service
            .ensure_admin(&admin.name, &admin.email, &admin.password)
            .await?;
    }

    let app = routes::router(app_state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
