use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cn_semantics_backend::{api, config, db, source::SqliteSource, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cn_semantics_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);
    tracing::info!("Build time: {}", env!("BUILD_TIME"));

    // Create data directory if not exists / 创建数据目录
    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.get_database_url());

    let source = SqliteSource::connect(
        &database_url,
        app_config.database.max_connections,
        &app_config.database.table,
        app_config.query_timeout(),
    )
    .await?;

    db::run_migrations(source.pool(), source.table()).await?;

    let state = Arc::new(AppState::new(Arc::new(source), app_config.search_options()));
    let app = api::router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);
    tracing::info!("API endpoints: GET /, /search_by_word, /search_by_level, /health");

    axum::serve(listener, app).await?;

    Ok(())
}
