use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use timer::modules::ticks::adapters::outbound::tick_store_sqlite::SqliteTickStore;
use timer::modules::ticks::consumer::TickConsumer;
use timer::modules::timers::adapters::outbound::store_sqlite::SqliteTimerStore;
use timer::shared::infrastructure::store::create_pool;
use timer::shell::config::AppConfig;
use timer::shell::http::router;
use timer::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let timer_store = Arc::new(SqliteTimerStore::new(pool.clone()));
    timer_store.migrate().await?;
    let tick_store = Arc::new(SqliteTickStore::new(pool));
    tick_store.migrate().await?;

    let state = AppState::new(
        timer_store,
        tick_store.clone(),
        tick_store,
        config.max_buffer_size,
        config.probe_interval,
    );

    let consumer = Arc::new(TickConsumer::new(
        state.tick_queue.clone(),
        state.tick_service.clone(),
        state.health.clone(),
        config.consumer.clone(),
    ));
    let worker = tokio::spawn(consumer.run());

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    tracing::info!(addr = %config.http_addr, "timer service listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker.abort();
    tracing::info!("timer service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
