// Environment-driven configuration with sensible defaults.
//
// Every knob of the tick pipeline from the original deployment surface
// is exposed: buffer bound, consumer sleeps, batch threshold and size,
// and the health-probe interval.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::modules::ticks::consumer::ConsumerConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub database_url: String,
    pub max_buffer_size: usize,
    pub probe_interval: Duration,
    pub consumer: ConsumerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            http_addr: parse_or(&lookup, "TIMER_HTTP_ADDR", "0.0.0.0:8080".parse().unwrap())?,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:./timer.db".into()),
            max_buffer_size: parse_or(&lookup, "TIMER_QUEUE_MAX_BUFFER_SIZE", 10_000)?,
            probe_interval: Duration::from_secs(parse_or(
                &lookup,
                "TIMER_DB_PROBE_INTERVAL_SECS",
                5,
            )?),
            consumer: ConsumerConfig {
                empty_queue_sleep: Duration::from_millis(parse_or(
                    &lookup,
                    "TIMER_CONSUMER_EMPTY_QUEUE_SLEEP_MS",
                    200,
                )?),
                db_unavailable_sleep: Duration::from_millis(parse_or(
                    &lookup,
                    "TIMER_CONSUMER_DB_UNAVAILABLE_SLEEP_MS",
                    2_000,
                )?),
                batch_threshold: parse_or(&lookup, "TIMER_CONSUMER_BATCH_THRESHOLD", 10)?,
                max_batch_size: parse_or(&lookup, "TIMER_CONSUMER_MAX_BATCH_SIZE", 500)?,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw}")),
        None => Ok(default),
    }
}
