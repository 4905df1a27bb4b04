//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use mockable::DefaultClock;
use std::num::NonZeroU32;
use std::sync::{Arc, OnceLock};
use taskboard::adapters::postgres::{PgPool, PostgresBackend, apply_schema, connect};
use taskboard::config::StorageConfig;
use taskboard::ports::StoragePorts;
use taskboard::services::KanbanServices;
use tokio::sync::{Mutex, MutexGuard};

/// Variable naming the database the integration tests may reset.
pub const TEST_DATABASE_URL_VAR: &str = "TASKBOARD_TEST_DATABASE_URL";

const RESET_SQL: &str = "TRUNCATE comments, tasks, columns, boards RESTART IDENTITY CASCADE";

static DATABASE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Services and ports over a freshly reset database.
pub struct PostgresHarness {
    pub ports: StoragePorts<PostgresBackend>,
    pub services: KanbanServices<PostgresBackend, DefaultClock>,
    _guard: MutexGuard<'static, ()>,
}

/// Connects to the test database, applies the schema and empties every
/// table.
///
/// Returns `None` when no test database is configured.
///
/// # Errors
///
/// Returns an error if the pool, schema or reset fails.
pub async fn postgres_harness() -> eyre::Result<Option<PostgresHarness>> {
    let Some(url) = std::env::var(TEST_DATABASE_URL_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        return Ok(None);
    };

    let guard = DATABASE_LOCK.get_or_init(|| Mutex::new(())).lock().await;
    let pool_size = NonZeroU32::new(4).ok_or_else(|| eyre::eyre!("pool size must be non-zero"))?;
    let pool = connect(&StorageConfig::new(url).with_pool_size(pool_size))?;
    apply_schema(&pool).await?;
    reset(&pool).await?;

    let ports = PostgresBackend::ports(&pool);
    let services = KanbanServices::new(&ports, &Arc::new(DefaultClock));
    Ok(Some(PostgresHarness {
        ports,
        services,
        _guard: guard,
    }))
}

async fn reset(pool: &PgPool) -> eyre::Result<()> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || -> eyre::Result<()> {
        let mut connection = shared.get()?;
        connection.batch_execute(RESET_SQL)?;
        Ok(())
    })
    .await?
}
