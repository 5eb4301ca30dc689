pub mod store;

use std::time::Duration;

use anyhow::{anyhow, Context};
use diesel::{connection::SimpleConnection, r2d2::ConnectionManager, SqliteConnection};
use r2d2::{CustomizeConnection, PooledConnection};

pub use self::store::{AppointmentStore, DieselStore};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const IN_MEMORY_URL: &str = ":memory:";

embed_migrations!("migrations");

/// Pragmas applied to every connection the pool opens.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Each `:memory:` connection is its own database, so such pools hold exactly
/// one connection regardless of `max_size`.
pub fn build_pool(database_url: &str, max_size: u32, timeout: Duration) -> anyhow::Result<DbPool> {
    let max_size = if database_url == IN_MEMORY_URL && max_size > 1 {
        tracing::warn!(max_size, "in-memory database limits the pool to one connection");
        1
    } else {
        max_size
    };

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(timeout)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: timeout,
        }))
        .build(manager)
        .context("Failed to create pool")
}

pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    let conn = get_db_conn(pool)?;
    embedded_migrations::run(&*conn).map_err(|err| anyhow!("Failed to run migrations: {}", err))
}

pub fn get_db_conn(pool: &DbPool) -> anyhow::Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
    pool.get().context("DB connection")
}

/// A single-connection pool over a private in-memory database, migrated and
/// ready for use.
#[cfg(test)]
pub fn in_memory_pool() -> DbPool {
    let pool = build_pool(IN_MEMORY_URL, 1, Duration::from_secs(5)).expect("in-memory pool");
    run_migrations(&pool).expect("migrations");
    pool
}
