use sqlx::PgPool;

use crate::config::Config;

/// Shared application state, constructed once in `main` and injected into
/// every handler. The pool is the only handle to the record store; there is
/// no process-wide client.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self { pool, config }
    }
}
