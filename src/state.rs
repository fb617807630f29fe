use crate::db::{DbPool, OrmConn};

/// Shared handles. The sqlx pool backs the raw-SQL read paths, the SeaORM
/// connection carries entity queries and transactions.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn) -> Self {
        Self { pool, orm }
    }
}
