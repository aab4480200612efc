mod route;

use quill::config::db::DB;
use quill::config::AppConfig;
use quill::AppState;
use std::sync::Arc;

// An in-memory SQLite database is scoped to its connection, so the pool is
// capped at one connection to keep every query in a test on the same database.
pub async fn test_state() -> AppState {
    let db = DB::new("sqlite::memory:", 1).await.unwrap();
    db.migrate().await.unwrap();

    AppState {
        config: Arc::new(AppConfig::from_env()),
        db: Arc::new(db),
    }
}
