//! Shared fixtures for service tests.

use crate::AppCore;
use std::sync::Arc;
use tempfile::TempDir;
use verdant_models::User;

pub(crate) async fn test_core() -> (TempDir, Arc<AppCore>) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let core = Arc::new(AppCore::new(db_path.to_str().unwrap()).await.unwrap());
    (temp_dir, core)
}

pub(crate) fn seed_user(core: &Arc<AppCore>, name: &str) -> User {
    let user = User::new(
        name.to_string(),
        format!("{}@example.com", name.to_lowercase()),
    );
    core.storage.users.put(&user).unwrap();
    user
}
