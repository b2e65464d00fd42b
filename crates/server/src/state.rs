use sea_orm::DatabaseConnection;

/// Shared by every request. The connection is a pool handle, so cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
