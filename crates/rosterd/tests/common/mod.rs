//! Test utilities and common setup.

use axum::Router;
use rosterd::account::{AccountRepository, AccountService};
use rosterd::api::{AppState, create_router};
use rosterd::auth::{AuthConfig, AuthState};
use rosterd::db::Database;
use rosterd::employee::{EmployeeRepository, EmployeeService};
use rosterd::uploads::ImageStore;

/// Signing secret shared by all integration tests.
pub const TEST_SECRET: &str = "test-secret-for-integration-tests-minimum-32-chars";

/// Create a test AuthConfig with a JWT secret for testing.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: Some(TEST_SECRET.to_string()),
        production_mode: false,
        allowed_origins: Vec::new(),
    }
}

/// Create a test application with all services initialized.
pub async fn test_app() -> Router {
    test_context().await.0
}

/// Create a test application plus its state and database for direct access.
pub async fn test_context() -> (Router, AppState, Database) {
    test_context_with_auth(test_auth_config()).await
}

/// Create a test application with a custom auth configuration.
pub async fn test_context_with_auth(auth_config: AuthConfig) -> (Router, AppState, Database) {
    let database = Database::in_memory()
        .await
        .expect("create in-memory database");

    let uploads_dir = tempfile::tempdir()
        .expect("create uploads dir")
        .into_path();

    let state = AppState {
        auth: AuthState::new(auth_config).expect("create auth state"),
        accounts: AccountService::new(AccountRepository::new(database.pool().clone())),
        employees: EmployeeService::new(EmployeeRepository::new(database.pool().clone())),
        images: ImageStore::new(uploads_dir),
    };

    (create_router(state.clone()), state, database)
}
