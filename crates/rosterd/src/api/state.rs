//! Application state shared across handlers.

use crate::account::AccountService;
use crate::auth::AuthState;
use crate::employee::EmployeeService;
use crate::uploads::ImageStore;

/// Application state shared across handlers.
///
/// Built once at startup, never mutated afterwards; requests only read it.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub accounts: AccountService,
    pub employees: EmployeeService,
    pub images: ImageStore,
}
