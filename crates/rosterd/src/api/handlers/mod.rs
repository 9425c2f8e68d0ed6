//! API request handlers.

mod auth;
mod employees;
mod misc;

pub use auth::{MessageResponse, UsernameResponse, login, logout, me, register};
pub use employees::{
    create_employee, delete_employee, get_employee, list_employees, update_employee,
};
pub use misc::health;
