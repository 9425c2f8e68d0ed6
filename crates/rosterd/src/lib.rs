//! Employee Directory Backend Library
//!
//! Core components for the employee directory API: cookie-based session
//! authentication, account and employee storage, image uploads, and the
//! HTTP surface.

pub mod account;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod employee;
pub mod uploads;
