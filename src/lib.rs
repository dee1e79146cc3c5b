//! Canvas Relay
//!
//! Credential-holding relay in front of the Printify REST API, plus the
//! client-side workflow that turns one piece of artwork into a stretched
//! canvas product in a merchant's shop.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod providers;
pub mod workflow;

use crate::config::Settings;
use crate::providers::PrintifyClient;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Settings,
    pub printify: PrintifyClient,
}
