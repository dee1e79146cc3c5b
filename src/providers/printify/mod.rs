//! Printify Provider Module
//!
//! Credential-injecting client for the Printify API plus the wire models
//! and response reshaping the relay needs.
//!
//! API Documentation: https://developers.printify.com/

mod client;
pub mod models;
mod mapper;

pub use client::{PrintifyClient, UpstreamBody};
pub use mapper::PrintifyMapper;
