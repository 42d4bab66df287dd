//! gitstandup-mcp library
//!
//! This module exports the core functionality of gitstandup-mcp for use in
//! integration tests and as a library.

pub mod cli;
pub mod collect;
pub mod config;
pub mod handlers;
pub mod server;
pub mod store;
