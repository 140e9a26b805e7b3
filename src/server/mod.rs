//! HTTP server implementation
//!
//! This module provides the HTTP server, the request gates and the route table.

pub mod middleware;
pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;
mod utils;


pub use server::HttpServer;
pub use state::AppState;
