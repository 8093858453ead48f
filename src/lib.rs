// Library exports for Backstage
// This allows integration tests to drive the page controllers and router

pub mod api;
pub mod config;
pub mod error;
pub mod messages;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;
