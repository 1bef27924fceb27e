pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod middleware;
pub mod router;
pub mod schemas;

mod tests;
