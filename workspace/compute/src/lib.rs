//! Pure farm-domain computations: no database, no I/O.
//!
//! The server fetches rows, converts them into the transport types from
//! `common` and hands them to the functions here.

pub mod chatbot;
pub mod error;
pub mod market_prices;
pub mod summary;

pub use error::{ComputeError, Result};
