pub mod api;
pub mod app;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod summarizer;
pub mod utils;

pub use error::{DebtTrackerError, Result};
