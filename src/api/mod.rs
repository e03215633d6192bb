use async_trait::async_trait;

use crate::error::Result;
use crate::models::DateRange;

pub mod treasury_client;
pub use treasury_client::TreasuryClient;

/// Records requested per window; never adapted to the response
pub const PAGE_SIZE: usize = 100;

/// Raw outcome of one window request
#[derive(Debug, Clone, PartialEq)]
pub struct WindowResponse {
    pub status: u16,
    pub body: String,
}

impl WindowResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Source of debt_to_penny CSV pages
///
/// A non-200 status is returned as a value, not an error; only transport
/// failures come back as `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DebtDataProvider: Send + Sync {
    async fn fetch_window(&self, window: &DateRange) -> Result<WindowResponse>;
}
