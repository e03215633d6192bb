use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::models::{Config, DateRange};
use super::{DebtDataProvider, WindowResponse, PAGE_SIZE};

/// Fiscal Data API client for the debt_to_penny dataset
pub struct TreasuryClient {
    client: Client,
    base_url: Url,
}

impl TreasuryClient {
    /// Create a new Treasury client
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent("debt-tracker/0.1");
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Request URL for one window: CSV format, inclusive date filter, fixed page size
    ///
    /// The query is form-encoded (`page%5Bsize%5D`, `record_date%3Agte%3A...`);
    /// the API decodes it to the same parameters as the unencoded form.
    pub fn window_url(&self, window: &DateRange) -> Url {
        let filter = format!(
            "record_date:gte:{},record_date:lte:{}",
            window.start_date.format("%Y-%m-%d"),
            window.end_date.format("%Y-%m-%d")
        );

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "csv")
            .append_pair("filter", &filter)
            .append_pair("page[size]", &PAGE_SIZE.to_string());
        url
    }
}

#[async_trait]
impl DebtDataProvider for TreasuryClient {
    async fn fetch_window(&self, window: &DateRange) -> Result<WindowResponse> {
        let url = self.window_url(window);
        debug!("Making request to: {}", url);

        let response = self.client
            .get(url)
            .header(ACCEPT, "text/csv")
            .send()
            .await?;

        let status = response.status();
        let body = if status == StatusCode::OK {
            response.text().await?
        } else {
            String::new()
        };

        debug!("Response {} with {} bytes", status, body.len());
        Ok(WindowResponse {
            status: status.as_u16(),
            body,
        })
    }
}
