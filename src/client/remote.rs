//! HTTP client backend

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use super::{ClientError, ClientMode, ClientResult, MealPlanner};
use crate::models::MealDay;

/// Upper bound for each request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn api_error(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => ClientError::Api { status, body },
            Err(e) => e.into(),
        }
    }
}

#[async_trait]
impl MealPlanner for RemoteClient {
    fn mode(&self) -> ClientMode {
        ClientMode::Api
    }

    async fn save(&mut self, day: &MealDay) -> ClientResult<String> {
        let url = format!("{}/meals", self.base_url);
        debug!(url = %url, date = %day.date, "Posting meals");

        let response = self.client.post(&url).json(day).send().await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(format!("Saved to the API for {}", day.date))
    }

    async fn view(&self, date: &str) -> ClientResult<Option<MealDay>> {
        let url = format!("{}/meals/{}", self.base_url, date);
        debug!(url = %url, "Fetching meals");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(Self::api_error(response).await),
        }
    }
}
