//! Meal planner clients
//!
//! Two implementations of [`MealPlanner`]:
//! - [`LocalSession`] keeps records in memory for the lifetime of the process
//! - [`RemoteClient`] talks to a running meal planner service over HTTP
//!
//! [`FormSession`] drives either of them from a line oriented terminal form.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::MealDay;

pub mod form;
pub mod local;
pub mod remote;

pub use form::FormSession;
pub use local::LocalSession;
pub use remote::RemoteClient;

/// Default service address used by API mode
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Non-success response; status and body are kept verbatim
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to call the API: {0}")]
    Transport(String),

    #[error("Failed to render meals: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Where a client keeps its records
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClientMode {
    Local,
    Api,
}

#[async_trait]
pub trait MealPlanner: Send + Sync {
    fn mode(&self) -> ClientMode;

    /// Store `day`, returning a confirmation line for the user
    async fn save(&mut self, day: &MealDay) -> ClientResult<String>;

    /// Look up a day; `None` when nothing is stored
    async fn view(&self, date: &str) -> ClientResult<Option<MealDay>>;
}

/// Build the planner selected by `mode`
pub fn planner(mode: ClientMode, api_url: &str) -> ClientResult<Box<dyn MealPlanner>> {
    Ok(match mode {
        ClientMode::Local => Box::new(LocalSession::new()),
        ClientMode::Api => Box::new(RemoteClient::new(api_url)?),
    })
}
