//! Typed HTTP client for the point-of-sale API
//!
//! Mirrors each repository's contract over HTTP. Error responses are
//! decoded from their `{ "error": message }` body.
//!
//! ```rust,ignore
//! let client = PetalClient::new("http://localhost:3000");
//! let items = client.items().list().await?;
//! let po = client.purchase_orders().create(&NewPurchaseOrder { .. }).await?;
//! ```

mod resources;

pub use resources::{ItemsClient, OrdersClient, PurchaseOrdersClient, UsersClient};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Error from API calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response not decoded
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// Status code of an API error, if the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Entry point of the client data-access layer
#[derive(Debug, Clone)]
pub struct PetalClient {
    http: Client,
    base_url: String,
}

impl PetalClient {
    /// Create a client for a server root such as `http://localhost:3000`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn items(&self) -> ItemsClient<'_> {
        ItemsClient::new(self)
    }

    pub fn orders(&self) -> OrdersClient<'_> {
        OrdersClient::new(self)
    }

    pub fn purchase_orders(&self) -> PurchaseOrdersClient<'_> {
        PurchaseOrdersClient::new(self)
    }

    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        check(request.send().await?).await?;
        Ok(())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            }
        });

    tracing::debug!(%status, %message, "api error");
    Err(ClientError::Api { status, message })
}
