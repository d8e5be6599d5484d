// Portal API HTTP client.
// Handles bearer authentication and request/response processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{CourtageError, Result};

const API_URL_VAR: &str = "COURTAGE_API_URL";
const API_TOKEN_VAR: &str = "COURTAGE_API_TOKEN";

/// Portal API client with bearer authentication.
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    /// Create a new client for the given API base URL and token.
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| CourtageError::Other(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("courtage-client"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CourtageError::Api)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client from the COURTAGE_API_URL and COURTAGE_API_TOKEN
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_VAR)
            .map_err(|_| CourtageError::Other(format!("missing {API_URL_VAR}")))?;
        let token = std::env::var(API_TOKEN_VAR).map_err(|_| CourtageError::MissingToken)?;
        Self::new(base_url, &token)
    }

    /// Make a GET request to the portal API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CourtageError::Api)?;

        self.check_response(response).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(CourtageError::Api)?;

        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CourtageError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(CourtageError::NotFound(url))
            }
            status => Err(CourtageError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
