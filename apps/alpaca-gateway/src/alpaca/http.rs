//! Authenticated HTTP plumbing shared by both backend handles.
//!
//! Every request is a single attempt: the gateway makes exactly one round
//! trip per operation and surfaces failures to the dispatch layer instead
//! of retrying.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::ApiErrorResponse;
use super::environment::Credentials;
use super::error::AlpacaError;

/// Thin authenticated client over one backend service's base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl ApiClient {
    /// Build a client for one backend service.
    ///
    /// Construction is cheap and performs no network I/O.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed` if either credential part is empty,
    /// `Network` if the underlying HTTP client cannot be built.
    pub fn new(
        credentials: &Credentials,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, AlpacaError> {
        if !credentials.is_complete() {
            return Err(AlpacaError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AlpacaError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: credentials.api_key().to_string(),
            api_secret: credentials.api_secret().to_string(),
        })
    }

    /// Make a GET request, `path` may carry a query string.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlpacaError> {
        self.execute(self.client.get(self.url(path))).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AlpacaError> {
        self.execute(self.client.post(self.url(path)).json(body))
            .await
    }

    /// Make a DELETE request, decoding the response body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlpacaError> {
        self.execute(self.client.delete(self.url(path))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AlpacaError> {
        let response = request
            .header("APCA-API-KEY-ID", &self.api_key)
            .header("APCA-API-SECRET-KEY", &self.api_secret)
            .send()
            .await
            .map_err(|e| AlpacaError::Network(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| AlpacaError::Network(e.to_string()))?;
            // Some endpoints (e.g. close-all with nothing open) return an
            // empty body on success.
            let text = if text.is_empty() { "null" } else { &text };
            return serde_json::from_str(text).map_err(|e| AlpacaError::JsonParse(e.to_string()));
        }

        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();
        Err(error_from_status(status, retry_after, &body))
    }
}

/// Map a non-2xx response onto an `AlpacaError`.
fn error_from_status(status: StatusCode, retry_after: Option<u64>, body: &str) -> AlpacaError {
    let (code, message) = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(error) => (
            error
                .code
                .map_or_else(|| status.as_u16().to_string(), |c| c.to_string()),
            error.message,
        ),
        Err(_) if body.is_empty() => (status.as_u16().to_string(), status.to_string()),
        Err(_) => (status.as_u16().to_string(), body.to_string()),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AlpacaError::AuthenticationFailed,
        StatusCode::NOT_FOUND => AlpacaError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => AlpacaError::Rejected(message),
        StatusCode::TOO_MANY_REQUESTS => AlpacaError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(60),
        },
        _ => AlpacaError::Api { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_empty_credentials() {
        let creds = Credentials::new(String::new(), "secret".to_string());
        let result = ApiClient::new(
            &creds,
            "https://paper-api.alpaca.markets".to_string(),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(AlpacaError::AuthenticationFailed)));
    }

    #[test]
    fn unauthorized_maps_to_authentication_failed() {
        let err = error_from_status(StatusCode::UNAUTHORIZED, None, "");
        assert!(matches!(err, AlpacaError::AuthenticationFailed));
        let err = error_from_status(StatusCode::FORBIDDEN, None, "");
        assert!(matches!(err, AlpacaError::AuthenticationFailed));
    }

    #[test]
    fn unprocessable_maps_to_rejected_with_message() {
        let body = r#"{"code":40310000,"message":"insufficient buying power"}"#;
        let err = error_from_status(StatusCode::UNPROCESSABLE_ENTITY, None, body);
        match err {
            AlpacaError::Rejected(message) => assert_eq!(message, "insufficient buying power"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rate_limited_uses_retry_after_header() {
        let err = error_from_status(StatusCode::TOO_MANY_REQUESTS, Some(17), "");
        assert!(matches!(
            err,
            AlpacaError::RateLimited {
                retry_after_secs: 17
            }
        ));
    }

    #[test]
    fn other_statuses_map_to_api_error() {
        let body = r#"{"code":50010000,"message":"internal server error"}"#;
        let err = error_from_status(StatusCode::INTERNAL_SERVER_ERROR, None, body);
        match err {
            AlpacaError::Api { code, message } => {
                assert_eq!(code, "50010000");
                assert_eq!(message, "internal server error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_falls_back_to_raw_text() {
        let err = error_from_status(StatusCode::BAD_GATEWAY, None, "upstream unavailable");
        match err {
            AlpacaError::Api { code, message } => {
                assert_eq!(code, "502");
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
