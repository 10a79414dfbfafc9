//! Authenticated request plumbing shared by Library, Collection, and Item.

use crate::error::Error;
use crate::http::{HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub(crate) const API_KEY_HEADER: &str = "Zotero-API-Key";
pub(crate) const VERSION_HEADER: &str = "If-Unmodified-Since-Version";

/// Connection context handed to every wrapper that syncs itself: credential,
/// library base URL, and the shared transport.
#[derive(Clone)]
pub(crate) struct ApiContext {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl ApiContext {
    /// Send one authenticated request and require a 2xx answer.
    ///
    /// `operation` names the call for error messages ("update item ABCD2345").
    /// The content-type header is attached only when a body is present.
    pub(crate) async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        extra_headers: &[(&str, String)],
        operation: &str,
    ) -> Result<HttpResponse, Error> {
        let mut headers = vec![(API_KEY_HEADER.to_string(), self.api_key.clone())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        for (name, value) in extra_headers {
            headers.push((name.to_string(), value.clone()));
        }

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = method.as_str(), %url, "zotero api request");

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        if !response.is_success() {
            return Err(Error::Remote {
                operation: operation.to_string(),
                status: response.status,
                status_text: response.status_text.clone(),
            });
        }

        Ok(response)
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| {
        Error::Http(HttpError::ParseError {
            message: e.to_string(),
        })
    })
}

pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, Error> {
    serde_json::from_str(&response.body).map_err(|e| {
        Error::Http(HttpError::ParseError {
            message: e.to_string(),
        })
    })
}
