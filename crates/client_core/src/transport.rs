//! Outbound calls to the classification backend with uniform error translation.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use shared::{domain::AssetKind, protocol::AssetRequest};
use tracing::{debug, warn};
use url::Url;

use crate::error::NetworkError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    Feedback,
    Label,
    Asset(AssetRequest),
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Feedback => "feedback",
            Self::Label => "label",
            Self::Asset(_) => "asset",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Analyze | Self::Feedback | Self::Label => Method::POST,
            Self::Asset(_) => Method::GET,
        }
    }

    /// Feedback and label calls succeed on any 2xx; their body is never read.
    pub fn reads_body(&self) -> bool {
        matches!(self, Self::Analyze | Self::Asset(_))
    }

    fn path_segments(&self) -> Vec<&str> {
        match self {
            Self::Analyze => vec!["predict"],
            Self::Feedback => vec!["feedback"],
            Self::Label => vec!["diagnostic"],
            Self::Asset(request) => match request.kind {
                AssetKind::Image => vec!["visualizations", request.name.as_str()],
                AssetKind::Log => vec!["logs", request.name.as_str()],
            },
        }
    }
}

#[async_trait]
pub trait RequestGateway: Send + Sync {
    /// Issues one request. Any transport failure or non-2xx status is an error;
    /// an empty or unread success body is returned as `Value::Null`.
    async fn send(&self, endpoint: &Endpoint, payload: Option<Value>) -> Result<Value, NetworkError>;
}

pub struct HttpGateway {
    http: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| NetworkError::InvalidUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl {
                url: base_url.to_string(),
                message: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    /// Appends the endpoint's path to the base url; asset names are encoded as
    /// one segment so they cannot escape their route.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url, NetworkError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| NetworkError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "url cannot carry a path".to_string(),
            })?;
            segments.pop_if_empty();
            segments.extend(endpoint.path_segments());
        }
        Ok(url)
    }
}

#[async_trait]
impl RequestGateway for HttpGateway {
    async fn send(&self, endpoint: &Endpoint, payload: Option<Value>) -> Result<Value, NetworkError> {
        let name = endpoint.name();
        let url = self.endpoint_url(endpoint)?;
        debug!(endpoint = name, %url, "sending backend request");

        let mut request = self.http.request(endpoint.method(), url);
        if let Some(body) = &payload {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            warn!(endpoint = name, "backend request failed: {err}");
            NetworkError::Transport {
                endpoint: name,
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = name, status = status.as_u16(), "backend returned error status");
            return Err(NetworkError::Status {
                endpoint: name,
                status: status.as_u16(),
            });
        }

        if !endpoint.reads_body() {
            debug!(endpoint = name, status = status.as_u16(), "backend accepted request");
            return Ok(Value::Null);
        }

        let body = response.bytes().await.map_err(|err| NetworkError::Transport {
            endpoint: name,
            message: err.to_string(),
        })?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|err| NetworkError::Decode {
            endpoint: name,
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
