//! The HTTP-like boundary the client drives.

use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// Raw outcome of one transport exchange: the status code plus whatever
/// body could be parsed (`Null` when there is none).
#[derive(Clone, Debug)]
pub struct WireResponse {
    pub status: u16,
    pub body: Value,
}

impl WireResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level non-response: the request never produced a status code.
///
/// Kept distinct from application-level rejections, which always carry one.
#[derive(Clone, Debug, Error)]
#[error("{reason}")]
pub struct TransportError {
    pub reason: String,
}

/// Request/response interface against a base resource location.
///
/// Implemented over reqwest for production and by an in-memory stub in the
/// writer tests.
pub trait Transport {
    fn send(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&Value>,
    ) -> impl Future<Output = Result<WireResponse, TransportError>>;
}

/// [`Transport`] over a reqwest client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&Value>,
    ) -> Result<WireResponse, TransportError> {
        let url = self.url(path);
        let mut request = match verb {
            Verb::Get => self.http.get(&url),
            Verb::Post => self.http.post(&url),
            Verb::Put => self.http.put(&url),
            Verb::Delete => self.http.delete(&url),
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| TransportError {
            reason: err.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok(WireResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path_without_doubling_slashes() {
        let transport = HttpTransport::new(reqwest::Client::new(), "http://localhost:5172/api/");
        assert_eq!(
            transport.url("/pessoas"),
            "http://localhost:5172/api/pessoas"
        );
        assert_eq!(
            transport.url("pessoas/3"),
            "http://localhost:5172/api/pessoas/3"
        );
    }

    #[test]
    fn statuses_outside_2xx_are_not_success() {
        for status in [199, 300, 400, 500] {
            let response = WireResponse {
                status,
                body: Value::Null,
            };
            assert!(!response.is_success());
        }
        for status in [200, 201, 204] {
            let response = WireResponse {
                status,
                body: Value::Null,
            };
            assert!(response.is_success());
        }
    }
}
