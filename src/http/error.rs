//! Classification of HTTP failures into user-facing errors.

use reqwest::StatusCode;

/// An HTTP response that did not deliver the asset.
#[derive(Debug)]
pub enum FetchError {
    /// HTTP 404
    NotFound(String),
    /// HTTP 401 / 403
    Forbidden(String),
    /// Other 4xx status
    ClientError(u16),
    /// 5xx status
    ServerError(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound(url) => {
                write!(f, "Not found: {}", url)
            }
            FetchError::Forbidden(url) => {
                write!(f, "Access forbidden: {}", url)
            }
            FetchError::ClientError(status) => {
                write!(f, "Request error: HTTP {}", status)
            }
            FetchError::ServerError(status) => {
                write!(f, "Server error: HTTP {}", status)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Classifies an error returned by `error_for_status()`.
/// Errors without a status (connection, TLS, redirect loops) are passed through unchanged.
pub fn classify_error(error: reqwest::Error) -> anyhow::Error {
    let url = error
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "(unknown url)".to_string());

    match error.status() {
        Some(StatusCode::NOT_FOUND) => FetchError::NotFound(url).into(),
        Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => {
            FetchError::Forbidden(url).into()
        }
        Some(s) if s.is_client_error() => FetchError::ClientError(s.as_u16()).into(),
        Some(s) if s.is_server_error() => FetchError::ServerError(s.as_u16()).into(),
        _ => anyhow::Error::from(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::NotFound("https://example.com/a".to_string());
        assert_eq!(err.to_string(), "Not found: https://example.com/a");

        let err = FetchError::Forbidden("https://example.com/a".to_string());
        assert!(err.to_string().contains("forbidden"));

        let err = FetchError::ClientError(400);
        assert!(err.to_string().contains("HTTP 400"));

        let err = FetchError::ServerError(502);
        assert!(err.to_string().contains("Server error"));
        assert!(err.to_string().contains("502"));
    }

    async fn classify_status(status: usize) -> anyhow::Error {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/asset")
            .with_status(status)
            .create_async()
            .await;

        let response = Client::new()
            .get(format!("{}/asset", server.url()))
            .send()
            .await
            .unwrap();
        classify_error(response.error_for_status().unwrap_err())
    }

    #[tokio::test]
    async fn test_classify_not_found() {
        let err = classify_status(404).await;
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::NotFound(url)) if url.ends_with("/asset")
        ));
    }

    #[tokio::test]
    async fn test_classify_forbidden() {
        let err = classify_status(403).await;
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Forbidden(_))
        ));

        let err = classify_status(401).await;
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_client_and_server_errors() {
        let err = classify_status(410).await;
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::ClientError(410))
        ));

        let err = classify_status(503).await;
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::ServerError(503))
        ));
    }
}
