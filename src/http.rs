//! Shared HTTP client factory.
//!
//! One client is built at startup and reused for every upstream call so the
//! connection pool is shared across requests.

use reqwest::Client;
use std::time::Duration;

/// Create a new HTTP client with no request timeout.
pub fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder().build()
}

/// Create a new HTTP client that bounds each request.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_client_returns_valid_client() {
        let client = create_client().unwrap();
        assert!(std::mem::size_of_val(&client) > 0);
    }

    #[test]
    fn create_client_with_timeout_accepts_a_bound() {
        assert!(create_client_with_timeout(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn timeout_aborts_a_hung_upstream() {
        // Accepts the connection but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hold = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = create_client_with_timeout(Duration::from_millis(100)).unwrap();
        let err = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        hold.abort();
    }
}
