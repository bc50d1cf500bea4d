//! Byte-for-byte relay of a streaming upstream response.

use axum::{
    body::{Body, Bytes},
    http::{header, StatusCode},
    response::Response,
};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Chunks buffered between the upstream reader and the caller's body.
const RELAY_BUFFER: usize = 16;

/// Wrap an upstream body in a `text/event-stream` response.
///
/// A spawned task pulls chunks from `upstream` and pushes them to the caller
/// in arrival order. When the caller goes away the next send fails, the task
/// stops, and dropping `upstream` closes the upstream connection. An upstream
/// error is logged and forwarded, which aborts the caller's body.
pub fn relay<S, E>(upstream: S) -> Response
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel::<Result<Bytes, std::io::Error>>(RELAY_BUFFER);

    tokio::spawn(async move {
        futures::pin_mut!(upstream);
        let mut chunks = 0usize;
        let mut bytes = 0usize;

        while let Some(chunk) = upstream.next().await {
            match chunk {
                Ok(data) => {
                    chunks += 1;
                    bytes += data.len();
                    if tx.send(Ok(data)).await.is_err() {
                        tracing::info!(chunks, bytes, "Caller disconnected, dropping upstream stream");
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, chunks, bytes, "Upstream stream failed");
                    let _ = tx.send(Err(std::io::Error::other(e))).await;
                    return;
                }
            }
        }

        tracing::debug!(chunks, bytes, "Upstream stream complete");
    });

    let mut response = Response::new(Body::from_stream(ReceiverStream::new(rx)));
    *response.status_mut() = StatusCode::OK;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/event-stream"),
    );
    response
}
