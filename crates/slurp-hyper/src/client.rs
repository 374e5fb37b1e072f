//! Minimal HTTP/1.1 client plumbing.
//!
//! One connection, one request. Anything beyond that (pooling, TLS,
//! redirects, retries) belongs to a full client stack, not here.

use bytes::Bytes;
use http_body_util::Empty;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpStream;
use tracing::debug;

use crate::IncomingResponse;

/// Errors from [`get`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection to {address} failed: {source}")]
    Connect {
        address: String,
        source: std::io::Error,
    },

    #[error("handshake failed: {0}")]
    Handshake(hyper::Error),

    #[error("request failed: {0}")]
    Request(hyper::Error),
}

/// Perform a single GET against `address` and return the streaming
/// response.
///
/// Connects a fresh TCP stream, performs the HTTP/1.1 handshake, and
/// drives the connection on a background task. The returned
/// [`IncomingResponse`] has headers and status available immediately;
/// the body is delivered through the accumulation operations.
pub async fn get(address: &str, path: &str) -> Result<IncomingResponse, ClientError> {
    let stream = TcpStream::connect(address)
        .await
        .map_err(|source| ClientError::Connect {
            address: address.to_string(),
            source,
        })?;

    let io = TokioIo::new(stream);
    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(ClientError::Handshake)?;

    // Drive the connection in the background.
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            debug!(error = %e, "connection task ended with error");
        }
    });

    let req = http::Request::builder()
        .method("GET")
        .uri(path)
        .header("host", address)
        .header("user-agent", concat!("slurp/", env!("CARGO_PKG_VERSION")))
        .body(Empty::<Bytes>::new())
        .unwrap();

    let response = sender
        .send_request(req)
        .await
        .map_err(ClientError::Request)?;

    Ok(IncomingResponse::new(response))
}
