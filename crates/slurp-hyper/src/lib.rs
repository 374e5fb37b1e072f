//! Hyper client adapter for [`slurp`] body accumulation.
//!
//! [`IncomingResponse`] wraps a `http::Response<hyper::body::Incoming>`
//! as a [`slurp::Response`]: the first registered consumer takes the body
//! and a spawned task pumps hyper's frames to it, so the accumulation
//! operations in [`slurp`] work against real connections. [`get`] is the
//! minimal way to obtain one: a single HTTP/1.1 request over a fresh TCP
//! connection, with the connection driven in the background.
//!
//! Transport concerns beyond that single request (TLS, pooling, redirects,
//! retries) are out of scope; bring your own hyper stack and hand the
//! response to [`IncomingResponse::new`].

mod client;
mod response;

pub use client::{get, ClientError};
pub use response::IncomingResponse;
