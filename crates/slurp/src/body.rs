//! The streamed body delivery contract.
//!
//! A transport hands the body to a [`BodyConsumer`]: zero or more
//! [`data_received`](BodyConsumer::data_received) calls in arrival order,
//! then exactly one [`connection_lost`](BodyConsumer::connection_lost)
//! carrying the terminal [`StreamEnd`]. The terminal call takes the boxed
//! consumer by value, so a consumer cannot observe a second terminal
//! signal and is discarded once delivery ends.

use bytes::Bytes;

use crate::Error;

/// How a body stream ended.
#[derive(Debug)]
pub enum StreamEnd {
    /// The transport delivered the entire body and closed cleanly.
    Completed,
    /// The transport failed before the body completed.
    Failed(Error),
}

/// Registered recipient of streamed body chunks.
///
/// Implementations are handed to
/// [`Response::deliver_body`](crate::Response::deliver_body) and driven
/// entirely by the transport, possibly from another task or thread.
pub trait BodyConsumer: Send {
    /// One chunk of body bytes, in arrival order.
    fn data_received(&mut self, chunk: Bytes);

    /// The terminal signal. Called exactly once, after the last chunk.
    fn connection_lost(self: Box<Self>, end: StreamEnd);
}
