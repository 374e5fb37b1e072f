//! The response capability consumed by the accumulator.

use std::sync::{Arc, OnceLock};

use bytes::Bytes;

use crate::body::BodyConsumer;
use crate::header::HeaderMap;

/// An in-progress HTTP response whose body arrives as a stream of chunks.
///
/// The accumulator treats the response as an external capability: any type
/// that can register a body consumer, report a known length, expose headers,
/// and hold a cache slot can be accumulated. The shipped implementations
/// are the hyper adapter and [`testing::FakeResponse`](crate::testing::FakeResponse).
pub trait Response {
    /// Register `consumer` to receive the streamed body.
    ///
    /// The transport calls `data_received` for each chunk in arrival order,
    /// then exactly one `connection_lost`. A response body can be delivered
    /// at most once; implementations reject later registrations through the
    /// consumer's terminal signal.
    fn deliver_body(&self, consumer: Box<dyn BodyConsumer>);

    /// Known body length in bytes, if the transport advertised one.
    ///
    /// `Some(0)` marks a known-empty body and lets the accumulator skip
    /// registration entirely. `None` means unknown (e.g. chunked transfer).
    fn content_length(&self) -> Option<u64>;

    /// Response headers.
    fn headers(&self) -> &HeaderMap;

    /// The slot caching the fully accumulated body.
    fn body_cache(&self) -> &BodyCache;
}

/// Per-response cache slot for the accumulated body.
///
/// Written at most once: the first completed accumulation wins and later
/// fills are ignored. Cloning shares the slot, which is how the in-flight
/// consumer carries it across the `'static` boundary of
/// [`Response::deliver_body`]. Reads hand out cheap `Bytes` clones of the
/// one stored buffer.
#[derive(Debug, Clone, Default)]
pub struct BodyCache {
    slot: Arc<OnceLock<Bytes>>,
}

impl BodyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached body, if an accumulation has completed.
    pub fn get(&self) -> Option<Bytes> {
        self.slot.get().cloned()
    }

    /// Store the accumulated body. Returns `false` if a value was already
    /// cached, in which case the existing value is kept.
    pub fn fill(&self, body: Bytes) -> bool {
        self.slot.set(body).is_ok()
    }
}
