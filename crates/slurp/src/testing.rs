//! Test doubles for the body delivery contract.
//!
//! [`FakeResponse`] stands in for a real transport so accumulation can be
//! driven by hand: register through the normal operations, then script the
//! delivery with [`push`](FakeResponse::push),
//! [`complete`](FakeResponse::complete) and [`fail`](FakeResponse::fail).
//! Panics on misuse (driving before a consumer is registered) rather than
//! returning errors, since that is always a bug in the test itself.

use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::body::{BodyConsumer, StreamEnd};
use crate::error::Error;
use crate::header::HeaderMap;
use crate::response::{BodyCache, Response};

/// A hand-driven [`Response`] implementation.
#[derive(Default)]
pub struct FakeResponse {
    headers: HeaderMap,
    length: Option<u64>,
    cache: BodyCache,
    delivery: Arc<Mutex<Delivery>>,
}

#[derive(Default)]
struct Delivery {
    consumer: Option<Box<dyn BodyConsumer>>,
    count: usize,
}

impl FakeResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Advertise a known body length.
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// Deliver one chunk to the registered consumer.
    pub fn push(&self, chunk: impl Into<Bytes>) {
        let mut delivery = self.delivery.lock().unwrap();
        delivery
            .consumer
            .as_mut()
            .expect("push without a registered consumer")
            .data_received(chunk.into());
    }

    /// End the stream cleanly.
    pub fn complete(&self) {
        self.finish(StreamEnd::Completed);
    }

    /// End the stream with a failure.
    pub fn fail(&self, error: Error) {
        self.finish(StreamEnd::Failed(error));
    }

    /// Discard the consumer without a terminal signal, as a broken
    /// transport would.
    pub fn abandon(&self) {
        let mut delivery = self.delivery.lock().unwrap();
        delivery
            .consumer
            .take()
            .expect("abandon without a registered consumer");
    }

    /// How many times a consumer has been registered.
    pub fn deliveries(&self) -> usize {
        self.delivery.lock().unwrap().count
    }

    /// Whether a consumer is currently registered and undelivered.
    pub fn is_registered(&self) -> bool {
        self.delivery.lock().unwrap().consumer.is_some()
    }

    fn finish(&self, end: StreamEnd) {
        let consumer = self
            .delivery
            .lock()
            .unwrap()
            .consumer
            .take()
            .expect("terminal signal without a registered consumer");
        consumer.connection_lost(end);
    }
}

impl Response for FakeResponse {
    fn deliver_body(&self, consumer: Box<dyn BodyConsumer>) {
        let mut delivery = self.delivery.lock().unwrap();
        delivery.consumer = Some(consumer);
        delivery.count += 1;
    }

    fn content_length(&self) -> Option<u64> {
        self.length
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn body_cache(&self) -> &BodyCache {
        &self.cache
    }
}
