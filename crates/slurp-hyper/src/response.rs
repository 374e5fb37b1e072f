//! Adapter from hyper's streaming response to the accumulation contract.

use std::sync::Mutex;

use http_body_util::BodyExt;
use hyper::body::{Body, Incoming};
use tracing::{debug, warn};

use slurp::{BodyCache, BodyConsumer, Error, HeaderMap, Response, StreamEnd};

/// A client response whose body is pumped to the registered consumer.
///
/// Wraps a `http::Response<hyper::body::Incoming>`. The body is
/// single-shot: the first [`deliver_body`](Response::deliver_body) takes
/// it and spawns a tokio task that forwards data frames to the consumer
/// until hyper reports the end of the stream or an error. A later
/// delivery attempt fails the consumer with [`Error::AlreadyDelivered`].
///
/// Must be used from within a tokio runtime, since delivery runs on a
/// spawned task.
pub struct IncomingResponse {
    status: u16,
    headers: HeaderMap,
    length: Option<u64>,
    cache: BodyCache,
    body: Mutex<Option<Incoming>>,
}

impl IncomingResponse {
    pub fn new(response: http::Response<Incoming>) -> Self {
        let (parts, body) = response.into_parts();

        let mut headers = HeaderMap::new();
        for (name, value) in &parts.headers {
            headers.insert(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }
        // Exact when hyper knows the framing (content-length), absent for
        // chunked transfer.
        let length = body.size_hint().exact();

        Self {
            status: parts.status.as_u16(),
            headers,
            length,
            cache: BodyCache::new(),
            body: Mutex::new(Some(body)),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }
}

impl Response for IncomingResponse {
    fn deliver_body(&self, mut consumer: Box<dyn BodyConsumer>) {
        let taken = self.body.lock().unwrap().take();
        let Some(mut body) = taken else {
            warn!("body delivery requested after the body was consumed");
            consumer.connection_lost(StreamEnd::Failed(Error::AlreadyDelivered));
            return;
        };

        tokio::spawn(async move {
            loop {
                match body.frame().await {
                    Some(Ok(frame)) => {
                        // Trailer frames are not part of the body.
                        if let Ok(data) = frame.into_data() {
                            consumer.data_received(data);
                        }
                    }
                    Some(Err(e)) => {
                        debug!(error = %e, "body stream failed");
                        consumer.connection_lost(StreamEnd::Failed(Error::stream(e)));
                        return;
                    }
                    None => {
                        consumer.connection_lost(StreamEnd::Completed);
                        return;
                    }
                }
            }
        });
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
