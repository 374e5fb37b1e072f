//! Body accumulation operations.
//!
//! All four operations register at call time and return futures that
//! settle when the transport reports the terminal signal. [`collect`] is
//! the raw building block; [`content`] buffers and caches the whole body;
//! [`json_content`] and [`text_content`] decode on top of [`content`].

use std::future::Future;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use encoding_rs::Encoding;
use serde_json::Value;

use crate::body::{BodyConsumer, StreamEnd};
use crate::error::{BodyResult, Error};
use crate::oneshot::{BodyFuture, Resolver};
use crate::response::{BodyCache, Response};

/// A type-erased accumulation result with decoding applied.
pub type DecodedFuture<T> = Pin<Box<dyn Future<Output = BodyResult<T>> + Send>>;

/// Stream the body of `response` into `chunk_sink`.
///
/// Each received chunk is passed to the sink exactly once, in arrival
/// order. The returned future resolves with `()` on clean completion and
/// fails with the transport's error, unchanged, on stream failure.
///
/// A response with a known length of zero resolves immediately; no
/// consumer is registered and the sink is never invoked.
///
/// A panicking sink is not caught here; the panic propagates to
/// whatever task is driving delivery.
pub fn collect<R>(response: &R, chunk_sink: impl FnMut(Bytes) + Send + 'static) -> BodyFuture<()>
where
    R: Response + ?Sized,
{
    if response.content_length() == Some(0) {
        return BodyFuture::resolved(());
    }
    let (resolver, result) = BodyFuture::pair();
    response.deliver_body(Box::new(SinkConsumer {
        chunk_sink,
        resolver,
    }));
    result
}

/// Accumulate the whole body of `response` into one `Bytes` buffer.
///
/// The first completed accumulation is written to the response's
/// [`BodyCache`]; from then on every call resolves from the cache without
/// touching the transport. Each call returns a fresh future, cached or
/// not. Failures are not cached, so a failed attempt does not poison
/// later ones.
pub fn content<R>(response: &R) -> BodyFuture<Bytes>
where
    R: Response + ?Sized,
{
    let cache = response.body_cache();
    if let Some(body) = cache.get() {
        return BodyFuture::resolved(body);
    }
    if response.content_length() == Some(0) {
        let body = Bytes::new();
        cache.fill(body.clone());
        return BodyFuture::resolved(body);
    }
    let (resolver, result) = BodyFuture::pair();
    response.deliver_body(Box::new(Accumulator {
        buf: BytesMut::new(),
        cache: cache.clone(),
        resolver,
    }));
    result
}

/// Accumulate the body and parse it as JSON.
///
/// Resolves with the decoded [`Value`]; a parse failure surfaces as
/// [`Error::Json`].
pub fn json_content<R>(response: &R) -> DecodedFuture<Value>
where
    R: Response + ?Sized,
{
    let body = content(response);
    Box::pin(async move {
        let body = body.await?;
        Ok(serde_json::from_slice(&body)?)
    })
}

/// Accumulate the body and decode it as text.
///
/// The encoding comes from the `charset` parameter of the `Content-Type`
/// header, read at call time. When the parameter is absent or names an
/// unknown encoding, ISO-8859-1 is assumed (the HTTP/1.1 default; the
/// label resolves to windows-1252). Byte sequences that are invalid in
/// the selected encoding fail with [`Error::TextDecode`]; nothing is
/// silently replaced.
pub fn text_content<R>(response: &R) -> DecodedFuture<String>
where
    R: Response + ?Sized,
{
    let charset = response.headers().charset();
    let body = content(response);
    Box::pin(async move {
        let body = body.await?;
        decode_text(&body, charset.as_deref())
    })
}

fn decode_text(body: &[u8], charset: Option<&str>) -> BodyResult<String> {
    let encoding = match charset.and_then(|label| Encoding::for_label(label.as_bytes())) {
        Some(encoding) => encoding,
        // HTTP/1.1 default; the iso-8859-1 label resolves to windows-1252.
        None => encoding_rs::WINDOWS_1252,
    };
    match encoding.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => Ok(text.into_owned()),
        None => Err(Error::TextDecode {
            charset: encoding.name().to_string(),
        }),
    }
}

/// Forwards chunks to a caller-supplied sink.
struct SinkConsumer<F> {
    chunk_sink: F,
    resolver: Resolver<()>,
}

impl<F: FnMut(Bytes) + Send> BodyConsumer for SinkConsumer<F> {
    fn data_received(&mut self, chunk: Bytes) {
        (self.chunk_sink)(chunk);
    }

    fn connection_lost(self: Box<Self>, end: StreamEnd) {
        let this = *self;
        match end {
            StreamEnd::Completed => this.resolver.resolve(()),
            StreamEnd::Failed(error) => this.resolver.fail(error),
        }
    }
}

/// Buffers chunks and publishes the finished body to the cache.
struct Accumulator {
    buf: BytesMut,
    cache: BodyCache,
    resolver: Resolver<Bytes>,
}

impl BodyConsumer for Accumulator {
    fn data_received(&mut self, chunk: Bytes) {
        self.buf.extend_from_slice(&chunk);
    }

    fn connection_lost(self: Box<Self>, end: StreamEnd) {
        let this = *self;
        match end {
            StreamEnd::Completed => {
                let body = this.buf.freeze();
                // First writer wins if another accumulation finished first.
                this.cache.fill(body.clone());
                this.resolver.resolve(body);
            }
            StreamEnd::Failed(error) => this.resolver.fail(error),
        }
    }
}
