//! Streaming HTTP response body accumulation.
//!
//! Wraps a streaming response interface behind the [`Response`] trait,
//! buffers incoming chunks, and settles a single-resolution [`BodyFuture`]
//! once the body is fully received or the connection fails. A successful
//! accumulation is cached on the response, so repeated reads return the
//! same value without touching the transport again.
//!
//! # Delivery Model
//!
//! The transport drives delivery. Registering through
//! [`Response::deliver_body`] hands it a [`BodyConsumer`] that receives
//! each chunk in arrival order and then exactly one terminal
//! [`StreamEnd`]. The accumulation operations ([`collect`], [`content`],
//! [`json_content`], [`text_content`]) register at call time and return
//! futures that settle when the terminal signal arrives, so a caller can
//! register first and await later.
//!
//! # Caching
//!
//! The first accumulation to complete writes the concatenated body into
//! the response's [`BodyCache`]. Later calls resolve immediately from the
//! cache, each with a fresh future. Failures are never cached: a failed
//! attempt leaves the response in its original state.
//!
//! # Errors
//!
//! Transport failures propagate unchanged inside [`Error::Stream`] so
//! callers can downcast to the concrete cause. Decode problems surface as
//! [`Error::Json`] or [`Error::TextDecode`] and are never papered over
//! with partial or replacement output.

mod body;
mod content;
mod error;
mod header;
mod oneshot;
mod response;
pub mod testing;

pub use body::{BodyConsumer, StreamEnd};
pub use content::{collect, content, json_content, text_content, DecodedFuture};
pub use error::{BodyResult, BoxError, Error};
pub use header::HeaderMap;
pub use oneshot::{BodyFuture, Resolver};
pub use response::{BodyCache, Response};
