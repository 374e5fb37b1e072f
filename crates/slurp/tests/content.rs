//! End-to-end accumulation behavior against a hand-driven transport.

use std::fmt;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use slurp::testing::FakeResponse;
use slurp::{collect, content, json_content, text_content, Error};

#[derive(Debug)]
struct ConnectionReset;

impl fmt::Display for ConnectionReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection reset by peer")
    }
}

impl std::error::Error for ConnectionReset {}

fn recording_sink() -> (Arc<Mutex<Vec<Bytes>>>, impl FnMut(Bytes) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let seen = seen.clone();
        move |chunk: Bytes| seen.lock().unwrap().push(chunk)
    };
    (seen, sink)
}

#[tokio::test]
async fn collect_forwards_chunks_in_arrival_order() {
    let response = FakeResponse::new();
    let (seen, sink) = recording_sink();

    let done = collect(&response, sink);

    response.push("{");
    response.push("\"msg\": \"hell");
    response.push("o\"}");
    response.complete();

    done.await.unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            Bytes::from("{"),
            Bytes::from("\"msg\": \"hell"),
            Bytes::from("o\"}"),
        ]
    );
}

#[tokio::test]
async fn collect_failure_preserves_the_cause() {
    let response = FakeResponse::new();
    let (seen, sink) = recording_sink();

    let done = collect(&response, sink);

    response.push("foo");
    response.fail(Error::stream(ConnectionReset));

    let err = done.await.unwrap_err();
    match err {
        Error::Stream(cause) => assert!(cause.is::<ConnectionReset>()),
        other => panic!("expected Stream, got {other:?}"),
    }
    // Chunks delivered before the failure were still seen.
    assert_eq!(*seen.lock().unwrap(), vec![Bytes::from("foo")]);
}

#[tokio::test]
async fn collect_zero_length_never_registers() {
    let response = FakeResponse::new().with_length(0);

    let done = collect(&response, |chunk: Bytes| {
        panic!("unexpectedly called with: {chunk:?}")
    });

    done.await.unwrap();
    assert_eq!(response.deliveries(), 0);
}

#[tokio::test]
async fn content_concatenates_in_delivery_order() {
    let response = FakeResponse::new();

    let body = content(&response);

    response.push("foo");
    response.push("bar");
    response.complete();

    assert_eq!(body.await.unwrap(), Bytes::from("foobar"));
}

#[tokio::test]
async fn content_is_cached_after_the_first_success() {
    let response = FakeResponse::new();

    let first = content(&response);
    response.push("foo");
    response.push("bar");
    response.complete();
    assert_eq!(first.await.unwrap(), Bytes::from("foobar"));

    // The second call is a fresh future resolved from the cache; the
    // transport sees no further registration.
    let second = content(&response);
    assert_eq!(second.await.unwrap(), Bytes::from("foobar"));
    assert_eq!(response.deliveries(), 1);
}

#[tokio::test]
async fn content_failure_is_not_sticky() {
    let response = FakeResponse::new();

    let first = content(&response);
    response.push("par");
    response.fail(Error::stream(ConnectionReset));
    assert!(first.await.is_err());

    // Nothing was cached, so a retry registers again and can succeed.
    let second = content(&response);
    assert_eq!(response.deliveries(), 2);
    response.push("foobar");
    response.complete();
    assert_eq!(second.await.unwrap(), Bytes::from("foobar"));
}

#[tokio::test]
async fn json_content_decodes_the_body() {
    let response = FakeResponse::new();

    let value = json_content(&response);

    response.push("{\"msg\":\"hello!\"}");
    response.complete();

    let value = value.await.unwrap();
    assert_eq!(value["msg"], "hello!");
}

#[tokio::test]
async fn json_content_rejects_a_malformed_body() {
    let response = FakeResponse::new();

    let value = json_content(&response);

    response.push("{\"msg\":");
    response.complete();

    assert!(matches!(value.await.unwrap_err(), Error::Json(_)));
}

#[tokio::test]
async fn text_content_honors_the_declared_charset() {
    let response =
        FakeResponse::new().with_header("Content-Type", "text/plain; charset=utf-8");

    let text = text_content(&response);

    response.push(&b"\xe2\x98\x83"[..]);
    response.complete();

    assert_eq!(text.await.unwrap(), "\u{2603}");
}

#[tokio::test]
async fn text_content_defaults_to_latin1() {
    let response = FakeResponse::new().with_header("Content-Type", "text/plain");

    let text = text_content(&response);

    response.push(&b"caf\xe9"[..]);
    response.complete();

    assert_eq!(text.await.unwrap(), "café");
}

#[tokio::test]
async fn text_content_rejects_undecodable_bytes() {
    let response =
        FakeResponse::new().with_header("Content-Type", "text/plain; charset=utf-8");

    let text = text_content(&response);

    response.push(&b"\xff\xfe"[..]);
    response.complete();

    assert!(matches!(
        text.await.unwrap_err(),
        Error::TextDecode { .. }
    ));
}

#[tokio::test]
async fn abandoned_delivery_fails_the_result() {
    let response = FakeResponse::new();

    let body = content(&response);

    response.push("partial");
    response.abandon();

    assert!(matches!(body.await.unwrap_err(), Error::Abandoned));
}
