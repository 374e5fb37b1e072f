//! Single-resolution pending results.
//!
//! A [`BodyFuture`] settles exactly once, with a value or with an
//! [`Error`], never both and never twice. The write side is a
//! [`Resolver`] whose `resolve`/`fail` methods consume it, so a second
//! resolution is unrepresentable. Dropping an unsettled resolver fails
//! the future with [`Error::Abandoned`] instead of leaving it pending
//! forever.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

use crate::Error;

enum State<T> {
    Pending { waker: Option<Waker> },
    Resolved(T),
    Failed(Error),
    /// The settled value was handed to the poller.
    Claimed,
}

type Shared<T> = Arc<Mutex<State<T>>>;

/// The eventual result of one body accumulation.
///
/// Output is `Result<T, Error>`. Futures created by the accumulation
/// operations are settled by the transport's terminal signal; futures
/// created by [`BodyFuture::resolved`] or [`BodyFuture::failed`] are
/// ready on the first poll.
pub struct BodyFuture<T> {
    shared: Shared<T>,
}

/// Write side of a [`BodyFuture`]. Consumed on resolution.
pub struct Resolver<T> {
    shared: Option<Shared<T>>,
}

impl<T> BodyFuture<T> {
    /// Create an unsettled future and the resolver that settles it.
    pub fn pair() -> (Resolver<T>, BodyFuture<T>) {
        let shared = Arc::new(Mutex::new(State::Pending { waker: None }));
        (
            Resolver {
                shared: Some(shared.clone()),
            },
            BodyFuture { shared },
        )
    }

    /// A future that is already resolved with `value`.
    pub fn resolved(value: T) -> Self {
        BodyFuture {
            shared: Arc::new(Mutex::new(State::Resolved(value))),
        }
    }

    /// A future that is already failed with `error`.
    pub fn failed(error: Error) -> Self {
        BodyFuture {
            shared: Arc::new(Mutex::new(State::Failed(error))),
        }
    }
}

impl<T> Resolver<T> {
    /// Settle the future with a value.
    pub fn resolve(mut self, value: T) {
        self.settle(State::Resolved(value));
    }

    /// Settle the future with a failure.
    pub fn fail(mut self, error: Error) {
        self.settle(State::Failed(error));
    }

    fn settle(&mut self, next: State<T>) {
        let Some(shared) = self.shared.take() else {
            return;
        };
        let mut state = shared.lock().unwrap();
        if let State::Pending { waker } = std::mem::replace(&mut *state, next) {
            drop(state);
            if let Some(waker) = waker {
                waker.wake();
            }
        }
    }
}

impl<T> Drop for Resolver<T> {
    fn drop(&mut self) {
        // A resolver that was never consumed means the transport dropped
        // the consumer without a terminal signal.
        self.settle(State::Failed(Error::Abandoned));
    }
}

impl<T> Future for BodyFuture<T> {
    type Output = Result<T, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.shared.lock().unwrap();
        match std::mem::replace(&mut *state, State::Claimed) {
            State::Pending { .. } => {
                *state = State::Pending {
                    waker: Some(cx.waker().clone()),
                };
                Poll::Pending
            }
            State::Resolved(value) => Poll::Ready(Ok(value)),
            State::Failed(error) => Poll::Ready(Err(error)),
            State::Claimed => panic!("BodyFuture polled after completion"),
        }
    }
}
