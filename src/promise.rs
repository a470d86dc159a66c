// Copyright 2026 The proact Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Promise style asynchronous APIs

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use log::trace;

use crate::sync::MonoSignal;

/// Observable lifecycle of a [`Promise`]. A promise starts `Pending` and
/// transitions exactly once to `Resolved` or `Rejected`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Pending,
    Resolved,
    Rejected,
}

/// Store the result of a task, return `Ok(T)` if it succeeded, `Err(E)` otherwise.
///
/// A `Promise` is settled exactly once, by the task it was spawned with or by
/// the continuation feeding it. Clones are handles to the same settlement:
/// after it, any number of callers may read the result concurrently.
pub struct Promise<T, E> {
    inner: Arc<MonoSignal<Result<T, E>>>,
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Promise<T, E> {
        Promise { inner: self.inner.clone() }
    }
}

impl<T, E> Promise<T, E>
    where T: Clone + Send + 'static,
          E: Clone + Send + 'static
{
    /// Spawn a new thread to execute the task, returning a pending promise
    /// immediately. The task's `Ok` resolves the promise, its `Err` rejects it.
    pub fn spawn<F>(task: F) -> Promise<T, E>
        where F: FnOnce() -> Result<T, E> + Send + 'static
    {
        let promise = Promise::pending();

        let settler = promise.clone();
        thread::spawn(move || settler.settle(task()));

        promise
    }

    /// An already resolved promise. No thread is spawned.
    pub fn resolved(value: T) -> Promise<T, E> {
        let promise = Promise::pending();
        promise.settle(Ok(value));
        promise
    }

    /// An already rejected promise. No thread is spawned.
    pub fn rejected(err: E) -> Promise<T, E> {
        let promise = Promise::pending();
        promise.settle(Err(err));
        promise
    }

    fn pending() -> Promise<T, E> {
        Promise { inner: Arc::new(MonoSignal::new()) }
    }

    fn settle(&self, result: Result<T, E>) {
        // Settlement is one-shot; a racing second settlement is dropped here
        // rather than corrupting the stored result.
        let _ = self.inner.set(result);
    }

    /// Block the calling thread until the promise settles, then return the
    /// result. Idempotent; concurrent callers all observe the same values.
    pub fn done(&self) -> Result<T, E> {
        self.inner.wait()
    }

    /// The current state, without blocking
    pub fn state(&self) -> State {
        match self.inner.peek(|result| result.is_ok()) {
            None => State::Pending,
            Some(true) => State::Resolved,
            Some(false) => State::Rejected,
        }
    }

    /// Chain continuations onto this promise, returning the new pending
    /// promise immediately. Exactly one of the two handlers runs, matching
    /// the receiver's terminal state.
    ///
    /// A rejection handler maps the error to a new error: the chained promise
    /// is rejected either way. There is deliberately no way for `on_rejected`
    /// to recover into a resolved state, which its return type enforces.
    pub fn then<U, FT, FE>(&self, on_resolved: FT, on_rejected: FE) -> Promise<U, E>
        where U: Clone + Send + 'static,
              FT: FnOnce(T) -> Result<U, E> + Send + 'static,
              FE: FnOnce(E) -> E + Send + 'static
    {
        let receiver = self.clone();

        Promise::spawn(move || {
            match receiver.done() {
                Ok(value) => on_resolved(value),
                Err(err) => Err(on_rejected(err)),
            }
        })
    }

    /// Chain only a success continuation; a rejection passes through unchanged
    pub fn then_success<U, F>(&self, on_resolved: F) -> Promise<U, E>
        where U: Clone + Send + 'static,
              F: FnOnce(T) -> Result<U, E> + Send + 'static
    {
        self.then(on_resolved, |err| err)
    }

    /// Chain only a rejection continuation; a resolved value passes through
    /// unchanged. The handler replaces the rejection reason, it cannot clear it.
    pub fn catch<F>(&self, on_rejected: F) -> Promise<T, E>
        where F: FnOnce(E) -> E + Send + 'static
    {
        self.then(Ok, on_rejected)
    }

    /// Join a collection of promises into one.
    ///
    /// Resolves with every input's value, index-aligned to input order no
    /// matter which order they complete in. Rejects with the first observed
    /// rejection without waiting for the remaining inputs. An empty input
    /// resolves immediately with an empty `Vec`.
    pub fn all<I>(promises: I) -> Promise<Vec<T>, E>
        where I: IntoIterator<Item = Promise<T, E>>
    {
        let promises: Vec<Promise<T, E>> = promises.into_iter().collect();

        Promise::spawn(move || {
            let total = promises.len();
            if total == 0 {
                return Ok(Vec::new());
            }

            // The settlement thread is the single owner of the counter and
            // the result buffer; input completions reach it only as events
            // on this channel. Once it returns, the receiver is dropped and
            // late events from outstanding inputs fail to send, which their
            // waiters ignore.
            let (tx, rx) = mpsc::channel();

            for (index, promise) in promises.into_iter().enumerate() {
                let tx = tx.clone();
                thread::spawn(move || {
                    let _ = tx.send((index, promise.done()));
                });
            }
            drop(tx);

            let mut values: Vec<Option<T>> = (0..total).map(|_| None).collect();
            let mut remaining = total;

            for (index, result) in rx {
                match result {
                    Ok(value) => {
                        values[index] = Some(value);
                        remaining -= 1;
                        if remaining == 0 {
                            break;
                        }
                    }
                    Err(err) => {
                        trace!("all: input {} rejected with {} input(s) outstanding", index, remaining);
                        return Err(err);
                    }
                }
            }

            Ok(values.into_iter().flatten().collect())
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_promise_resolve() {
        let promise = Promise::<_, String>::spawn(|| Ok(1));
        assert_eq!(promise.done(), Ok(1));
        assert_eq!(promise.state(), State::Resolved);
    }

    #[test]
    fn test_promise_reject() {
        let promise = Promise::<i32, _>::spawn(|| Err("boom".to_owned()));
        assert_eq!(promise.done(), Err("boom".to_owned()));
        assert_eq!(promise.state(), State::Rejected);
    }

    #[test]
    fn test_promise_state_transition() {
        let (tx, rx) = mpsc::channel();

        let promise = Promise::<_, String>::spawn(move || {
            rx.recv().unwrap();
            Ok(5)
        });
        assert_eq!(promise.state(), State::Pending);

        tx.send(()).unwrap();
        assert_eq!(promise.done(), Ok(5));
        assert_eq!(promise.state(), State::Resolved);
    }

    #[test]
    fn test_promise_done_idempotent() {
        let promise = Promise::<_, String>::spawn(|| Ok("value".to_owned()));
        assert_eq!(promise.done(), Ok("value".to_owned()));
        assert_eq!(promise.done(), Ok("value".to_owned()));
    }

    #[test]
    fn test_already_settled_constructors() {
        let resolved = Promise::<_, String>::resolved(10);
        assert_eq!(resolved.state(), State::Resolved);
        assert_eq!(resolved.done(), Ok(10));

        let rejected = Promise::<i32, _>::rejected("nope".to_owned());
        assert_eq!(rejected.state(), State::Rejected);
        assert_eq!(rejected.done(), Err("nope".to_owned()));
    }

    #[test]
    fn test_then_runs_matching_handler() {
        let promise = Promise::<_, String>::spawn(|| Ok(1))
            .then(|v| Ok(v + 1), |_| unreachable!("resolved promise must not hit the rejection handler"));
        assert_eq!(promise.done(), Ok(2));

        let source = Promise::<i32, String>::spawn(|| Err("first".to_owned()));
        let promise: Promise<i32, String> =
            source.then(|_| unreachable!("rejected promise must not hit the success handler"),
                        |_| "second".to_owned());
        assert_eq!(promise.done(), Err("second".to_owned()));
    }

    #[test]
    fn test_catch_never_resolves() {
        let promise = Promise::<i32, String>::spawn(|| Err("task failed".to_owned()))
            .catch(|err| format!("caught: {}", err));
        assert_eq!(promise.done(), Err("caught: task failed".to_owned()));
        assert_eq!(promise.state(), State::Rejected);
    }
}
