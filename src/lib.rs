// Copyright 2026 The proact Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Promise style asynchronous results with a serialized task actor
//!
//! A [`Promise`] runs a fallible task on its own thread and settles exactly
//! once, after which any number of callers can read the result or chain
//! continuations onto it. An [`Actor`] accepts tasks through a bounded FIFO
//! queue and hands each caller back a promise for the eventual result.

pub use self::actor::{Actor, ActorError, Task};
pub use self::promise::{Promise, State};

pub mod actor;
pub mod promise;
pub mod sync;

/// Spawn a task on a new thread, returning the promise of its result
#[inline(always)]
pub fn spawn<F, T, E>(f: F) -> Promise<T, E>
    where F: FnOnce() -> Result<T, E> + Send + 'static,
          T: Clone + Send + 'static,
          E: Clone + Send + 'static
{
    Promise::spawn(f)
}

/// Join a collection of promises into one, short-circuiting on the first
/// rejection
#[inline(always)]
pub fn all<I, T, E>(promises: I) -> Promise<Vec<T>, E>
    where I: IntoIterator<Item = Promise<T, E>>,
          T: Clone + Send + 'static,
          E: Clone + Send + 'static
{
    Promise::all(promises)
}
