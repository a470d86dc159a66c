// Copyright 2026 The proact Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serialized task admission on top of [`Promise`]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use log::{debug, trace};
use thiserror::Error;

use crate::promise::Promise;

/// A queued unit of work
pub type Task<T, E> = Box<dyn FnOnce() -> Result<T, E> + Send + 'static>;

/// Submission failures, convertible into the caller's error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    /// The actor was closed before the task could be admitted
    #[error("actor is closed")]
    Closed,
}

struct Request<T, E> {
    task: Task<T, E>,
    reply: mpsc::Sender<Promise<T, E>>,
}

/// A single background worker fed through a bounded FIFO queue.
///
/// The worker serializes *admission*: one request at a time is dequeued and
/// wrapped in a [`Promise`], which then runs its task concurrently. Tasks do
/// not mutually exclude each other, only their acceptance is ordered.
///
/// [`Actor::close`] drains rather than abandons: requests admitted before the
/// close still run and their promises still settle.
pub struct Actor<T, E> {
    queue: Mutex<Option<mpsc::SyncSender<Request<T, E>>>>,
    closed: AtomicBool,
}

impl<T, E> Actor<T, E>
    where T: Clone + Send + 'static,
          E: Clone + Send + From<ActorError> + 'static
{
    /// Create an actor with a request queue of the given capacity and start
    /// its dispatch loop
    pub fn new(buffer: usize) -> Actor<T, E> {
        let (tx, rx) = mpsc::sync_channel(buffer);

        thread::spawn(move || Actor::dispatch(rx));

        Actor {
            queue: Mutex::new(Some(tx)),
            closed: AtomicBool::new(false),
        }
    }

    fn dispatch(queue: mpsc::Receiver<Request<T, E>>) {
        while let Ok(request) = queue.recv() {
            trace!("dispatching request");
            let promise = Promise::spawn(request.task);
            let _ = request.reply.send(promise);
        }

        // recv only fails once the queue is disconnected *and* empty, so
        // every admitted request has been served by now.
        debug!("request queue disconnected, dispatch loop exiting");
    }

    /// Queue a task and return a promise for its eventual result.
    ///
    /// Blocks only while the queue is at capacity (backpressure). After
    /// [`Actor::close`] the queue is not touched and the returned promise is
    /// already rejected with [`ActorError::Closed`].
    pub fn submit<F>(&self, task: F) -> Promise<T, E>
        where F: FnOnce() -> Result<T, E> + Send + 'static
    {
        if self.closed.load(Ordering::SeqCst) {
            return Promise::rejected(ActorError::Closed.into());
        }

        let sender = match *self.queue.lock().unwrap() {
            Some(ref tx) => tx.clone(),
            None => return Promise::rejected(ActorError::Closed.into()),
        };

        let (reply_tx, reply_rx) = mpsc::channel();
        let request = Request {
            task: Box::new(task),
            reply: reply_tx,
        };

        if sender.send(request).is_err() {
            // The dispatch loop is gone; nothing will ever reply.
            return Promise::rejected(ActorError::Closed.into());
        }

        Promise::spawn(move || {
            match reply_rx.recv() {
                Ok(inner) => inner.done(),
                Err(mpsc::RecvError) => Err(E::from(ActorError::Closed)),
            }
        })
    }

    /// Close the actor. Irreversible and idempotent.
    ///
    /// New submissions are rejected immediately. Dropping the queue sender
    /// disconnects the dispatch loop, which drains what was already admitted
    /// and then exits.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.queue.lock().unwrap().take();
        debug!("actor closed");
    }
}
