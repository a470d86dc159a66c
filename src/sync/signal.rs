// Copyright 2026 The proact Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One-shot broadcast completion signal

use std::fmt;
use std::sync::{Condvar, Mutex};

/// A one-shot cell that stores a value and wakes every waiter when it fires.
///
/// `set` succeeds exactly once. The value is stored under the same lock that
/// guards the wakeup, so no waiter can observe the signal before the value
/// is visible.
pub struct MonoSignal<V> {
    slot: Mutex<Option<V>>,
    cond: Condvar,
}

impl<V> MonoSignal<V> {
    /// Create a new unfired `MonoSignal`
    pub fn new() -> MonoSignal<V> {
        MonoSignal {
            slot: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    /// Fire the signal with `value`, waking all current and future waiters.
    /// If the signal has already fired, `value` is handed back untouched.
    pub fn set(&self, value: V) -> Result<(), V> {
        let mut slot = self.slot.lock().unwrap();

        if slot.is_some() {
            return Err(value);
        }

        *slot = Some(value);
        self.cond.notify_all();
        Ok(())
    }

    /// Block until the signal fires, then return a copy of the stored value.
    /// May be called any number of times, from any number of threads.
    pub fn wait(&self) -> V
        where V: Clone
    {
        let mut slot = self.slot.lock().unwrap();

        loop {
            match *slot {
                Some(ref value) => return value.clone(),
                None => slot = self.cond.wait(slot).unwrap(),
            }
        }
    }

    /// Observe the stored value without blocking, if the signal has fired
    pub fn peek<R, F>(&self, f: F) -> Option<R>
        where F: FnOnce(&V) -> R
    {
        self.slot.lock().unwrap().as_ref().map(f)
    }

    /// Whether the signal has fired
    pub fn is_set(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}

impl<V> Default for MonoSignal<V> {
    fn default() -> MonoSignal<V> {
        MonoSignal::new()
    }
}

impl<V> fmt::Debug for MonoSignal<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_set() {
            write!(f, "MonoSignal(Set)")
        } else {
            write!(f, "MonoSignal(Empty)")
        }
    }
}
