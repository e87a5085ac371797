//! Listener and predicate handles carried in picker args.
//!
//! ## Usage
//!
//! Wrap host closures so [`TimePickerArgs`](crate::TimePickerArgs) stays
//! cloneable and comparable.

use std::{fmt, sync::Arc};

// Compared by `Arc::ptr_eq`, so args holding listeners stay comparable
// without looking inside closures.
struct Slot<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Slot<F> {
    fn get(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> Eq for Slot<F> {}

/// Listener for events without a payload, such as panel open and close.
#[derive(Clone, PartialEq, Eq)]
pub struct Callback {
    slot: Slot<dyn Fn() + Send + Sync>,
}

impl Callback {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            slot: Slot(Arc::new(handler)),
        }
    }

    /// Invoke the callback.
    pub fn call(&self) {
        (self.slot.get())();
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Listener or predicate that takes an argument.
pub struct CallbackWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot(Arc::new(handler)),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        (self.slot.get())(value)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackWith(..)")
    }
}

/// Predicate vetoing a `(hour, minute, second)` combination.
///
/// Returning `true` marks the time as disabled.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DisableTime(CallbackWith<(u32, u32, u32), bool>);

impl DisableTime {
    /// Wrap a predicate over hour, minute and second.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(u32, u32, u32) -> bool + Send + Sync + 'static,
    {
        Self(CallbackWith::new(move |(hour, minute, second)| {
            predicate(hour, minute, second)
        }))
    }

    /// Whether the given time is disabled.
    pub fn is_disabled(&self, hour: u32, minute: u32, second: u32) -> bool {
        self.0.call((hour, minute, second))
    }
}
