//! Typed value adapters and bound value handles.
//!
//! Every flag owns one adapter. The adapter converts a command-line token
//! into a [`Value`] and stores it into the [`Bound`] slot handed out to the
//! host at registration time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::kind::FlagType;
use super::native::{Native, Value};
use crate::error::ValueError;

/// A single-slot handle to a flag's bound value.
///
/// Registration returns a `Bound`; the engine writes into it while parsing
/// and the host reads it afterwards. Clones share the same slot.
pub struct Bound<T>(Rc<RefCell<T>>);

impl<T> Bound<T> {
    /// Creates a handle holding `value`.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Runs `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.0.borrow_mut());
    }
}

impl<T: Clone> Bound<T> {
    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Bound<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bound").field(&self.0.borrow()).finish()
    }
}

/// The capability set of a typed value adapter.
pub trait TypedValue: fmt::Debug {
    /// The flag type this adapter handles.
    fn kind(&self) -> FlagType;

    /// Converts a command-line token into a native value.
    ///
    /// Slice adapters return a one-element slice.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] when the token does not convert.
    fn parse(&self, text: &str) -> Result<Value, ValueError>;

    /// Stores a native value into the bound slot.
    ///
    /// Scalar adapters replace the slot; slice adapters append.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] when `value` is of another type.
    fn set(&mut self, value: Value) -> Result<(), ValueError>;
}

fn mismatch(expected: FlagType, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        actual: value.kind(),
    }
}

/// Adapter for a scalar flag that always holds a value.
#[derive(Debug)]
pub struct ScalarValue<T> {
    slot: Bound<T>,
}

impl<T: Native> ScalarValue<T> {
    /// Creates an adapter writing into `slot`.
    #[must_use]
    pub const fn new(slot: Bound<T>) -> Self {
        Self { slot }
    }
}

impl<T: Native> TypedValue for ScalarValue<T> {
    fn kind(&self) -> FlagType {
        T::KIND
    }

    fn parse(&self, text: &str) -> Result<Value, ValueError> {
        T::parse_text(text).map(T::into_value)
    }

    fn set(&mut self, value: Value) -> Result<(), ValueError> {
        let native = T::from_value(value).map_err(|v| mismatch(T::KIND, &v))?;
        self.slot.update(|slot| *slot = native);
        Ok(())
    }
}

/// Adapter for a scalar flag whose default may be absent (URL and IP).
#[derive(Debug)]
pub struct OptionalValue<T> {
    slot: Bound<Option<T>>,
}

impl<T: Native> OptionalValue<T> {
    /// Creates an adapter writing into `slot`.
    #[must_use]
    pub const fn new(slot: Bound<Option<T>>) -> Self {
        Self { slot }
    }
}

impl<T: Native> TypedValue for OptionalValue<T> {
    fn kind(&self) -> FlagType {
        T::KIND
    }

    fn parse(&self, text: &str) -> Result<Value, ValueError> {
        T::parse_text(text).map(T::into_value)
    }

    fn set(&mut self, value: Value) -> Result<(), ValueError> {
        let native = T::from_value(value).map_err(|v| mismatch(T::KIND, &v))?;
        self.slot.update(|slot| *slot = Some(native));
        Ok(())
    }
}

/// Adapter for a repeated flag.
///
/// The first stored value replaces the registered default; every later one
/// is appended.
#[derive(Debug)]
pub struct SliceValue<T> {
    slot: Bound<Vec<T>>,
    changed: bool,
}

impl<T: Native> SliceValue<T> {
    /// Creates an adapter writing into `slot`.
    #[must_use]
    pub const fn new(slot: Bound<Vec<T>>) -> Self {
        Self {
            slot,
            changed: false,
        }
    }
}

impl<T: Native> TypedValue for SliceValue<T> {
    fn kind(&self) -> FlagType {
        T::SLICE_KIND
    }

    fn parse(&self, text: &str) -> Result<Value, ValueError> {
        T::parse_text(text).map(|item| T::into_slice_value(vec![item]))
    }

    fn set(&mut self, value: Value) -> Result<(), ValueError> {
        let items = T::from_slice_value(value).map_err(|v| mismatch(T::SLICE_KIND, &v))?;
        let replace = !self.changed;
        self.slot.update(|slot| {
            if replace {
                slot.clear();
            }
            slot.extend(items);
        });
        self.changed = true;
        Ok(())
    }
}
