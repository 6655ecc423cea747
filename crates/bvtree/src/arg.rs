//! Mutable capture cells.
//!
//! An [`ArgRef`] is a shared, optionally-empty slot used to carry state
//! between closures that together form one node (see
//! [`lambda_stage`](crate::builder::lambda_stage)), or to drive a loop from a
//! flag or counter owned outside the tree. Clones share the same slot.
//!
//! The payload is restricted to [`ArgValue`], so unsupported types are
//! rejected when the code is compiled rather than when the cell is read.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{BvError, Result, Status};

/// A value stored in a capture cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Status(Status),
}

impl ArgValue {
    /// Name of the payload type, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Status(_) => "status",
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<Status> for ArgValue {
    fn from(value: Status) -> Self {
        Self::Status(value)
    }
}

/// Types that can be read back out of a capture cell.
pub trait ArgType: Sized {
    /// Name reported when a read finds a different payload.
    const KIND: &'static str;

    /// Extracts `Self` if `value` holds this type.
    fn from_value(value: &ArgValue) -> Option<Self>;
}

impl ArgType for bool {
    const KIND: &'static str = "bool";

    fn from_value(value: &ArgValue) -> Option<Self> {
        match value {
            ArgValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl ArgType for i64 {
    const KIND: &'static str = "int";

    fn from_value(value: &ArgValue) -> Option<Self> {
        match value {
            ArgValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl ArgType for i32 {
    const KIND: &'static str = "int";

    fn from_value(value: &ArgValue) -> Option<Self> {
        match value {
            ArgValue::Int(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl ArgType for String {
    const KIND: &'static str = "string";

    fn from_value(value: &ArgValue) -> Option<Self> {
        match value {
            ArgValue::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl ArgType for Status {
    const KIND: &'static str = "status";

    fn from_value(value: &ArgValue) -> Option<Self> {
        match value {
            ArgValue::Status(v) => Some(*v),
            _ => None,
        }
    }
}

/// Shared handle to a capture cell.
///
/// Cloning is cheap and yields another handle to the same slot. The slot is
/// guarded by a mutex so a tree holding cells stays `Send`, but the cell
/// gives no ordering guarantees to callers writing it from several threads.
#[derive(Debug, Clone, Default)]
pub struct ArgRef {
    slot: Arc<Mutex<Option<ArgValue>>>,
}

impl ArgRef {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell already holding `value`.
    pub fn with_value(value: impl Into<ArgValue>) -> Self {
        let cell = Self::new();
        cell.assign(value);
        cell
    }

    fn lock(&self) -> MutexGuard<'_, Option<ArgValue>> {
        // A panic while holding the lock cannot leave a half-written value.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if the cell holds a value.
    pub fn has_value(&self) -> bool {
        self.lock().is_some()
    }

    /// Stores `value`, replacing whatever was there (including its type).
    pub fn assign(&self, value: impl Into<ArgValue>) {
        *self.lock() = Some(value.into());
    }

    /// Empties the cell.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Reads the value as `T`.
    ///
    /// # Errors
    ///
    /// [`BvError::EmptyCell`] if the cell is empty, [`BvError::CellType`] if
    /// it holds another type.
    pub fn get<T: ArgType>(&self) -> Result<T> {
        match self.lock().as_ref() {
            None => Err(BvError::EmptyCell { expected: T::KIND }),
            Some(value) => T::from_value(value).ok_or(BvError::CellType {
                expected: T::KIND,
                found: value.kind(),
            }),
        }
    }

    /// Reads the value as `T`, or `None` if empty or of another type.
    pub fn try_get<T: ArgType>(&self) -> Option<T> {
        self.lock().as_ref().and_then(T::from_value)
    }

    /// Returns a copy of the stored value.
    pub fn value(&self) -> Option<ArgValue> {
        self.lock().clone()
    }

    /// Name of the stored payload type, or `None` when empty.
    pub fn kind(&self) -> Option<&'static str> {
        self.lock().as_ref().map(ArgValue::kind)
    }
}
