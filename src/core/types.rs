//! Core identifier types for the scheduler.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a script.
///
/// Ids carry identity only; the scheduler never derives priority or
/// ordering semantics from their numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptId(u32);

impl ScriptId {
    /// Create a new ScriptId.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying integer value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ScriptId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
