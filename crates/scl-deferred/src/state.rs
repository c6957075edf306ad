//! Deferred lifecycle
//!
//! ```text
//! Pending
//!   ↓ resolve          ↓ reject
//! Resolved           Rejected
//! ```
//!
//! Both terminal states are final.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeferredState {
    /// No outcome yet
    Pending,
    /// Settled through `resolve`
    Resolved,
    /// Settled through `reject`
    Rejected,
}

impl DeferredState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, DeferredState::Pending)
    }

    pub fn can_transition_to(&self, target: DeferredState) -> bool {
        matches!(
            (self, target),
            (DeferredState::Pending, DeferredState::Resolved)
                | (DeferredState::Pending, DeferredState::Rejected)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeferredState::Pending => "pending",
            DeferredState::Resolved => "resolved",
            DeferredState::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for DeferredState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeferredState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DeferredState::Pending),
            "resolved" => Ok(DeferredState::Resolved),
            "rejected" => Ok(DeferredState::Rejected),
            _ => Err(format!("Unknown deferred state: {}", s)),
        }
    }
}

/// Terminal outcome of a deferred, handed to `always` observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Settlement<T, E> {
    Resolved(T),
    Rejected(E),
}

impl<T, E> Settlement<T, E> {
    pub fn state(&self) -> DeferredState {
        match self {
            Settlement::Resolved(_) => DeferredState::Resolved,
            Settlement::Rejected(_) => DeferredState::Rejected,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Settlement::Resolved(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Settlement::Rejected(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Settlement::Resolved(value) => Some(value),
            Settlement::Rejected(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&E> {
        match self {
            Settlement::Resolved(_) => None,
            Settlement::Rejected(reason) => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            Settlement::Resolved(value) => Ok(value),
            Settlement::Rejected(reason) => Err(reason),
        }
    }
}
