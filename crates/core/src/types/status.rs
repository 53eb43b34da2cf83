//! Case status.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known [`CaseStatus`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown case status '{0}' (expected one of: active, closed, pending)")]
pub struct CaseStatusError(pub String);

/// Lifecycle label of a legal case.
///
/// Stored and serialised as lower-case text. New cases default to
/// [`CaseStatus::Active`]; only active cases count towards the dashboard's
/// active-case total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    #[default]
    Active,
    Closed,
    Pending,
}

impl CaseStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Closed, Self::Pending];

    /// The stored text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CaseStatus {
    type Err = CaseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            "pending" => Ok(Self::Pending),
            other => Err(CaseStatusError(other.to_owned())),
        }
    }
}
