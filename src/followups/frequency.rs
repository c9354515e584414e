//! Frequency policy: how often a connection should be contacted, and when the
//! next follow-up falls due.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How often to follow up with a connection.
///
/// Stored as a lowercase string in the `connections` table. Anything
/// unrecognized decodes to `None` so malformed stored data can never wedge the
/// scheduler — a connection with garbage frequency simply has no schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpFrequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    None,
}

impl FollowUpFrequency {
    /// Parse a stored frequency string, degrading to `None` on anything
    /// unrecognized.
    pub fn from_str_lossy(raw: &str) -> Self {
        match raw {
            "weekly" => Self::Weekly,
            "biweekly" => Self::Biweekly,
            "monthly" => Self::Monthly,
            "quarterly" => Self::Quarterly,
            _ => Self::None,
        }
    }

    /// The string form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::None => "none",
        }
    }

    /// Fixed day offset between contacts, or `None` for no recurring schedule.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Weekly => Some(7),
            Self::Biweekly => Some(14),
            Self::Monthly => Some(30),
            Self::Quarterly => Some(90),
            Self::None => None,
        }
    }

    /// Compute the next due instant from a reference instant, or `None` when
    /// there is no recurring schedule.
    pub fn next_due(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|days| from + Duration::days(days))
    }
}
