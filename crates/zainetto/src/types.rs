use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single homework assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    /// Unique identifier, generated at creation
    pub id: String,

    /// Display name, e.g. "Essay"
    pub name: String,

    /// Subject label, e.g. "English"
    pub subject: String,

    /// When the assignment is due
    #[serde(with = "timestamp")]
    pub deadline: DateTime<Utc>,

    /// Whether the assignment has been completed
    pub completed: bool,

    /// When the assignment was created. Never modified afterwards.
    #[serde(rename = "createdAt", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied fields needed to create an assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub name: String,
    pub subject: String,
    #[serde(with = "timestamp")]
    pub deadline: DateTime<Utc>,
}

impl Assignment {
    /// Build a new assignment from a draft.
    ///
    /// Assigns a fresh unique id and the creation timestamp; `completed`
    /// always starts false.
    pub fn from_draft(draft: AssignmentDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            subject: draft.subject,
            deadline: draft.deadline,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// True when the deadline has passed and the assignment is still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.deadline < now
    }
}

/// Serde helper for timestamp fields.
///
/// Timestamps are persisted as RFC 3339 strings and parsed back into UTC
/// instants on load. Offset input is accepted and normalized to UTC.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
