//! Application status vocabulary.
//!
//! The values must match the `ck_applications_status` constraint in
//! `20261001000005_create_applications_table.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of an internship application.
///
/// ```text
/// submitted -> under_review -> interview_scheduled -> accepted | rejected
/// ```
///
/// Transitions are driven by the applicant; any status may be set from any
/// other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    InterviewScheduled,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ApplicationStatus; 5] = [
        Self::Submitted,
        Self::UnderReview,
        Self::InterviewScheduled,
        Self::Accepted,
        Self::Rejected,
    ];

    /// Parse a status string from a request or the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "interview_scheduled" => Ok(Self::InterviewScheduled),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: submitted, under_review, \
                 interview_scheduled, accepted, rejected"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// `true` once a decision has been recorded.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default tracking note written when a status changes without an explicit note.
pub fn default_transition_note(status: ApplicationStatus) -> String {
    format!("Status changed to {status}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_from_str_valid() {
        assert_eq!(
            ApplicationStatus::from_str_db("submitted").unwrap(),
            ApplicationStatus::Submitted
        );
        assert_eq!(
            ApplicationStatus::from_str_db("interview_scheduled").unwrap(),
            ApplicationStatus::InterviewScheduled
        );
    }

    #[test]
    fn alternate_lexicon_is_rejected() {
        for legacy in ["applied", "interview"] {
            assert_matches!(
                ApplicationStatus::from_str_db(legacy),
                Err(CoreError::Validation(msg)) if msg.contains(legacy)
            );
        }
    }

    #[test]
    fn status_is_case_sensitive() {
        assert!(ApplicationStatus::from_str_db("Submitted").is_err());
        assert!(ApplicationStatus::from_str_db("").is_err());
    }

    #[test]
    fn status_as_str_roundtrip() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ApplicationStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        let parsed: ApplicationStatus = serde_json::from_str("\"interview_scheduled\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::InterviewScheduled);
    }

    #[test]
    fn only_decisions_are_final() {
        assert!(ApplicationStatus::Accepted.is_final());
        assert!(ApplicationStatus::Rejected.is_final());
        assert!(!ApplicationStatus::InterviewScheduled.is_final());
    }

    #[test]
    fn default_note_names_the_status() {
        assert_eq!(
            default_transition_note(ApplicationStatus::Rejected),
            "Status changed to rejected"
        );
    }
}
