use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a leave request.
///
/// `Pending` is the only non-terminal state; the two transitions are
/// `pending -> approved` and `pending -> rejected`. Nothing leads out of a
/// terminal state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_pending(self) -> bool {
        self == LeaveStatus::Pending
    }

    /// Legal transitions: pending may become approved or rejected, and
    /// nothing else moves.
    pub fn can_transition_to(self, next: LeaveStatus) -> bool {
        self.is_pending() && !next.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_forms_round_trip() {
        for status in [
            LeaveStatus::Pending,
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
        ] {
            assert_eq!(LeaveStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(LeaveStatus::from_str("cancelled"), None);
    }

    #[test]
    fn only_pending_moves() {
        assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Approved));
        assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Rejected));

        for terminal in [LeaveStatus::Approved, LeaveStatus::Rejected] {
            assert!(!terminal.can_transition_to(LeaveStatus::Approved));
            assert!(!terminal.can_transition_to(LeaveStatus::Rejected));
            assert!(!terminal.can_transition_to(LeaveStatus::Pending));
        }
        assert!(!LeaveStatus::Pending.can_transition_to(LeaveStatus::Pending));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
