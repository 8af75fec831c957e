use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review verdict reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// The newest homework entry of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkRecord {
    pub id: Option<i64>,
    pub homework_name: String,
    pub verdict: Verdict,
    pub reviewer_comment: Option<String>,
    pub date_updated: Option<DateTime<Utc>>,
}

/// A payload that passed the structural checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload {
    pub homeworks: Vec<serde_json::Value>,
    pub current_date: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub record: HomeworkRecord,
    pub message: String,
}

/// Cursor and de-duplication memory kept for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedState {
    pub last_status_message: Option<String>,
    pub last_error_message: Option<String>,
    pub cursor: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_codes_round_trip() {
        for verdict in [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected] {
            assert_eq!(Verdict::from_code(verdict.code()), Some(verdict));
        }
        assert_eq!(Verdict::from_code("unknown_code"), None);
        assert_eq!(Verdict::from_code("Approved"), None);
    }

    #[test]
    fn test_verdict_deserializes_from_lowercase_code() {
        let verdict: Verdict = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(verdict, Verdict::Rejected);
        assert!(verdict.description().contains("замечания"));
    }
}
