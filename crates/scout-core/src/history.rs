use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

impl std::str::FromStr for Speaker {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(format!("unknown speaker: {other}")),
        }
    }
}

/// One recorded turn in a session's conversation log. Entries are appended
/// in chronological order and never edited or removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub text: String,
    pub created_at: String,
}

impl HistoryEntry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_serde() {
        assert_eq!(serde_json::to_string(&Speaker::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Speaker::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn speaker_roundtrips_through_display() {
        for speaker in [Speaker::User, Speaker::Assistant] {
            let parsed: Speaker = speaker.to_string().parse().unwrap();
            assert_eq!(speaker, parsed);
        }
    }

    #[test]
    fn unknown_speaker_rejected() {
        assert!("narrator".parse::<Speaker>().is_err());
    }

    #[test]
    fn entry_carries_timestamp() {
        let entry = HistoryEntry::new(Speaker::User, "hello");
        assert_eq!(entry.speaker, Speaker::User);
        assert_eq!(entry.text, "hello");
        assert!(entry.created_at.contains('T'), "not RFC3339: {}", entry.created_at);
    }
}
