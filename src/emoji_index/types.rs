use serde::{Deserialize, Serialize};

/// A bare emoji short-code such as `robot_face`, without the surrounding colons.
pub type EmojiName = String;

/// The two fields of a Slack message the emoji index looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub user: Option<String>,
    pub text: Option<String>,
}

impl RawMessage {
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            text: Some(text.into()),
        }
    }

    /// Build a message from a Slack message JSON object (`user` and `text` keys).
    pub fn from_slack_json(message: &serde_json::Value) -> Self {
        Self {
            user: message
                .get("user")
                .and_then(|u| u.as_str())
                .map(|s| s.to_string()),
            text: message
                .get("text")
                .and_then(|t| t.as_str())
                .map(|s| s.to_string()),
        }
    }
}

/// A workspace member as listed by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: String,
    pub display_name: String,
    pub deleted: bool,
    pub is_bot: bool,
}

impl RawUser {
    /// Validate a Slack user JSON object.
    ///
    /// The name is taken from `profile.real_name`, then `real_name`,
    /// `profile.display_name` and finally `name`. Returns `None` when the
    /// object has no `id` or no usable name.
    pub fn from_slack_json(user: &serde_json::Value) -> Option<Self> {
        let id = user.get("id")?.as_str()?.to_string();
        let profile = user.get("profile");
        let display_name = non_empty_str(profile.and_then(|p| p.get("real_name")))
            .or_else(|| non_empty_str(user.get("real_name")))
            .or_else(|| non_empty_str(profile.and_then(|p| p.get("display_name"))))
            .or_else(|| non_empty_str(user.get("name")))?
            .to_string();

        Some(Self {
            id,
            display_name,
            deleted: user.get("deleted").and_then(|d| d.as_bool()).unwrap_or(false),
            is_bot: user.get("is_bot").and_then(|b| b.as_bool()).unwrap_or(false),
        })
    }
}

fn non_empty_str(value: Option<&serde_json::Value>) -> Option<&str> {
    value.and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

/// A channel entry from the channel list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChannel {
    pub id: String,
    pub name: String,
    pub is_member: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_message_from_slack_json() {
        let message = json!({
            "type": "message",
            "text": "should we revisit the design :slightly_smiling_face:?",
            "user": "UBQPZ57AM",
            "ts": "1537377080.000100"
        });

        let raw = RawMessage::from_slack_json(&message);

        assert_eq!(raw.user.as_deref(), Some("UBQPZ57AM"));
        assert_eq!(
            raw.text.as_deref(),
            Some("should we revisit the design :slightly_smiling_face:?")
        );
    }

    #[test]
    fn test_raw_message_from_bot_message_has_no_user() {
        let message = json!({"type": "message", "subtype": "bot_message", "text": ":tada:"});

        let raw = RawMessage::from_slack_json(&message);

        assert!(raw.user.is_none());
        assert_eq!(raw.text.as_deref(), Some(":tada:"));
    }

    #[test]
    fn test_raw_user_prefers_profile_real_name() {
        let user = json!({
            "id": "UT16EAU4V",
            "name": "afvolpert",
            "deleted": false,
            "profile": {"real_name": "Alex", "display_name": "alex"},
            "is_bot": false
        });

        let raw = RawUser::from_slack_json(&user).unwrap();

        assert_eq!(raw.id, "UT16EAU4V");
        assert_eq!(raw.display_name, "Alex");
        assert!(!raw.deleted);
        assert!(!raw.is_bot);
    }

    #[test]
    fn test_raw_user_falls_back_to_name() {
        let user = json!({"id": "U1", "name": "german.capuano", "deleted": true});

        let raw = RawUser::from_slack_json(&user).unwrap();

        assert_eq!(raw.display_name, "german.capuano");
        assert!(raw.deleted);
        assert!(!raw.is_bot);
    }

    #[test]
    fn test_raw_user_skips_empty_real_name() {
        let user = json!({"id": "U3", "name": "toast", "profile": {"real_name": ""}});

        let raw = RawUser::from_slack_json(&user).unwrap();

        assert_eq!(raw.display_name, "toast");
    }

    #[test]
    fn test_raw_user_without_id_is_rejected() {
        let user = json!({"name": "ghost", "profile": {"real_name": "Ghost"}});

        assert!(RawUser::from_slack_json(&user).is_none());
    }

    #[test]
    fn test_raw_user_without_name_is_rejected() {
        let user = json!({"id": "U2", "profile": {"real_name": ""}});

        assert!(RawUser::from_slack_json(&user).is_none());
    }
}
