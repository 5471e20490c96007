use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A conversation as listed under `/users/{username}/conversations`.
/// Group conversations carry a name and an optional photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(alias = "id")]
    pub conversation_id: String,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default, deserialize_with = "zero_time_as_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `GET /conversations/{id}`. Depending on the backend build this is
/// either the conversation header or a `{ messages }` page, so every field
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationView {
    #[serde(default, alias = "conversation_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetails {
    #[serde(alias = "id")]
    pub conversation_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A message belongs to exactly one conversation. Reactions are keyed by the
/// reacting user: a user holds at most one reaction per message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(alias = "id")]
    pub message_id: String,
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "zero_time_as_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarded_from: Option<String>,
}

impl Message {
    pub fn reaction_of(&self, user_id: &str) -> Option<&str> {
        self.reactions
            .iter()
            .find(|r| r.user_id == user_id)
            .map(|r| r.reaction.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub user_id: String,
    pub reaction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Returned by `POST /session`. `session_id` is the bearer credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub session_id: String,
}

/// `0001-01-01T00:00:00Z`, what the backend writes for an unset time.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// The backend writes `""` for "no photo".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Empty lists arrive as `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// A conversation with no messages yet carries the zero time.
fn zero_time_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<DateTime<Utc>> = Option::deserialize(deserializer)?;
    Ok(value.filter(|t| t.timestamp() != ZERO_TIME_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_accepts_either_id_key() {
        let a: Conversation =
            serde_json::from_str(r#"{"conversation_id":"c1","participants":["a","b"]}"#).unwrap();
        let b: Conversation =
            serde_json::from_str(r#"{"id":"c1","participants":["a","b"]}"#).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_group);
        assert_eq!(a.photo_url, None);
    }

    #[test]
    fn empty_photo_url_is_absent() {
        let p: UserProfile = serde_json::from_str(r#"{"username":"ann","photo_url":""}"#).unwrap();
        assert_eq!(p.photo_url, None);

        let p: UserProfile =
            serde_json::from_str(r#"{"username":"ann","photo_url":"/uploads/a.png"}"#).unwrap();
        assert_eq!(p.photo_url.as_deref(), Some("/uploads/a.png"));
    }

    #[test]
    fn message_without_id_is_rejected() {
        let res: Result<Message, _> = serde_json::from_str(r#"{"content":"hi"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn message_reactions_keyed_by_user() {
        let m: Message = serde_json::from_str(
            r#"{
                "message_id": "m1",
                "conversation_id": "c1",
                "sender": "ann",
                "content": "hello",
                "timestamp": "2024-11-02T10:00:00Z",
                "reactions": [{"user_id": "bob", "reaction": "👍"}]
            }"#,
        )
        .unwrap();
        assert_eq!(m.reaction_of("bob"), Some("👍"));
        assert_eq!(m.reaction_of("ann"), None);
        assert!(m.timestamp.is_some());
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let d: ConversationDetails = serde_json::from_str(
            r#"{"conversation_id":"g1","participants":null,"is_group":true}"#,
        )
        .unwrap();
        assert!(d.participants.is_empty());

        let m: Message =
            serde_json::from_str(r#"{"message_id":"m1","reactions":null}"#).unwrap();
        assert!(m.reactions.is_empty());

        let v: ConversationView = serde_json::from_str(r#"{"messages":null}"#).unwrap();
        assert!(v.messages.is_empty());
    }

    #[test]
    fn zero_timestamp_is_absent() {
        let c: Conversation = serde_json::from_str(
            r#"{"conversation_id":"c1","last_message":"","timestamp":"0001-01-01T00:00:00Z","participants":["ann","bob"],"is_group":false}"#,
        )
        .unwrap();
        assert_eq!(c.timestamp, None);

        let c: Conversation = serde_json::from_str(
            r#"{"conversation_id":"c1","timestamp":"2024-11-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(c.timestamp.is_some());
    }

    #[test]
    fn conversation_view_from_header_or_page() {
        let header: ConversationView =
            serde_json::from_str(r#"{"id":"c1","participants":["a","b"]}"#).unwrap();
        assert_eq!(header.id.as_deref(), Some("c1"));
        assert_eq!(header.participants, vec!["a", "b"]);

        let page: ConversationView =
            serde_json::from_str(r#"{"messages":[{"message_id":"m1","content":"x"}]}"#).unwrap();
        assert_eq!(page.id, None);
        assert_eq!(page.messages.len(), 1);
    }
}
