use serde::{Deserialize, Serialize};

use crate::models::{Message, null_as_empty};

// -- Session --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

// -- Conversations --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationCreated {
    pub conversation_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<Message>,
}

// -- Messages --

/// Body of both `sendMessage` and `replyToMessage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCreated {
    pub message_id: String,
    /// Only set for image messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// -- Reactions --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddReactionRequest {
    pub reaction: String,
}

// -- Groups --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCreated {
    pub group_id: String,
}

/// Rename payload shared by `updateGroupName` and `updateUsername`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRequest {
    pub new_name: String,
}

// -- Users --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsernameUpdated {
    #[serde(default)]
    pub message: String,
    pub username: String,
}

/// `photo_url` is always a string on the wire; clearing the photo sends `""`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUrlRequest {
    pub photo_url: String,
}

impl PhotoUrlRequest {
    pub fn new(photo_url: Option<&str>) -> Self {
        Self {
            photo_url: photo_url.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUpdated {
    #[serde(default)]
    pub photo_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserExists {
    pub exists: bool,
}
