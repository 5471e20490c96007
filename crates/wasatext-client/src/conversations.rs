use wasatext_types::api::{ConversationCreated, CreateConversationRequest, MessagesPage};
use wasatext_types::models::{Conversation, ConversationDetails, ConversationView};

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiResult;

impl ApiClient {
    /// GET /users/{username}/conversations
    pub async fn get_conversations(&self, username: &str) -> ApiResult<Option<Vec<Conversation>>> {
        self.send_list(ApiRequest::get(["users", username, "conversations"]))
            .await
    }

    /// GET /conversations/{id}/messages
    pub async fn get_conversation_messages(
        &self,
        conversation_id: &str,
    ) -> ApiResult<Option<MessagesPage>> {
        self.send(ApiRequest::get(["conversations", conversation_id, "messages"]))
            .await
    }

    /// GET /conversations/{id}
    pub async fn get_conversation(&self, conversation_id: &str) -> ApiResult<Option<ConversationView>> {
        self.send(ApiRequest::get(["conversations", conversation_id]))
            .await
    }

    /// GET /conversations/{id}/details
    pub async fn get_conversation_details(
        &self,
        conversation_id: &str,
    ) -> ApiResult<Option<ConversationDetails>> {
        self.send(ApiRequest::get(["conversations", conversation_id, "details"]))
            .await
    }

    /// POST /conversations: one-to-one conversation with `username`.
    pub async fn create_conversation(&self, username: &str) -> ApiResult<Option<ConversationCreated>> {
        let body = CreateConversationRequest {
            participants: vec![username.to_string()],
        };
        self.send(ApiRequest::post(["conversations"]).json(&body)?)
            .await
    }
}
