use wasatext_types::api::AddReactionRequest;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiResult;

impl ApiClient {
    /// Set the caller's reaction on a message. A user holds one reaction per
    /// message, so this replaces any earlier one. The backend replies with an
    /// empty 201, which reads as `None`.
    pub async fn add_reaction(
        &self,
        message_id: &str,
        emoji: &str,
        conversation_id: &str,
    ) -> ApiResult<Option<serde_json::Value>> {
        let body = AddReactionRequest {
            reaction: emoji.to_string(),
        };
        let request = ApiRequest::post([
            "conversations",
            conversation_id,
            "messages",
            message_id,
            "reactions",
        ])
        .json(&body)?;

        self.send(request).await
    }

    pub async fn delete_reaction(
        &self,
        message_id: &str,
        conversation_id: &str,
    ) -> ApiResult<Option<serde_json::Value>> {
        self.send(ApiRequest::delete([
            "conversations",
            conversation_id,
            "messages",
            message_id,
            "reactions",
        ]))
        .await
    }
}
