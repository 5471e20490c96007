use wasatext_types::api::{ContentRequest, MessageCreated};
use wasatext_types::models::Message;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiResult;
use crate::upload::UploadFile;

impl ApiClient {
    pub async fn send_message(
        &self,
        conversation_id: &str,
        content: &str,
    ) -> ApiResult<Option<MessageCreated>> {
        let body = ContentRequest {
            content: content.to_string(),
        };
        self.send(ApiRequest::post(["conversations", conversation_id, "messages"]).json(&body)?)
            .await
    }

    /// The backend answers 204 on success.
    pub async fn delete_message(
        &self,
        conversation_id: &str,
        message_id: &str,
    ) -> ApiResult<Option<serde_json::Value>> {
        self.send(ApiRequest::delete([
            "conversations",
            conversation_id,
            "messages",
            message_id,
        ]))
        .await
    }

    /// Returns the copy created by the backend.
    pub async fn forward_message(
        &self,
        conversation_id: &str,
        message_id: &str,
    ) -> ApiResult<Option<Message>> {
        self.send(ApiRequest::post([
            "conversations",
            conversation_id,
            "messages",
            message_id,
            "forward",
        ]))
        .await
    }

    pub async fn reply_to_message(
        &self,
        conversation_id: &str,
        message_id: &str,
        content: &str,
    ) -> ApiResult<Option<MessageCreated>> {
        let body = ContentRequest {
            content: content.to_string(),
        };
        let request = ApiRequest::post([
            "conversations",
            conversation_id,
            "messages",
            message_id,
            "reply",
        ])
        .json(&body)?;

        self.send(request).await
    }

    /// Multipart upload under the `image` field.
    pub async fn send_image_message(
        &self,
        conversation_id: &str,
        file: UploadFile,
    ) -> ApiResult<Option<MessageCreated>> {
        let form = file.into_form("image")?;
        self.send(ApiRequest::post(["conversations", conversation_id, "image-message"]).multipart(form))
            .await
    }
}
