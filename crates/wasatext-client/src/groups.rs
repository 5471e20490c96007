use wasatext_types::api::{CreateGroupRequest, GroupCreated, PhotoUpdated, RenameRequest};

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiResult;
use crate::upload::UploadFile;

impl ApiClient {
    pub async fn create_group(&self, name: &str, members: &[String]) -> ApiResult<Option<GroupCreated>> {
        let body = CreateGroupRequest {
            name: name.to_string(),
            members: members.to_vec(),
        };
        self.send(ApiRequest::post(["groups"]).json(&body)?).await
    }

    pub async fn update_group_name(
        &self,
        group_id: &str,
        name: &str,
    ) -> ApiResult<Option<serde_json::Value>> {
        let body = RenameRequest {
            new_name: name.to_string(),
        };
        self.send(ApiRequest::post(["groups", group_id]).json(&body)?)
            .await
    }

    /// Multipart upload under the `photo` field.
    pub async fn update_group_photo(
        &self,
        group_id: &str,
        file: UploadFile,
    ) -> ApiResult<Option<PhotoUpdated>> {
        let form = file.into_form("photo")?;
        self.send(ApiRequest::post(["groups", group_id, "photo"]).multipart(form))
            .await
    }

    pub async fn leave_group(&self, group_id: &str) -> ApiResult<Option<serde_json::Value>> {
        self.send(ApiRequest::post(["groups", group_id, "leave"]))
            .await
    }
}
