use tracing::warn;

use wasatext_types::api::{PhotoUpdated, PhotoUrlRequest, RenameRequest, UserExists, UsernameUpdated};
use wasatext_types::models::UserProfile;

use crate::client::{ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult};
use crate::upload::UploadFile;

impl ApiClient {
    pub async fn get_user_profile(&self, username: &str) -> ApiResult<Option<UserProfile>> {
        self.send(ApiRequest::get(["users", username])).await
    }

    /// PUT /users/{current}. Known rejections come back as
    /// [`ApiError::UsernameTaken`] / [`ApiError::UsernameUnchanged`].
    pub async fn update_username(
        &self,
        current: &str,
        new_name: &str,
    ) -> ApiResult<Option<UsernameUpdated>> {
        let body = RenameRequest {
            new_name: new_name.to_string(),
        };
        self.send(ApiRequest::put(["users", current]).json(&body)?)
            .await
            .map_err(remap_username_error)
    }

    /// Set the profile photo by URL. `None` clears it (sent as `""`).
    pub async fn update_profile_photo(
        &self,
        username: &str,
        photo_url: Option<&str>,
    ) -> ApiResult<Option<PhotoUpdated>> {
        let body = PhotoUrlRequest::new(photo_url);
        self.send(ApiRequest::post(["users", username, "photo"]).json(&body)?)
            .await
    }

    /// Multipart upload under the `photo` field.
    pub async fn upload_profile_photo(
        &self,
        username: &str,
        file: UploadFile,
    ) -> ApiResult<Option<PhotoUpdated>> {
        let form = file.into_form("photo")?;
        self.send(ApiRequest::post(["users", username, "photo"]).multipart(form))
            .await
    }

    /// Never fails: anything other than a decoded `{"exists": true}` is
    /// `false`, so "unknown user" and "could not check" look the same.
    pub async fn check_user_exists(&self, username: &str) -> bool {
        match self
            .send::<UserExists>(ApiRequest::get(["users", username, "exists"]))
            .await
        {
            Ok(Some(UserExists { exists })) => exists,
            Ok(None) => false,
            Err(e) => {
                warn!("Existence check for '{}' failed: {}", username, e);
                false
            }
        }
    }

    /// GET /allusers
    pub async fn get_all_users(&self) -> ApiResult<Option<Vec<UserProfile>>> {
        self.send_list(ApiRequest::get(["allusers"])).await
    }
}

/// Map the backend's plain-text username rejections to dedicated errors.
/// Everything else, including other failure bodies, passes through untouched.
pub fn remap_username_error(err: ApiError) -> ApiError {
    match &err {
        ApiError::RequestFailed { body, .. } if body.contains("already taken") => {
            ApiError::UsernameTaken
        }
        ApiError::RequestFailed { body, .. } if body.contains("same as current") => {
            ApiError::UsernameUnchanged
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(status: u16, body: &str) -> ApiError {
        ApiError::RequestFailed {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn taken_username_is_remapped() {
        let err = remap_username_error(failed(
            409,
            "username 'bob' is already taken, please choose a different one\n",
        ));
        assert!(matches!(err, ApiError::UsernameTaken));
    }

    #[test]
    fn unchanged_username_is_remapped() {
        let err = remap_username_error(failed(400, "new username is the same as current username\n"));
        assert!(matches!(err, ApiError::UsernameUnchanged));
    }

    #[test]
    fn other_failures_pass_through() {
        let err = remap_username_error(failed(400, "Invalid new_name length\n"));
        match err {
            ApiError::RequestFailed { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "Invalid new_name length\n");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = remap_username_error(ApiError::InvalidCredential);
        assert!(matches!(err, ApiError::InvalidCredential));
    }
}
