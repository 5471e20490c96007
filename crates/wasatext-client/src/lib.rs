//! Authenticated REST client for the WASAText messaging backend.
//!
//! Every operation is a single round trip through [`ApiClient::send`]: the
//! current session token is read from the injected [`SessionStore`], attached
//! as a bearer credential, and the response is decoded into a typed record.
//! Nothing is cached between calls.
//!
//! [`SessionStore`]: wasatext_store::SessionStore

pub mod client;
pub mod config;
pub mod conversations;
pub mod error;
pub mod groups;
pub mod messages;
pub mod reactions;
pub mod session;
pub mod upload;
pub mod users;

pub use client::{ApiClient, ApiRequest};
pub use config::{ClientConfig, PageLocation};
pub use error::{ApiError, ApiResult};
pub use upload::UploadFile;
pub use users::remap_username_error;
