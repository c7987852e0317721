pub mod auth;
pub mod post;

pub use auth::{ErrorResponse, LoginRequest, LoginResponse, LogoutResponse, UserInfoResponse};
pub use post::{CreatePostRequest, Post};
