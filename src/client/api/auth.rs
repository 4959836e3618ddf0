//! Authentication API

use async_trait::async_trait;

use crate::client::models::{
    Ack, ForgotPasswordRequest, ResetPasswordRequest, SessionUser, SignInRequest,
    SignInResponse, SignUpRequest,
};
use crate::error::Result;

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Sign in and install the returned session
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse>;

    /// Create an account
    async fn sign_up(&self, request: &SignUpRequest) -> Result<Ack>;

    /// End the session on the backend and forget it locally
    async fn logout(&self) -> Result<Ack>;

    /// Who the current token belongs to; fails if the session is invalid
    async fn validate_token(&self) -> Result<SessionUser>;

    /// Send a password-reset email
    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<Ack>;

    /// Complete a password reset with the emailed token
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Ack>;
}
