use crate::api::{ApiError, LoginRequest};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    pub fn to_request(&self) -> Result<LoginRequest, ApiError> {
        let username = self.username.get_untracked();
        let password = self.password.get_untracked();
        validate_credentials(&username, &password)?;
        Ok(LoginRequest {
            username: username.trim().to_string(),
            password,
        })
    }
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Please enter your username"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Please enter your password"));
    }
    Ok(())
}

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Rejected credentials read the same whatever the server said; transport
/// and server faults keep their own message.
pub fn describe_login_failure(err: ApiError) -> ApiError {
    if err.code == "REQUEST_FAILED" || err.code.starts_with("HTTP_5") {
        return err;
    }
    ApiError {
        error: INVALID_CREDENTIALS.to_string(),
        ..err
    }
}
