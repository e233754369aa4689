use crate::api::{ApiError, AuthUser};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use thiserror::Error;

/// Accepted clock skew for the handoff timestamp, in both directions.
pub const SSO_MAX_AGE_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SsoError {
    #[error("No SSO token provided")]
    Missing,
    #[error("Invalid SSO token")]
    InvalidToken,
    #[error("Invalid SSO data")]
    InvalidData,
    #[error("SSO token has expired")]
    Expired,
}

impl From<SsoError> for ApiError {
    fn from(err: SsoError) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SsoPayload {
    username: Option<String>,
    project_codes: Option<Vec<String>>,
    timestamp: Option<f64>,
}

/// Compared in floating point so extreme timestamps cannot overflow.
fn within_max_age(issued_at: f64, now_ms: i64) -> bool {
    issued_at.is_finite() && (now_ms as f64 - issued_at).abs() <= SSO_MAX_AGE_MS as f64
}

fn decode_payload(raw: &str) -> Result<SsoPayload, SsoError> {
    let unescaped = percent_decode_str(raw.trim())
        .decode_utf8()
        .map_err(|_| SsoError::InvalidToken)?;
    let bytes = STANDARD
        .decode(unescaped.as_bytes())
        .map_err(|_| SsoError::InvalidToken)?;
    serde_json::from_slice(&bytes).map_err(|_| SsoError::InvalidToken)
}

/// Turns the `?token=` handoff into a session identity.
pub fn decode_sso_token(raw: &str, now_ms: i64) -> Result<AuthUser, SsoError> {
    if raw.trim().is_empty() {
        return Err(SsoError::Missing);
    }
    let payload = decode_payload(raw)?;

    let username = payload
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or(SsoError::InvalidData)?;
    let projects = payload
        .project_codes
        .filter(|codes| !codes.is_empty())
        .ok_or(SsoError::InvalidData)?;
    let issued_at = payload.timestamp.ok_or(SsoError::InvalidData)?;

    if !within_max_age(issued_at, now_ms) {
        log::warn!("Rejecting SSO handoff for {} issued at {}", username, issued_at);
        return Err(SsoError::Expired);
    }

    Ok(AuthUser {
        project_code: projects[0].clone(),
        projects,
        username,
        token: format!("sso-{}", now_ms),
        is_sso: true,
    })
}
