use super::{
    client::ApiClient,
    types::{ApiError, AuthUser, LoginRequest, LoginResponse},
};

impl ApiClient {
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("/pi/login").await;
        self.send_json(self.http_client().post(url).json(&request))
            .await
    }
}

impl LoginResponse {
    /// Session identity for a successful login; a response without a token
    /// or user cannot start a session.
    pub fn into_auth_user(self) -> Result<AuthUser, ApiError> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unknown("Login response did not include a token"))?;
        let user = self
            .user
            .ok_or_else(|| ApiError::unknown("Login response did not include a user"))?;

        let mut projects = user.projects;
        let project_code = match user.project_code.filter(|c| !c.is_empty()) {
            Some(code) => {
                if !projects.contains(&code) {
                    projects.insert(0, code.clone());
                }
                code
            }
            None => projects.first().cloned().unwrap_or_default(),
        };

        Ok(AuthUser {
            username: user.username,
            project_code,
            projects,
            token,
            is_sso: false,
        })
    }
}
