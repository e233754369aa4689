use crate::{
    api::{ApiClient, ApiError, AuthUser, LoginRequest},
    config,
    utils::storage::{
        browser_store, SharedStore, PI_TOKEN_COOKIE, PI_TOKEN_KEY, PI_USER_KEY, SSO_TOKEN_COOKIE,
        SSO_USER_KEY,
    },
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Reads and writes the persisted identity. Provided through context so
/// tests can swap the browser store for an in-memory one.
#[derive(Clone)]
pub struct SessionService {
    store: SharedStore,
}

impl SessionService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn browser() -> Self {
        Self::new(browser_store())
    }

    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    /// SSO identity first, then a password-login identity. A blob that does
    /// not parse is dropped from storage.
    pub fn hydrate(&self) -> Option<AuthUser> {
        [SSO_USER_KEY, PI_USER_KEY]
            .into_iter()
            .find_map(|key| self.read_user(key))
    }

    fn read_user(&self, key: &str) -> Option<AuthUser> {
        let raw = self.store.get_item(key)?;
        match serde_json::from_str::<AuthUser>(&raw) {
            Ok(user) => {
                log::debug!("Restored {} session for {}", key, user.username);
                Some(user)
            }
            Err(err) => {
                log::warn!("Discarding unreadable {} entry: {}", key, err);
                self.store.remove_item(key);
                None
            }
        }
    }

    /// Storing one sign-in mode drops the other, so request headers always
    /// match the identity shown.
    pub fn persist_sso(&self, user: &AuthUser) -> Result<(), ApiError> {
        self.forget(&[PI_TOKEN_KEY, PI_USER_KEY], PI_TOKEN_COOKIE);
        self.write_user(SSO_USER_KEY, user)?;
        self.store
            .set_cookie(SSO_TOKEN_COOKIE, &user.token)
            .map_err(ApiError::unknown)
    }

    pub fn persist_login(&self, user: &AuthUser) -> Result<(), ApiError> {
        self.forget(&[SSO_USER_KEY], SSO_TOKEN_COOKIE);
        self.store
            .set_item(PI_TOKEN_KEY, &user.token)
            .map_err(ApiError::unknown)?;
        self.write_user(PI_USER_KEY, user)?;
        self.store
            .set_cookie(PI_TOKEN_COOKIE, &user.token)
            .map_err(ApiError::unknown)
    }

    fn write_user(&self, key: &str, user: &AuthUser) -> Result<(), ApiError> {
        let blob = serde_json::to_string(user)
            .map_err(|e| ApiError::unknown(format!("Failed to serialize user: {}", e)))?;
        self.store.set_item(key, &blob).map_err(ApiError::unknown)
    }

    fn forget(&self, keys: &[&str], cookie: &str) {
        for key in keys {
            self.store.remove_item(key);
        }
        self.store.delete_cookie(cookie);
    }

    pub fn clear(&self) {
        self.forget(&[PI_TOKEN_KEY, PI_USER_KEY], PI_TOKEN_COOKIE);
        self.forget(&[SSO_USER_KEY], SSO_TOKEN_COOKIE);
    }
}

pub fn use_session() -> SessionService {
    use_context::<SessionService>().unwrap_or_else(SessionService::browser)
}

fn create_auth_context(session: &SessionService) -> AuthContext {
    let restored = session.hydrate();
    match &restored {
        Some(user) => log::info!("Session restored for {}", user.username),
        None => log::info!("No stored session"),
    }
    create_signal(restored.map(AuthState::signed_in).unwrap_or_default())
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = use_session();
    let ctx = create_auth_context(&session);
    if use_context::<ApiClient>().is_none() {
        provide_context(ApiClient::new().with_store(session.store()));
    }
    provide_context(session);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn set_sso_user(
    user: AuthUser,
    session: &SessionService,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    log::info!("Starting SSO session for {}", user.username);
    session.persist_sso(&user)?;
    set_auth_state.set(AuthState::signed_in(user));
    Ok(())
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    session: &SessionService,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<AuthUser, ApiError> {
    set_auth_state.update(|state| state.loading = true);

    let result = match api.login(request).await {
        Ok(response) => response.into_auth_user(),
        Err(error) => Err(error),
    }
    .and_then(|user| session.persist_login(&user).map(|_| user));
    match result {
        Ok(user) => {
            set_auth_state.set(AuthState::signed_in(user.clone()));
            Ok(user)
        }
        Err(error) => {
            log::warn!("Login failed: {}", error);
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Drops the session and returns where the browser should go next.
pub fn logout(session: &SessionService, set_auth_state: WriteSignal<AuthState>) -> String {
    log::info!("Logging out");
    session.clear();
    set_auth_state.set(AuthState::signed_out());
    logout_destination(&config::pi_website_url())
}

pub fn logout_destination(pi_website_url: &str) -> String {
    let trimmed = pi_website_url.trim();
    if trimmed.is_empty() {
        "/login".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn redirect_to(target: &str) {
    if let Some(win) = web_sys::window() {
        if let Err(err) = win.location().set_href(target) {
            log::error!("Navigation to {} failed: {:?}", target, err);
        }
    }
}

pub fn use_login_action() -> Action<LoginRequest, Result<AuthUser, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let session = use_session();
    let api = use_context::<ApiClient>()
        .unwrap_or_else(|| ApiClient::new().with_store(session.store()));

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        let session = session.clone();
        async move { login_request(payload, &api, &session, set_auth).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_auth, set_auth) = use_auth();
    let session = use_session();
    Callback::new(move |_| {
        let target = logout(&session, set_auth);
        redirect_to(&target);
    })
}
