use super::utils::{describe_login_failure, LoginFormState};
use crate::api::{ApiError, AuthUser, LoginRequest};
use crate::state::auth;
use leptos::*;

pub const AFTER_LOGIN_PATH: &str = "/dashboard";

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<AuthUser, ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(user) => {
                    log::info!("Signed in as {}", user.username);
                    error.set(None);
                    form.password.set(String::new());
                    auth::redirect_to(AFTER_LOGIN_PATH);
                }
                Err(err) => error.set(Some(describe_login_failure(err))),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            provide_auth(None);
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.username.get().is_empty());
        });
    }

    #[test]
    fn submit_with_blank_username_sets_validation_error() {
        with_runtime(|| {
            provide_auth(None);
            let vm = use_login_view_model();
            vm.form.password.set("pw".into());
            vm.submit();
            let err = vm.error.get().expect("validation error");
            assert_eq!(err.code, "VALIDATION_ERROR");
            assert!(!vm.login_action.pending().get());
        });
    }
}
