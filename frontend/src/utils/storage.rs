use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage, Window};

pub const PI_TOKEN_KEY: &str = "pi_token";
pub const PI_USER_KEY: &str = "pi_user";
pub const SSO_USER_KEY: &str = "sso_user";
pub const SSO_TOKEN_COOKIE: &str = "sso_token";
pub const PI_TOKEN_COOKIE: &str = "pi_token";
pub const COOKIE_MAX_AGE_DAYS: i64 = 7;

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

fn html_document() -> Result<HtmlDocument, String> {
    window()?
        .document()
        .ok_or_else(|| "No document".to_string())?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| "Document is not an HTML document".to_string())
}

/// Key/value persistence for the session: local storage plus the cookie
/// mirror read by route checks.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str);
    fn set_cookie(&self, name: &str, value: &str) -> Result<(), String>;
    fn delete_cookie(&self, name: &str);
}

pub type SharedStore = Rc<dyn KeyValueStore>;

pub fn build_cookie(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={};expires={};path=/",
        name,
        value,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

pub fn expired_cookie(name: &str) -> String {
    format!("{}=;expires=Thu, 01 Jan 1970 00:00:00 GMT;path=/", name)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| format!("Failed to write {} to localStorage", key))
    }

    fn remove_item(&self, key: &str) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn set_cookie(&self, name: &str, value: &str) -> Result<(), String> {
        let expires = Utc::now() + Duration::days(COOKIE_MAX_AGE_DAYS);
        html_document()?
            .set_cookie(&build_cookie(name, value, expires))
            .map_err(|_| format!("Failed to set cookie {}", name))
    }

    fn delete_cookie(&self, name: &str) {
        if let Ok(doc) = html_document() {
            let _ = doc.set_cookie(&expired_cookie(name));
        }
    }
}

pub fn browser_store() -> SharedStore {
    Rc::new(BrowserStorage)
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    cookies: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    fn set_cookie(&self, name: &str, value: &str) -> Result<(), String> {
        self.cookies
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete_cookie(&self, name: &str) {
        self.cookies.borrow_mut().remove(name);
    }
}
