use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub pi_website_url: Option<String>,
    pub time_zone: Option<String>,
}

impl RuntimeConfig {
    /// Fills unset fields from `other`, keeping values already present.
    pub fn merge(self, other: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(other.api_base_url),
            pi_website_url: self.pi_website_url.or(other.pi_website_url),
            time_zone: self.time_zone.or(other.time_zone),
        }
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn read_global_string(obj: &js_sys::Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(obj, &(*key).into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    })
}

fn snapshot_from_globals() -> Option<RuntimeConfig> {
    // Optional global object: window.__PI_DASHBOARD_ENV = { API_BASE_URL: "...", ... }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__PI_DASHBOARD_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    Some(RuntimeConfig {
        api_base_url: read_global_string(&obj, &["API_BASE_URL", "api_base_url"]),
        pi_website_url: read_global_string(&obj, &["PI_WEBSITE_URL", "pi_website_url"]),
        time_zone: read_global_string(&obj, &["TIME_ZONE", "time_zone"]),
    })
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get(config_json_url()?).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn config_json_url() -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    Some(format!("{}/config.json", origin.trim_end_matches('/')))
}

fn cache(cfg: RuntimeConfig) -> &'static RuntimeConfig {
    let _ = RUNTIME_CONFIG.set(cfg);
    RUNTIME_CONFIG.get_or_init(RuntimeConfig::default)
}

pub async fn await_runtime_config() -> &'static RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached;
    }
    let from_globals = snapshot_from_globals().unwrap_or_default();
    if from_globals.api_base_url.is_some() {
        return cache(from_globals);
    }
    let fetched = fetch_runtime_config().await.unwrap_or_default();
    cache(from_globals.merge(fetched))
}

pub async fn await_api_base_url() -> String {
    await_runtime_config()
        .await
        .api_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// External site users sign in on; logout and unauthenticated visits land here.
pub fn pi_website_url() -> String {
    RUNTIME_CONFIG
        .get()
        .and_then(|cfg| cfg.pi_website_url.clone())
        .unwrap_or_else(|| "/login".to_string())
}

/// Configured application time zone. `None` means the browser's local zone.
pub fn current_time_zone() -> Option<Tz> {
    RUNTIME_CONFIG
        .get()
        .and_then(|cfg| cfg.time_zone.as_deref())
        .and_then(parse_time_zone)
}

pub fn parse_time_zone(name: &str) -> Option<Tz> {
    match name.trim().parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            log::warn!("Ignoring unknown time zone in runtime config: {}", name);
            None
        }
    }
}

pub async fn init() {
    let cfg = await_runtime_config().await;
    log::info!(
        "Runtime config loaded (api_base_url={})",
        cfg.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_existing_values() {
        let globals = RuntimeConfig {
            api_base_url: None,
            pi_website_url: Some("https://pi.example.org".into()),
            time_zone: None,
        };
        let fetched = RuntimeConfig {
            api_base_url: Some("https://api.example.org".into()),
            pi_website_url: Some("https://other.example.org".into()),
            time_zone: Some("Asia/Kolkata".into()),
        };
        let merged = globals.merge(fetched);
        assert_eq!(merged.api_base_url.as_deref(), Some("https://api.example.org"));
        assert_eq!(merged.pi_website_url.as_deref(), Some("https://pi.example.org"));
        assert_eq!(merged.time_zone.as_deref(), Some("Asia/Kolkata"));
    }

    #[test]
    fn parse_time_zone_accepts_iana_names_only() {
        assert_eq!(parse_time_zone("Asia/Kolkata"), Some(chrono_tz::Asia::Kolkata));
        assert_eq!(parse_time_zone(" UTC "), Some(chrono_tz::UTC));
        assert!(parse_time_zone("Mars/Olympus").is_none());
    }

    #[test]
    fn runtime_config_deserializes_partial_json() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url":"https://api.example.org"}"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://api.example.org"));
        assert!(cfg.pi_website_url.is_none());
        assert!(cfg.time_zone.is_none());
    }
}
