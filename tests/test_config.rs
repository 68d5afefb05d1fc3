//! Tests for [`utsav_assistant::config`]
//!
//! Env-var tests use a process-wide `Mutex` to run serially even under the
//! default multi-threaded test harness (`cargo test`).

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use utsav_assistant::config::{
    load_config_from_env, Config, CHAT_MAX_OUTPUT_TOKENS, HISTORY_WINDOW, TEMPERATURE,
};
use utsav_assistant::error::UtsavError;

// ── Serialiser ────────────────────────────────────────────────────────────────

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

// ── Helper: guard that restores env vars on drop ──────────────────────────────

struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self { key, original }
    }

    fn remove(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        std::env::remove_var(key);
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

const ALL_VARS: [&str; 8] = [
    "GEMINI_API_KEY",
    "GEMINI_BASE_URL",
    "GEMINI_MODEL",
    "GEMINI_FALLBACK_MODEL",
    "GEMINI_TIMEOUT_SECS",
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "BIND_ADDR",
];

/// Remove every variable the loader reads; restored when the guards drop.
fn clean_env() -> Vec<EnvGuard> {
    ALL_VARS.into_iter().map(EnvGuard::remove).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Test 1: a bare environment loads with defaults and no credentials.
#[test]
fn test_defaults_without_any_vars() {
    let _lock = lock_env();
    let _clean = clean_env();

    let cfg = load_config_from_env().expect("defaults should load");
    assert_eq!(cfg.gemini_api_key, None);
    assert_eq!(cfg.gemini_base_url, "https://generativelanguage.googleapis.com");
    assert_eq!(cfg.gemini_model, "gemini-1.5-flash-latest");
    assert_eq!(cfg.gemini_fallback_model.as_deref(), Some("gemini-1.5-pro-latest"));
    assert_eq!(cfg.request_timeout, Duration::from_secs(20));
    assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
    assert!(cfg.supabase_url.is_none());
}

/// Test 2: every variable is picked up and trimmed.
#[test]
fn test_all_vars_are_read() {
    let _lock = lock_env();
    let _clean = clean_env();
    let _g = [
        EnvGuard::set("GEMINI_API_KEY", " test-mock-key-not-real "),
        EnvGuard::set("GEMINI_BASE_URL", "http://127.0.0.1:9999/"),
        EnvGuard::set("GEMINI_MODEL", "gemini-test"),
        EnvGuard::set("GEMINI_FALLBACK_MODEL", "gemini-test-fallback"),
        EnvGuard::set("GEMINI_TIMEOUT_SECS", "5"),
        EnvGuard::set("SUPABASE_URL", "https://project.supabase.co/"),
        EnvGuard::set("SUPABASE_ANON_KEY", "anon"),
        EnvGuard::set("BIND_ADDR", "127.0.0.1:8080"),
    ];

    let cfg = load_config_from_env().expect("valid env should load");
    assert_eq!(cfg.gemini_api_key.as_deref(), Some("test-mock-key-not-real"));
    assert_eq!(cfg.gemini_base_url, "http://127.0.0.1:9999");
    assert_eq!(cfg.gemini_model, "gemini-test");
    assert_eq!(cfg.gemini_fallback_model.as_deref(), Some("gemini-test-fallback"));
    assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    assert_eq!(cfg.supabase_url.as_deref(), Some("https://project.supabase.co"));
    assert_eq!(cfg.supabase_anon_key.as_deref(), Some("anon"));
    assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
}

/// Test 3: GEMINI_BASE_URL must start with http:// or https://.
#[test]
fn test_base_url_scheme_is_validated() {
    let _lock = lock_env();
    let _clean = clean_env();
    let _g = EnvGuard::set("GEMINI_BASE_URL", "ftp://example.com");

    match load_config_from_env() {
        Err(UtsavError::Config(msg)) => assert!(msg.contains("GEMINI_BASE_URL"), "got: {msg}"),
        other => panic!("expected Config error, got {other:?}"),
    }
}

/// Test 4: an explicitly empty fallback model disables the retry.
#[test]
fn test_empty_fallback_model_disables_retry() {
    let _lock = lock_env();
    let _clean = clean_env();
    let _g = EnvGuard::set("GEMINI_FALLBACK_MODEL", "  ");

    let cfg = load_config_from_env().unwrap();
    assert_eq!(cfg.gemini_fallback_model, None);
}

/// Test 5: unparseable or zero timeouts fall back to the default.
#[test]
fn test_invalid_timeout_uses_default() {
    let _lock = lock_env();
    let _clean = clean_env();

    for bad in ["abc", "0", "-3"] {
        let _g = EnvGuard::set("GEMINI_TIMEOUT_SECS", bad);
        let cfg = load_config_from_env().unwrap();
        assert_eq!(cfg.request_timeout, Duration::from_secs(20), "value {bad:?}");
    }
}

/// Test 6: a blank API key counts as missing.
#[test]
fn test_blank_api_key_is_none() {
    let _lock = lock_env();
    let _clean = clean_env();
    let _g = EnvGuard::set("GEMINI_API_KEY", "   ");

    assert_eq!(load_config_from_env().unwrap().gemini_api_key, None);
}

/// Test 7: the offline config matches the loader's defaults.
#[test]
fn test_offline_matches_defaults() {
    let _lock = lock_env();
    let _clean = clean_env();

    let loaded = load_config_from_env().unwrap();
    let offline = Config::offline();
    assert_eq!(offline.gemini_model, loaded.gemini_model);
    assert_eq!(offline.gemini_base_url, loaded.gemini_base_url);
    assert_eq!(offline.request_timeout, loaded.request_timeout);
}

/// Test 8: model call constants.
#[test]
fn test_model_constants() {
    assert_eq!(HISTORY_WINDOW, 8);
    assert_eq!(CHAT_MAX_OUTPUT_TOKENS, 256);
    assert!((TEMPERATURE - 0.6).abs() < f64::EPSILON);
}
