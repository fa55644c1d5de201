use super::load::default_config_path;
use super::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_groove_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("GROOVE_CONFIG_PATH", "/tmp/groove-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/groove-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("groove")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("groove")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.library.ingest_batch_size, 10);
    assert_eq!(s.ui.auto_navigate_delay_ms, 1500);
    assert_eq!(s.audio.seek_seconds, 10.0);
}

#[test]
fn validate_rejects_zero_batch_and_out_of_range_volume() {
    let mut s = Settings::default();
    s.library.ingest_batch_size = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.seek_seconds = 0.0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_checks_start_view_id() {
    let mut s = Settings::default();
    s.ui.start_view = "now-playing".to_string();
    assert!(s.validate().is_ok());

    s.ui.start_view = "nowplaying".to_string();
    let err = s.validate().unwrap_err();
    assert!(err.contains("ui.start_view"), "{err}");
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.4
seek_seconds = 15.0

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
ingest_batch_size = 25

[ui]
header_text = "hello"
auto_navigate_delay_ms = 0
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("GROOVE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("GROOVE__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume, 0.4);
    assert_eq!(s.audio.seek_seconds, 15.0);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert_eq!(s.library.ingest_batch_size, 25);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.auto_navigate_delay_ms, 0);
    // untouched keys keep their defaults
    assert_eq!(s.ui.tick_ms, 50);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("GROOVE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("GROOVE__AUDIO__VOLUME", "0.25");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume, 0.25);
}
