use super::load::{default_config_path, resolve_config_path, xdg_dir};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
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
fn resolve_config_path_prefers_canto_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CANTO_CONFIG_PATH", "/tmp/canto-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/canto-test-config.toml")
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
            .join("canto")
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
            .join("canto")
            .join("config.toml")
    );
}

#[test]
fn xdg_dir_ignores_empty_xdg_value_and_needs_some_base() {
    assert_eq!(
        xdg_dir(Some("".into()), Some("/home/u".into()), ".local/state"),
        Some(std::path::PathBuf::from("/home/u/.local/state/canto"))
    );
    assert_eq!(xdg_dir(None, None, ".config"), None);
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.audio.initial_volume, 1.0);
    assert_eq!(s.library.unknown_artist, "Unknown Artist");
    assert_eq!(s.ui.placeholder_title, "Audio Title");
    assert!(!s.ui.show_playlist);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.scrub_seconds = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec!["  ".into()];
    assert!(s.validate().is_err());
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
initial_volume = 0.5
volume_step = 0.1

[controls]
scrub_seconds = 10

[ui]
header_text = "night shift"
show_playlist = true

[library]
extensions = ["flac", "opus"]
recursive = false
unknown_artist = "Anon"

[log]
level = "debug"
file = "/tmp/canto.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CANTO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CANTO__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 0.5);
    assert_eq!(s.audio.volume_step, 0.1);
    assert_eq!(s.audio.tick_ms, 250);
    assert_eq!(s.controls.scrub_seconds, 10);
    assert_eq!(s.ui.header_text, "night shift");
    assert!(s.ui.show_playlist);
    assert_eq!(s.library.extensions, vec!["flac".to_string(), "opus".to_string()]);
    assert!(!s.library.recursive);
    assert_eq!(s.library.unknown_artist, "Anon");
    assert_eq!(s.log.level, "debug");
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/canto.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
scrub_seconds = 5
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CANTO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CANTO__CONTROLS__SCRUB_SECONDS", "12");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.scrub_seconds, 12);
}

#[test]
fn effective_settings_render_as_toml() {
    let rendered = Settings::default().to_toml().unwrap();
    assert!(rendered.contains("[audio]"));
    assert!(rendered.contains("unknown_artist = \"Unknown Artist\""));
    assert!(!rendered.contains("max_depth"));
}
