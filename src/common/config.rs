use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::platform::PlatformKind;

/// How a browser lays out its profile data on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// One profile directory holding the artifact files directly (Chrome, Edge)
    Chromium,
    /// A container directory where every immediate child is a user profile
    /// (Firefox)
    Gecko,
}

/// A browser the eraser knows about. The path may not exist on a given
/// machine; absence is not an error, most machines lack some browsers.
#[derive(Debug, Clone, Serialize)]
pub struct BrowserProfile {
    pub name: String,
    pub path: PathBuf,
    pub kind: ProfileKind,
}

/// Locally cached auth material for one desktop service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCredential {
    pub name: String,
    /// Credential file deleted in step 1, when configured and present.
    pub credential_file: Option<PathBuf>,
    /// Generic credential-store identifiers removed via the OS credential
    /// manager (Windows only).
    pub store_targets: Vec<String>,
}

/// Read-only engine configuration: the browser-profile table, the
/// service-credential table, and the failure-log path. Built once at
/// startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupConfig {
    pub browsers: Vec<BrowserProfile>,
    pub services: Vec<ServiceCredential>,
    pub log_path: PathBuf,
}

impl CleanupConfig {
    /// Superflush data directory (~/.superflush)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".superflush")
    }

    /// Path of the optional override file
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Built-in tables for the given platform, extended by the override
    /// file when one exists.
    pub fn load(platform: &PlatformKind) -> Result<Self> {
        let mut config = Self::defaults(platform);
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let overrides: ConfigFile = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            config.apply(overrides);
        }
        Ok(config)
    }

    /// The fixed built-in tables. Chrome, Edge, and Firefox profile
    /// locations per platform, plus the known desktop-service credentials.
    pub fn defaults(platform: &PlatformKind) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        CleanupConfig {
            browsers: default_browsers(platform, &home),
            services: default_services(platform, &home),
            log_path: PathBuf::from("superflush.log"),
        }
    }

    fn apply(&mut self, overrides: ConfigFile) {
        if let Some(log_path) = overrides.log_path {
            self.log_path = expand_home(&log_path);
        }
        for browser in overrides.browsers {
            self.browsers.push(BrowserProfile {
                name: browser.name,
                path: expand_home(&browser.path),
                kind: browser.kind,
            });
        }
        for service in overrides.services {
            self.services.push(ServiceCredential {
                name: service.name,
                credential_file: service.credential_file.as_deref().map(expand_home),
                store_targets: service.store_targets,
            });
        }
    }
}

fn default_browsers(platform: &PlatformKind, home: &Path) -> Vec<BrowserProfile> {
    let (chrome, edge, firefox) = match platform {
        PlatformKind::Windows => (
            home.join("AppData/Local/Google/Chrome/User Data/Default"),
            home.join("AppData/Local/Microsoft/Edge/User Data/Default"),
            home.join("AppData/Roaming/Mozilla/Firefox/Profiles"),
        ),
        PlatformKind::MacOs => (
            home.join("Library/Application Support/Google/Chrome/Default"),
            home.join("Library/Application Support/Microsoft Edge/Default"),
            home.join("Library/Application Support/Firefox/Profiles"),
        ),
        // Linux layout doubles as the fallback for unrecognized unix-likes.
        _ => (
            home.join(".config/google-chrome/Default"),
            home.join(".config/microsoft-edge/Default"),
            home.join(".mozilla/firefox"),
        ),
    };

    vec![
        BrowserProfile {
            name: "chrome".to_string(),
            path: chrome,
            kind: ProfileKind::Chromium,
        },
        BrowserProfile {
            name: "edge".to_string(),
            path: edge,
            kind: ProfileKind::Chromium,
        },
        BrowserProfile {
            name: "firefox".to_string(),
            path: firefox,
            kind: ProfileKind::Gecko,
        },
    ]
}

fn default_services(platform: &PlatformKind, home: &Path) -> Vec<ServiceCredential> {
    let github_desktop = match platform {
        PlatformKind::Windows => home.join("AppData/Roaming/GitHub Desktop"),
        PlatformKind::MacOs => home.join("Library/Application Support/GitHub Desktop"),
        _ => home.join(".config/GitHub Desktop"),
    };

    vec![
        ServiceCredential {
            name: "GitHub Desktop".to_string(),
            credential_file: Some(github_desktop.join("git-credential-desktop.json")),
            store_targets: vec!["git:".to_string(), "github".to_string()],
        },
        ServiceCredential {
            name: "Chrome".to_string(),
            credential_file: None,
            store_targets: vec!["chrome".to_string()],
        },
        ServiceCredential {
            name: "Edge".to_string(),
            credential_file: None,
            store_targets: vec!["edge".to_string()],
        },
    ]
}

/// Expand a leading ~ to the user's home directory
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// On-disk shape of the optional override file. Entries append to the
/// built-in tables; the tables themselves stay fixed for the process
/// lifetime once loaded.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    log_path: Option<PathBuf>,
    #[serde(default)]
    browsers: Vec<BrowserEntry>,
    #[serde(default)]
    services: Vec<ServiceEntry>,
}

#[derive(Debug, Deserialize)]
struct BrowserEntry {
    name: String,
    path: PathBuf,
    kind: ProfileKind,
}

#[derive(Debug, Deserialize)]
struct ServiceEntry {
    name: String,
    #[serde(default)]
    credential_file: Option<PathBuf>,
    #[serde(default)]
    store_targets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_three_browsers() {
        for platform in [
            PlatformKind::Windows,
            PlatformKind::Linux,
            PlatformKind::MacOs,
        ] {
            let config = CleanupConfig::defaults(&platform);
            let names: Vec<&str> = config.browsers.iter().map(|b| b.name.as_str()).collect();
            assert_eq!(names, vec!["chrome", "edge", "firefox"]);
        }
    }

    #[test]
    fn firefox_is_a_profile_container() {
        let config = CleanupConfig::defaults(&PlatformKind::Linux);
        let firefox = config.browsers.iter().find(|b| b.name == "firefox").unwrap();
        assert_eq!(firefox.kind, ProfileKind::Gecko);
    }

    #[test]
    fn windows_defaults_use_appdata() {
        let config = CleanupConfig::defaults(&PlatformKind::Windows);
        let chrome = config.browsers.iter().find(|b| b.name == "chrome").unwrap();
        assert!(chrome.path.to_string_lossy().contains("AppData"));
    }

    #[test]
    fn log_path_defaults_to_working_directory() {
        let config = CleanupConfig::defaults(&PlatformKind::Linux);
        assert_eq!(config.log_path, PathBuf::from("superflush.log"));
    }

    #[test]
    fn override_file_appends_entries() {
        let mut config = CleanupConfig::defaults(&PlatformKind::Linux);
        let overrides: ConfigFile = toml::from_str(
            r#"
            log_path = "/var/tmp/flush.log"

            [[browsers]]
            name = "brave"
            path = "/home/u/.config/BraveSoftware/Brave-Browser/Default"
            kind = "chromium"

            [[services]]
            name = "Example VPN"
            credential_file = "/home/u/.config/example/creds.json"
            store_targets = ["example"]
            "#,
        )
        .unwrap();
        config.apply(overrides);

        assert_eq!(config.log_path, PathBuf::from("/var/tmp/flush.log"));
        assert_eq!(config.browsers.len(), 4);
        assert_eq!(config.browsers[3].name, "brave");
        assert_eq!(config.browsers[3].kind, ProfileKind::Chromium);
        assert_eq!(config.services.len(), 4);
        assert_eq!(config.services[3].store_targets, vec!["example"]);
    }
}
