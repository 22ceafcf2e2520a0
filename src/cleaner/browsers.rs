use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use super::fsops::{self, DeletePolicy};
use crate::common::config::{BrowserProfile, CleanupConfig, ProfileKind};
use crate::common::errors::CleanupError;
use crate::common::oplog::FailureLog;

/// Fixed set of known deletable sub-paths within a profile directory.
/// Chromium-family browsers keep history, cookies, and saved logins as
/// SQLite files and the cache as a directory.
pub const PROFILE_ARTIFACTS: &[&str] = &["History", "Cookies", "Login Data", "Cache"];

/// Delete known artifacts for every configured browser whose profile path
/// exists on disk. Returns one error string per browser that failed; an
/// empty vec is full success. Browsers that are not installed are skipped
/// without comment, and a failure in one browser never stops the next.
///
/// Running twice in succession is clean: paths removed by the first run
/// are absent for the second, hence skipped.
pub fn clear_browser_data(config: &CleanupConfig, log: &dyn FailureLog) -> Vec<String> {
    let mut errors = Vec::new();
    for browser in &config.browsers {
        if !browser.path.exists() {
            debug!(browser = %browser.name, "profile path absent, skipping");
            continue;
        }
        if let Err(e) = clear_profile(browser) {
            let msg = format!("{}: {}", browser.name, e);
            log.append(&msg);
            errors.push(msg);
        }
    }
    errors
}

fn clear_profile(browser: &BrowserProfile) -> Result<(), CleanupError> {
    for artifact in PROFILE_ARTIFACTS {
        let target = browser.path.join(artifact);
        if !target.exists() {
            continue;
        }
        if target.is_dir() {
            // Whole-directory removal tolerates stray locked entries;
            // a failed file removal is surfaced.
            fsops::remove_tree(&target, DeletePolicy::BestEffort)?;
        } else {
            fsops::remove_file(&target)?;
        }
    }
    if browser.kind == ProfileKind::Gecko {
        wipe_contained_profiles(browser)?;
    }
    Ok(())
}

/// Gecko keeps one sub-directory per user profile under the container
/// root; each is removed wholesale. Loose files next to the profile
/// directories (profiles.ini and friends) are left alone.
fn wipe_contained_profiles(browser: &BrowserProfile) -> Result<(), CleanupError> {
    let entries = fs::read_dir(&browser.path).map_err(|e| CleanupError::FilesystemAccess {
        path: browser.path.clone(),
        source: e,
    })?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            fsops::remove_tree(&path, DeletePolicy::BestEffort)?;
        }
    }
    Ok(())
}

/// Read-only sizing report for one configured browser.
#[derive(Debug, Clone, Serialize)]
pub struct BrowserAudit {
    pub name: String,
    pub path: PathBuf,
    pub present: bool,
    pub artifacts: Vec<ArtifactAudit>,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactAudit {
    pub name: String,
    pub bytes: u64,
}

/// Measure what `clear_browser_data` would remove, without touching
/// anything.
pub fn audit_browsers(config: &CleanupConfig) -> Vec<BrowserAudit> {
    config.browsers.iter().map(audit_profile).collect()
}

fn audit_profile(browser: &BrowserProfile) -> BrowserAudit {
    let present = browser.path.exists();
    let mut artifacts = Vec::new();
    let mut total_bytes = 0u64;

    if present {
        for artifact in PROFILE_ARTIFACTS {
            let target = browser.path.join(artifact);
            if !target.exists() {
                continue;
            }
            let bytes = fsops::dir_size(&target);
            total_bytes += bytes;
            artifacts.push(ArtifactAudit {
                name: (*artifact).to_string(),
                bytes,
            });
        }
        if browser.kind == ProfileKind::Gecko {
            if let Ok(entries) = fs::read_dir(&browser.path) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if !path.is_dir() {
                        continue;
                    }
                    let bytes = fsops::dir_size(&path);
                    total_bytes += bytes;
                    artifacts.push(ArtifactAudit {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        bytes,
                    });
                }
            }
        }
    }

    BrowserAudit {
        name: browser.name.clone(),
        path: browser.path.clone(),
        present,
        artifacts,
        total_bytes,
    }
}
