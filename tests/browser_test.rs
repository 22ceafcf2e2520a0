use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use superflush::cleaner::{CleanupEngine, CommandRunner};
use superflush::common::config::{BrowserProfile, CleanupConfig, ProfileKind};
use superflush::common::oplog::MemoryLog;
use superflush::platform::PlatformKind;

/// The eraser never shells out; any invocation is a bug
struct NoRunner;

impl CommandRunner for NoRunner {
    fn run(&self, program: &str, _args: &[&str]) -> io::Result<bool> {
        panic!("unexpected command invocation: {}", program);
    }
}

fn engine_with(browsers: Vec<BrowserProfile>, log: &Arc<MemoryLog>) -> CleanupEngine {
    let config = CleanupConfig {
        browsers,
        services: Vec::new(),
        log_path: "superflush.log".into(),
    };
    CleanupEngine::with_parts(
        PlatformKind::Linux,
        false,
        config,
        Box::new(NoRunner),
        log.clone(),
    )
}

fn chromium_profile(name: &str, path: PathBuf) -> BrowserProfile {
    BrowserProfile {
        name: name.to_string(),
        path,
        kind: ProfileKind::Chromium,
    }
}

/// Lay out a Chromium-style profile: artifact files plus a cache directory
fn populate_chromium(profile: &Path) {
    fs::create_dir_all(profile.join("Cache")).unwrap();
    fs::write(profile.join("History"), "visits").unwrap();
    fs::write(profile.join("Cookies"), "cookies").unwrap();
    fs::write(profile.join("Cache/f_000001"), "cached bytes").unwrap();
}

#[test]
fn chrome_artifacts_removed_ghostbrowser_untouched() {
    let tmp = TempDir::new().unwrap();
    let chrome = tmp.path().join("chrome-profile");
    populate_chromium(&chrome);
    fs::write(chrome.join("Bookmarks"), "keep me").unwrap();

    let log = Arc::new(MemoryLog::new());
    let engine = engine_with(
        vec![
            chromium_profile("chrome", chrome.clone()),
            chromium_profile("ghostbrowser", tmp.path().join("no-such-browser")),
        ],
        &log,
    );

    let errors = engine.clear_browser_data();

    assert!(errors.is_empty());
    assert!(!chrome.join("History").exists());
    assert!(!chrome.join("Cookies").exists());
    assert!(!chrome.join("Cache").exists());
    // Only the known artifact set is deleted
    assert!(chrome.join("Bookmarks").exists());
    assert!(!tmp.path().join("no-such-browser").exists());
    assert!(log.lines().is_empty());
}

#[test]
fn firefox_contained_profiles_are_wiped_wholesale() {
    let tmp = TempDir::new().unwrap();
    let container = tmp.path().join("firefox-profiles");
    let profile_a = container.join("abcd1234.default-release");
    let profile_b = container.join("xyz.dev-edition");
    fs::create_dir_all(profile_a.join("storage")).unwrap();
    fs::create_dir_all(&profile_b).unwrap();
    fs::write(profile_a.join("cookies.sqlite"), "cookies").unwrap();
    fs::write(profile_a.join("storage/ls.sqlite"), "ls").unwrap();
    fs::write(profile_b.join("places.sqlite"), "history").unwrap();
    fs::write(container.join("profiles.ini"), "[Profile0]").unwrap();

    let log = Arc::new(MemoryLog::new());
    let engine = engine_with(
        vec![BrowserProfile {
            name: "firefox".to_string(),
            path: container.clone(),
            kind: ProfileKind::Gecko,
        }],
        &log,
    );

    let errors = engine.clear_browser_data();

    assert!(errors.is_empty());
    assert!(!profile_a.exists());
    assert!(!profile_b.exists());
    // Loose files next to the profile directories stay
    assert!(container.join("profiles.ini").exists());
}

#[test]
fn clearing_twice_is_clean_on_the_second_run() {
    let tmp = TempDir::new().unwrap();
    let chrome = tmp.path().join("profile");
    populate_chromium(&chrome);

    let log = Arc::new(MemoryLog::new());
    let engine = engine_with(vec![chromium_profile("chrome", chrome.clone())], &log);

    assert!(engine.clear_browser_data().is_empty());
    assert!(engine.clear_browser_data().is_empty());
    assert!(log.lines().is_empty());
}

#[test]
fn absent_profiles_mean_zero_errors_and_zero_mutations() {
    let tmp = TempDir::new().unwrap();
    let log = Arc::new(MemoryLog::new());
    let engine = engine_with(
        vec![
            chromium_profile("chrome", tmp.path().join("a")),
            chromium_profile("edge", tmp.path().join("b")),
        ],
        &log,
    );

    let errors = engine.clear_browser_data();

    assert!(errors.is_empty());
    assert!(log.lines().is_empty());
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn blocked_artifact_file_yields_one_named_error() {
    use std::os::unix::fs::PermissionsExt;

    // Root bypasses permission checks; nothing to simulate then.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let tmp = TempDir::new().unwrap();
    let chrome = tmp.path().join("profile");
    fs::create_dir_all(&chrome).unwrap();
    fs::write(chrome.join("History"), "visits").unwrap();
    fs::set_permissions(&chrome, fs::Permissions::from_mode(0o555)).unwrap();

    let log = Arc::new(MemoryLog::new());
    let engine = engine_with(vec![chromium_profile("chrome", chrome.clone())], &log);

    let errors = engine.clear_browser_data();

    fs::set_permissions(&chrome, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("chrome: "));
    assert_eq!(log.lines(), errors);
}

#[test]
fn audit_reports_sizes_without_mutating() {
    let tmp = TempDir::new().unwrap();
    let chrome = tmp.path().join("profile");
    populate_chromium(&chrome);

    let log = Arc::new(MemoryLog::new());
    let engine = engine_with(
        vec![
            chromium_profile("chrome", chrome.clone()),
            chromium_profile("ghostbrowser", tmp.path().join("missing")),
        ],
        &log,
    );

    let audits = engine.audit_browsers();

    assert_eq!(audits.len(), 2);
    assert!(audits[0].present);
    assert!(audits[0].total_bytes > 0);
    let names: Vec<&str> = audits[0].artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["History", "Cookies", "Cache"]);
    assert!(!audits[1].present);
    assert_eq!(audits[1].total_bytes, 0);

    // Still all there afterwards
    assert!(chrome.join("History").exists());
    assert!(chrome.join("Cookies").exists());
    assert!(chrome.join("Cache/f_000001").exists());
}
