//! # Superflush
//!
//! A cross-platform privacy cleanup engine.
//!
//! Superflush flushes the OS DNS resolver cache, deletes locally stored
//! browser history/cookie/cache artifacts, and signs out of desktop
//! services by revoking their cached credentials. It features:
//!
//! - **Three Independent Operations**: DNS flush, browser data erase, and
//!   service sign-out, each returning a structured result
//! - **Best-Effort, Never Atomic**: every failed deletion is reported
//!   per item; one locked file never aborts the rest of a cleanup
//! - **Platform-Aware**: Windows, Linux, and macOS branches with an
//!   explicit unsupported-platform fallback and a Windows elevation gate
//! - **Fixed, Explicit Tables**: browsers and services come from a
//!   read-only configuration built at startup, extensible via TOML
//! - **Injected Collaborators**: failure log and process runner are
//!   passed in, so every branch is testable without the real machine
//!
//! The CLI in `src/main.rs` is a thin presentation layer over
//! [`cleaner::CleanupEngine`]; it owns no cleanup logic.

pub mod cli;
pub mod cleaner;
pub mod common;
pub mod platform;
