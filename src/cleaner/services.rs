use tracing::debug;

use super::fsops;
use super::runner::CommandRunner;
use crate::common::config::CleanupConfig;
use crate::common::oplog::FailureLog;
use crate::platform::PlatformKind;

/// Revoke cached credentials for every configured service. Returns one
/// error string per failed item; an empty vec is full success.
///
/// Step 1 deletes each service's credential file, when configured and
/// present. Step 2 runs only on Windows: every configured credential-store
/// target is removed through `cmdkey /delete`. cmdkey exits non-success
/// for a target that is not stored, which is the common case and not a
/// failure; only a failure to launch cmdkey itself is reported.
pub fn sign_out_services(
    config: &CleanupConfig,
    platform: &PlatformKind,
    runner: &dyn CommandRunner,
    log: &dyn FailureLog,
) -> Vec<String> {
    let mut errors = Vec::new();

    for service in &config.services {
        let Some(file) = &service.credential_file else {
            continue;
        };
        if !file.exists() {
            continue;
        }
        debug!(service = %service.name, "removing credential file");
        if let Err(e) = fsops::remove_file(file) {
            let msg = format!("{}: {}", service.name, e);
            log.append(&msg);
            errors.push(msg);
        }
    }

    if *platform == PlatformKind::Windows {
        for target in config.services.iter().flat_map(|s| s.store_targets.iter()) {
            debug!(target = %target, "deleting credential-store entry");
            if let Err(e) = runner.run("cmdkey", &["/delete", target]) {
                let msg = format!("Windows Credentials: {}", e);
                log.append(&msg);
                errors.push(msg);
            }
        }
    }

    errors
}
