use tracing::debug;

use super::runner::CommandRunner;
use crate::common::errors::CleanupError;
use crate::platform::PlatformKind;

/// One external invocation in a flush sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushStep {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl FlushStep {
    fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Per-platform flush behavior, keyed by the detected `PlatformKind`,
/// with an explicit variant for platforms that have no branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushStrategy {
    Windows,
    Linux,
    MacOs,
    Unsupported(String),
}

impl FlushStrategy {
    pub fn for_platform(platform: &PlatformKind) -> Self {
        match platform {
            PlatformKind::Windows => FlushStrategy::Windows,
            PlatformKind::Linux => FlushStrategy::Linux,
            PlatformKind::MacOs => FlushStrategy::MacOs,
            PlatformKind::Other(name) => FlushStrategy::Unsupported(name.clone()),
        }
    }

    /// Windows refuses to flush without elevation.
    pub fn requires_elevation(&self) -> bool {
        matches!(self, FlushStrategy::Windows)
    }

    /// The fixed command sequence for this platform. macOS flushes the
    /// directory-service cache and then signals mDNSResponder to reload.
    pub fn steps(&self) -> Result<&'static [FlushStep], CleanupError> {
        match self {
            FlushStrategy::Windows => Ok(&[FlushStep {
                program: "ipconfig",
                args: &["/flushdns"],
            }]),
            FlushStrategy::Linux => Ok(&[FlushStep {
                program: "systemd-resolve",
                args: &["--flush-caches"],
            }]),
            FlushStrategy::MacOs => Ok(&[
                FlushStep {
                    program: "dscacheutil",
                    args: &["-flushcache"],
                },
                FlushStep {
                    program: "killall",
                    args: &["-HUP", "mDNSResponder"],
                },
            ]),
            FlushStrategy::Unsupported(name) => {
                Err(CleanupError::UnsupportedPlatform(name.clone()))
            }
        }
    }
}

/// Flush the resolver cache for the given platform. The elevation gate
/// runs before any command is attempted.
pub fn flush_dns(
    platform: &PlatformKind,
    elevated: bool,
    runner: &dyn CommandRunner,
) -> Result<(), CleanupError> {
    let strategy = FlushStrategy::for_platform(platform);
    if strategy.requires_elevation() && !elevated {
        return Err(CleanupError::PermissionDenied(
            "Administrator privileges required to flush DNS on Windows".to_string(),
        ));
    }
    for step in strategy.steps()? {
        debug!(program = step.program, "running flush command");
        run_step(runner, step)?;
    }
    Ok(())
}

fn run_step(runner: &dyn CommandRunner, step: &FlushStep) -> Result<(), CleanupError> {
    match runner.run(step.program, step.args) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CleanupError::ExternalCommandFailed {
            command: step.command_line(),
            detail: "exited with non-success status".to_string(),
        }),
        Err(e) => Err(CleanupError::ExternalCommandFailed {
            command: step.command_line(),
            detail: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_follows_the_platform() {
        assert_eq!(
            FlushStrategy::for_platform(&PlatformKind::Linux),
            FlushStrategy::Linux
        );
        assert_eq!(
            FlushStrategy::for_platform(&PlatformKind::Other("freebsd".into())),
            FlushStrategy::Unsupported("freebsd".into())
        );
    }

    #[test]
    fn only_windows_requires_elevation() {
        assert!(FlushStrategy::Windows.requires_elevation());
        assert!(!FlushStrategy::Linux.requires_elevation());
        assert!(!FlushStrategy::MacOs.requires_elevation());
    }

    #[test]
    fn macos_flushes_then_signals_the_responder() {
        let steps = FlushStrategy::MacOs.steps().unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].program, "dscacheutil");
        assert_eq!(steps[1].program, "killall");
        assert_eq!(steps[1].args, &["-HUP", "mDNSResponder"][..]);
    }

    #[test]
    fn unsupported_strategy_reports_the_platform_name() {
        let err = FlushStrategy::Unsupported("haiku".into())
            .steps()
            .unwrap_err();
        assert!(err.to_string().contains("haiku"));
    }
}
