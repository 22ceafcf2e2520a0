use std::io;
use std::process::Command;

/// Seam over external process invocation.
///
/// The real implementation blocks until the child exits and applies no
/// timeout, so a hung child hangs the caller; interactive callers should
/// run operations off their UI thread.
pub trait CommandRunner: Send + Sync {
    /// Launch `program` with `args` and wait for it. `Ok(true)` means the
    /// child exited successfully, `Ok(false)` a non-success exit. `Err`
    /// means the child could not be launched at all.
    fn run(&self, program: &str, args: &[&str]) -> io::Result<bool>;
}

/// Runs commands via `std::process::Command`, discarding child output.
/// Exit status is the sole failure signal; stdout/stderr are never parsed.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<bool> {
        let output = Command::new(program).args(args).output()?;
        Ok(output.status.success())
    }
}
