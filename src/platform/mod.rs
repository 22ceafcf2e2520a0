use serde::Serialize;

/// OS family the engine is running on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    Windows,
    Linux,
    MacOs,
    /// Anything else, carrying the raw OS name from the toolchain
    Other(String),
}

impl PlatformKind {
    /// Detect the platform this process was built for.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => PlatformKind::Windows,
            "linux" => PlatformKind::Linux,
            "macos" => PlatformKind::MacOs,
            other => PlatformKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PlatformKind::Windows => "windows",
            PlatformKind::Linux => "linux",
            PlatformKind::MacOs => "macos",
            PlatformKind::Other(name) => name,
        }
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the current process runs with elevated rights.
///
/// Windows asks the shell whether the user is an administrator; a query
/// that cannot be answered counts as not elevated. No side effects.
#[cfg(windows)]
pub fn is_elevated() -> bool {
    use windows::Win32::UI::Shell::IsUserAnAdmin;
    unsafe { IsUserAnAdmin().as_bool() }
}

/// On unix, elevation means the effective uid is root.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(any(windows, unix)))]
pub fn is_elevated() -> bool {
    false
}
