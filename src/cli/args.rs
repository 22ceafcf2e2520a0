use clap::{Parser, Subcommand, ValueEnum};

/// Superflush — advanced account sign-out & DNS cleanup
#[derive(Parser, Debug)]
#[command(
    name = "superflush",
    version,
    about = "Flush DNS, clear browser data, and sign out of desktop services",
    long_about = "Superflush cleans privacy-sensitive local state: the OS DNS resolver\n\
                   cache, browser history/cookies/cache, and cached desktop-service\n\
                   credentials. Deletions are best-effort and reported per item.",
    after_help = "EXAMPLES:\n  \
        superflush scan                        Show what browser data exists\n  \
        superflush scan --detailed             Include per-artifact sizes\n  \
        superflush flush-dns                   Flush the OS resolver cache\n  \
        superflush clear-browsers --yes        Delete browser artifacts, no prompt\n  \
        superflush sign-out --yes              Revoke cached service credentials\n  \
        superflush run-all --yes               Everything in sequence\n  \
        superflush run-all --yes --format json Machine-readable combined report\n  \
        superflush config show                 Print the active configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configured browsers and how much data they hold
    Scan {
        /// Show per-artifact sizes
        #[arg(long)]
        detailed: bool,
    },

    /// Flush the operating system's DNS resolver cache
    FlushDns,

    /// Delete history, cookies, saved logins, and cache for configured browsers
    ClearBrowsers {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Revoke cached credentials for configured desktop services
    SignOut {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Run every cleanup operation in sequence
    RunAll {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration (built-ins plus overrides)
    Show,
    /// Print the override file path
    Path,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}
