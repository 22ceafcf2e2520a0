use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use superflush::cli::args::{Cli, Commands, CompletionShell, ConfigAction, OutputFormat};
use superflush::cli::output;
use superflush::cleaner::CleanupEngine;
use superflush::common::config::CleanupConfig;
use superflush::platform::PlatformKind;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("superflush=debug")
            .init();
    }

    match cli.command {
        Commands::Scan { detailed } => cmd_scan(&cli, detailed),
        Commands::FlushDns => cmd_flush_dns(&cli),
        Commands::ClearBrowsers { yes } => cmd_clear_browsers(&cli, yes),
        Commands::SignOut { yes } => cmd_sign_out(&cli, yes),
        Commands::RunAll { yes } => cmd_run_all(&cli, yes),
        Commands::Config { ref action } => cmd_config(&cli, action),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "superflush", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn build_engine() -> Result<CleanupEngine> {
    let platform = PlatformKind::current();
    let config = CleanupConfig::load(&platform)?;
    Ok(CleanupEngine::new(config))
}

/// Ask before a destructive command, unless --yes was given.
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    use std::io::Write;
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    if input.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        println!("  {} Cancelled", "✗".red());
        Ok(false)
    }
}

/// Spinner shown while a blocking external command runs. The flush
/// commands apply no timeout, so the terminal needs a liveness signal.
fn spinner(cli: &Cli, message: &'static str) -> Option<ProgressBar> {
    if cli.quiet || !matches!(cli.format, OutputFormat::Human) {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

// ─── Scan ─────────────────────────────────────────────────────────────────────

fn cmd_scan(cli: &Cli, detailed: bool) -> Result<()> {
    let engine = build_engine()?;
    let audits = engine.audit_browsers();

    match cli.format {
        OutputFormat::Human => output::print_scan_results(&audits, detailed),
        OutputFormat::Json => output::print_scan_json(&audits),
        OutputFormat::Quiet => output::print_scan_quiet(&audits),
    }
    Ok(())
}

// ─── Flush DNS ────────────────────────────────────────────────────────────────

fn cmd_flush_dns(cli: &Cli) -> Result<()> {
    let engine = build_engine()?;

    let pb = spinner(cli, "Flushing DNS cache...");
    let result = engine.flush_dns();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match cli.format {
        OutputFormat::Human => output::print_operation_result("Flush DNS", &result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Quiet => {
            if !result.succeeded {
                eprintln!("{}", result.message);
            }
        }
    }

    if !result.succeeded {
        std::process::exit(1);
    }
    Ok(())
}

// ─── Clear browsers ───────────────────────────────────────────────────────────

fn cmd_clear_browsers(cli: &Cli, yes: bool) -> Result<()> {
    let engine = build_engine()?;

    if !confirm(
        "Delete history, cookies, saved logins, and cache for all configured browsers?",
        yes,
    )? {
        return Ok(());
    }

    let errors = engine.clear_browser_data();
    match cli.format {
        OutputFormat::Human => {
            output::print_item_errors("Browser data cleared successfully.", &errors)
        }
        OutputFormat::Json => output::print_errors_json("clear_browsers", &errors),
        OutputFormat::Quiet => println!("{}", errors.len()),
    }
    Ok(())
}

// ─── Sign out ─────────────────────────────────────────────────────────────────

fn cmd_sign_out(cli: &Cli, yes: bool) -> Result<()> {
    let engine = build_engine()?;

    if !confirm(
        "Revoke cached credentials for all configured desktop services?",
        yes,
    )? {
        return Ok(());
    }

    let errors = engine.sign_out_services();
    match cli.format {
        OutputFormat::Human => {
            output::print_item_errors("Signed out of services successfully.", &errors)
        }
        OutputFormat::Json => output::print_errors_json("sign_out", &errors),
        OutputFormat::Quiet => println!("{}", errors.len()),
    }
    Ok(())
}

// ─── Run all ──────────────────────────────────────────────────────────────────

fn cmd_run_all(cli: &Cli, yes: bool) -> Result<()> {
    let engine = build_engine()?;

    if !confirm(
        "Run all cleanup actions (DNS flush, browser data, service sign-out)?",
        yes,
    )? {
        return Ok(());
    }

    let pb = spinner(cli, "Running all cleanup actions...");
    let report = engine.run_all();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match cli.format {
        OutputFormat::Human => output::print_report(&report),
        OutputFormat::Json => output::print_report_json(&report),
        OutputFormat::Quiet => println!("{}", report.render()),
    }

    if !report.dns.succeeded {
        std::process::exit(1);
    }
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(cli: &Cli, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let platform = PlatformKind::current();
            let config = CleanupConfig::load(&platform)?;
            match cli.format {
                OutputFormat::Json => output::print_config_json(&config),
                _ => output::print_config(&config),
            }
        }
        ConfigAction::Path => {
            println!("{}", CleanupConfig::config_path().display());
        }
    }
    Ok(())
}
