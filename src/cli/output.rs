use colored::*;

use crate::cleaner::browsers::BrowserAudit;
use crate::cleaner::{CleanupReport, OperationResult};
use crate::common::config::CleanupConfig;
use crate::common::format::{format_error_count, format_path, format_size};

/// Print the browser audit in human-readable form
pub fn print_scan_results(audits: &[BrowserAudit], detailed: bool) {
    println!();
    println!("  Superflush Scan");
    println!("{}", "─".repeat(60).dimmed());

    let mut total = 0u64;
    for audit in audits {
        if !audit.present {
            println!(
                "  {} {:<10} {}",
                "○".dimmed(),
                audit.name.dimmed(),
                "not installed".dimmed()
            );
            continue;
        }
        total += audit.total_bytes;
        println!(
            "  {} {:<10} {}  {}",
            "●".green(),
            audit.name.bold(),
            format_size(audit.total_bytes),
            format_path(&audit.path).dimmed()
        );
        if detailed {
            for artifact in &audit.artifacts {
                println!(
                    "      {} {:<24} {}",
                    "→".dimmed(),
                    artifact.name,
                    format_size(artifact.bytes).dimmed()
                );
            }
        }
    }

    println!("{}", "─".repeat(60).dimmed());
    println!("  Total browser data: {}", format_size(total).bold());
    println!();
}

pub fn print_scan_json(audits: &[BrowserAudit]) {
    let total: u64 = audits.iter().map(|a| a.total_bytes).sum();
    let json = serde_json::json!({
        "browsers": audits,
        "total_bytes": total,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_scan_quiet(audits: &[BrowserAudit]) {
    let total: u64 = audits.iter().map(|a| a.total_bytes).sum();
    println!("{}", total);
}

/// Print a single operation's outcome
pub fn print_operation_result(title: &str, result: &OperationResult) {
    println!();
    if result.succeeded {
        println!("  {} {}", "✓".green(), result.message);
    } else {
        println!("  {} {}: {}", "✗".red(), title.red().bold(), result.message);
    }
    print_error_lines(&result.errors);
    println!();
}

/// Print the outcome of a per-item operation: success line when the error
/// list is empty, otherwise a warning listing every individual failure.
pub fn print_item_errors(success_message: &str, errors: &[String]) {
    println!();
    if errors.is_empty() {
        println!("  {} {}", "✓".green(), success_message);
    } else {
        println!(
            "  {} Completed with {}:",
            "⚠".yellow(),
            format_error_count(errors.len()).yellow()
        );
        print_error_lines(errors);
    }
    println!();
}

fn print_error_lines(errors: &[String]) {
    for error in errors {
        println!("    {} {}", "→".dimmed(), error);
    }
}

pub fn print_errors_json(operation: &str, errors: &[String]) {
    let json = serde_json::json!({
        "operation": operation,
        "succeeded": errors.is_empty(),
        "errors": errors,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print the combined run-all report
pub fn print_report(report: &CleanupReport) {
    println!();
    println!("  Superflush Report");
    println!("{}", "─".repeat(60).dimmed());

    if report.dns.succeeded {
        println!("  {} {}", "✓".green(), report.dns.message);
    } else {
        println!("  {} {}", "✗".red(), report.dns.message);
    }

    if report.browser_errors.is_empty() {
        println!("  {} Browser data cleared successfully.", "✓".green());
    } else {
        println!(
            "  {} Browser data: {}",
            "⚠".yellow(),
            format_error_count(report.browser_errors.len()).yellow()
        );
        print_error_lines(&report.browser_errors);
    }

    if report.service_errors.is_empty() {
        println!("  {} Signed out of services successfully.", "✓".green());
    } else {
        println!(
            "  {} Services: {}",
            "⚠".yellow(),
            format_error_count(report.service_errors.len()).yellow()
        );
        print_error_lines(&report.service_errors);
    }

    println!("{}", "─".repeat(60).dimmed());
    println!();
}

pub fn print_report_json(report: &CleanupReport) {
    println!(
        "{}",
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print the active configuration
pub fn print_config(config: &CleanupConfig) {
    println!();
    println!("  Superflush Configuration");
    println!("{}", "─".repeat(60).dimmed());
    println!("  {}: {}", "log file".dimmed(), format_path(&config.log_path));
    println!();
    println!("  Browsers:");
    for browser in &config.browsers {
        println!(
            "    {} {:<10} {}",
            "●".cyan(),
            browser.name,
            format_path(&browser.path).dimmed()
        );
    }
    println!();
    println!("  Services:");
    for service in &config.services {
        let file = service
            .credential_file
            .as_deref()
            .map(format_path)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "    {} {:<16} file: {}  targets: {}",
            "●".cyan(),
            service.name,
            file.dimmed(),
            service.store_targets.join(", ").dimmed()
        );
    }
    println!();
}

pub fn print_config_json(config: &CleanupConfig) {
    println!(
        "{}",
        serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string())
    );
}
