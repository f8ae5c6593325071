//! Integration tests for CLI argument handling
//!
//! Exercises the binary for arguments that exit before the terminal UI starts.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_workoutfeed"))
        .args(args)
        .output()
        .expect("Failed to execute workoutfeed")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("workoutfeed"), "Help should mention workoutfeed");
    assert!(stdout.contains("--sort"), "Help should mention --sort flag");
    assert!(stdout.contains("--ttl"), "Help should mention --ttl flag");
}

#[test]
fn test_invalid_sort_key_prints_error_and_exits() {
    let output = run_cli(&["--sort", "popularity"]);
    assert!(!output.status.success(), "Expected invalid sort key to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid sort key"),
        "Should print error message about invalid sort key: {}",
        stderr
    );
}

#[test]
fn test_invalid_url_prints_error_and_exits() {
    let output = run_cli(&["--url", "::not-a-url::"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid feed URL"), "stderr: {}", stderr);
}

#[test]
fn test_zero_timeout_is_rejected() {
    let output = run_cli(&["--timeout", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_non_numeric_ttl_is_rejected_by_parser() {
    let output = run_cli(&["--ttl", "an-hour"]);
    assert!(!output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use workoutfeed::cli::{Cli, StartupConfig};
    use workoutfeed::sort::SortKey;

    #[test]
    fn test_sort_flag_selects_initial_key() {
        for (arg, key) in [
            ("created", SortKey::Created),
            ("kudos", SortKey::KudosCount),
            ("level", SortKey::Level),
        ] {
            let cli = Cli::parse_from(["workoutfeed", "--sort", arg]);
            let config = StartupConfig::from_cli(&cli).unwrap();
            assert_eq!(config.initial_sort, key);
        }
    }

    #[test]
    fn test_no_cache_disables_persistence() {
        let cli = Cli::parse_from(["workoutfeed", "--no-cache"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(!config.persistent_cache);
    }
}
