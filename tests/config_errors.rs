// tests/config_errors.rs

use std::time::Duration;

use clap::Parser;

use ratexec::cli::{CliArgs, LogLevel};
use ratexec::config::{MAX_RATE, PipelineConfig, RawPipelineConfig};
use ratexec::elapsed_line;
use ratexec::errors::RatexecError;
use ratexec::logging::filter_directive;
use tracing_subscriber::EnvFilter;

fn raw(rate: u32, inflight: u32, command: &[&str]) -> RawPipelineConfig {
    RawPipelineConfig {
        rate,
        inflight,
        command: command.iter().map(|s| s.to_string()).collect(),
    }
}

fn expect_config_error(raw: RawPipelineConfig) -> String {
    match PipelineConfig::try_from(raw) {
        Err(RatexecError::ConfigError(msg)) => msg,
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(cfg) => panic!("Expected error, got Ok({:?})", cfg),
    }
}

#[test]
fn cli_defaults_to_one_per_second_and_one_worker() {
    let args = CliArgs::try_parse_from(["ratexec", "echo", "{}"]).unwrap();

    assert_eq!(args.rate, 1);
    assert_eq!(args.inflight, 1);
    assert_eq!(args.command, vec!["echo", "{}"]);
}

#[test]
fn cli_reads_rate_and_inflight_before_the_command() {
    let args =
        CliArgs::try_parse_from(["ratexec", "--rate", "20", "--inflight", "4", "curl", "-s", "{}"])
            .unwrap();

    assert_eq!(args.rate, 20);
    assert_eq!(args.inflight, 4);
    assert_eq!(args.command, vec!["curl", "-s", "{}"]);
}

#[test]
fn cli_options_after_the_command_belong_to_the_command() {
    let args =
        CliArgs::try_parse_from(["ratexec", "--inflight", "2", "tool", "--rate", "7", "{}"]).unwrap();

    assert_eq!(args.rate, 1);
    assert_eq!(args.inflight, 2);
    assert_eq!(args.command, vec!["tool", "--rate", "7", "{}"]);
}

#[test]
fn cli_rejects_zero_and_garbage_numbers() {
    assert!(CliArgs::try_parse_from(["ratexec", "--rate", "0", "echo"]).is_err());
    assert!(CliArgs::try_parse_from(["ratexec", "--inflight", "0", "echo"]).is_err());
    assert!(CliArgs::try_parse_from(["ratexec", "--rate", "fast", "echo"]).is_err());
    assert!(CliArgs::try_parse_from(["ratexec", "--inflight", "-3", "echo"]).is_err());
}

#[test]
fn cli_requires_a_command() {
    assert!(CliArgs::try_parse_from(["ratexec"]).is_err());
    assert!(CliArgs::try_parse_from(["ratexec", "--rate", "5"]).is_err());
}

#[test]
fn valid_raw_config_is_accepted() {
    let cfg = PipelineConfig::try_from(raw(4, 8, &["echo", "a", "{}"])).unwrap();

    assert_eq!(cfg.rate(), 4);
    assert_eq!(cfg.inflight(), 8);
    assert_eq!(cfg.period(), Duration::from_millis(250));
    assert_eq!(cfg.template().program(), "echo");
    assert_eq!(cfg.template().args(), &["a".to_string(), "{}".to_string()]);
}

#[test]
fn cli_args_convert_into_raw_config() {
    let args = CliArgs::try_parse_from(["ratexec", "--rate", "3", "ls", "{}"]).unwrap();
    assert_eq!(RawPipelineConfig::from(&args), raw(3, 1, &["ls", "{}"]));
}

#[test]
fn zero_rate_is_a_config_error() {
    let msg = expect_config_error(raw(0, 1, &["echo"]));
    assert!(msg.contains("--rate"), "unexpected message: {msg}");
}

#[test]
fn rate_that_would_truncate_the_period_to_zero_is_a_config_error() {
    let msg = expect_config_error(raw(MAX_RATE + 1, 1, &["echo"]));
    assert!(msg.contains("--rate"), "unexpected message: {msg}");

    let cfg = PipelineConfig::try_from(raw(MAX_RATE, 1, &["echo"])).unwrap();
    assert!(!cfg.period().is_zero());
}

#[test]
fn zero_inflight_is_a_config_error() {
    let msg = expect_config_error(raw(1, 0, &["echo"]));
    assert!(msg.contains("--inflight"), "unexpected message: {msg}");
}

#[test]
fn missing_or_blank_command_is_a_config_error() {
    let msg = expect_config_error(raw(1, 1, &[]));
    assert!(msg.contains("command"), "unexpected message: {msg}");

    let msg = expect_config_error(raw(1, 1, &["  ", "{}"]));
    assert!(msg.contains("executable"), "unexpected message: {msg}");
}

#[test]
fn elapsed_line_uses_duration_debug_format() {
    assert_eq!(elapsed_line(Duration::from_millis(1500)), "1.5s elapsed");
    assert_eq!(elapsed_line(Duration::from_micros(250)), "250µs elapsed");
}

#[test]
fn default_log_filter_keeps_stderr_to_warnings() {
    assert_eq!(filter_directive(None, None), "ratexec=warn");
    assert_eq!(filter_directive(None, Some("   ")), "ratexec=warn");
}

#[test]
fn log_level_flag_overrides_the_environment() {
    assert_eq!(filter_directive(Some(LogLevel::Debug), None), "ratexec=debug");
    assert_eq!(
        filter_directive(Some(LogLevel::Error), Some("trace")),
        "ratexec=error"
    );
}

#[test]
fn environment_filter_is_used_verbatim() {
    assert_eq!(
        filter_directive(None, Some(" ratexec::pipeline=trace ")),
        "ratexec::pipeline=trace"
    );
}

#[test]
fn every_chosen_filter_is_a_valid_env_filter() {
    let levels = [
        None,
        Some(LogLevel::Error),
        Some(LogLevel::Warn),
        Some(LogLevel::Info),
        Some(LogLevel::Debug),
        Some(LogLevel::Trace),
    ];
    for level in levels {
        let directive = filter_directive(level, None);
        assert!(
            EnvFilter::try_new(&directive).is_ok(),
            "rejected directive: {directive}"
        );
    }
}
