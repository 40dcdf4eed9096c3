//! Import value filter CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use ivf_cli::cli::{
    Cli, Command, LogFormatArg, LogLevelArg, NormalizeArgs, PermissionsArgs,
};
use ivf_cli::commands::{evaluate_permissions, load_config, run_normalize, summarize_config};
use ivf_cli::logging::{LogConfig, LogFormat, init_logging};
use ivf_cli::summary::{
    print_config_summary, print_normalize_json, print_normalize_report, print_permission_report,
};
use ivf_cli::types::NormalizeRequest;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Normalize(args) => normalize(args),
        Command::Config(args) => load_config(&args.config).map(|config| {
            print_config_summary(&summarize_config(&args.config, &config));
            true
        }),
        Command::Permissions(args) => permissions(args),
    };
    let exit_code = match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Returns `Ok(false)` when any value produced an error diagnostic.
fn normalize(args: &NormalizeArgs) -> Result<bool> {
    let config = load_config(&args.config.config)?;
    let request = NormalizeRequest {
        field: args.field.clone(),
        category: args.category.clone(),
        now: args.now,
        values: args.values.clone(),
    };
    let report = run_normalize(&config, &request);
    if args.json {
        print_normalize_json(&report)?;
    } else {
        print_normalize_report(&report);
    }
    Ok(!report.has_errors())
}

fn permissions(args: &PermissionsArgs) -> Result<bool> {
    let config = load_config(&args.config.config)?;
    let report = evaluate_permissions(&config, &args.roles, args.allow_default);
    print_permission_report(&report);
    Ok(true)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
