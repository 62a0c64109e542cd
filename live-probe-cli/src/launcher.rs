//! Subcommand dispatch.
//!
//! The report goes to stdout; diagnostics go through `tracing` to stderr.

use crate::cli::{Cli, Commands, LiveArgs, ModelsArgs};
use crate::config::{KeyConfig, load_dotenv};
use crate::report;
use anyhow::{Context, Result};
use live_probe::gemini::GeminiLiveConnector;
use live_probe::{
    DEFAULT_REST_MODELS, KeyChecker, ProbeConfig, Prober, check_audio_devices,
    check_video_devices,
};
use std::process::ExitCode;
use std::time::Duration;
use url::Url;

/// Exit status when no API key could be found.
pub const EXIT_NO_CREDENTIAL: u8 = 2;

/// Exit status for a failed probe under `--strict`.
pub const EXIT_PROBE_FAILED: u8 = 1;

pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Live(args) => run_live(args).await,
        Commands::Models(args) => run_models(args).await,
        Commands::Devices => {
            print!("{}", report::devices(&check_audio_devices(), &check_video_devices()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn probe_config(args: &LiveArgs) -> ProbeConfig {
    let config = ProbeConfig::new();
    let config = match &args.prompt {
        Some(prompt) => config.with_prompt(prompt.clone()),
        None => config,
    };
    match args.timeout {
        0 => config.without_timeout(),
        secs => config.with_timeout(Duration::from_secs(secs)),
    }
}

async fn run_live(args: LiveArgs) -> Result<ExitCode> {
    load_dotenv();
    print!("{}", report::banner());

    let keys = KeyConfig::from_args(&args.key);
    let Some(credential) = keys.resolve() else {
        print!("{}", report::missing_credential(keys.env_vars()));
        return Ok(ExitCode::from(EXIT_NO_CREDENTIAL));
    };
    print!("{}", report::credential_line(&credential, &args.model));

    let prober =
        Prober::new(GeminiLiveConnector::with_endpoint(args.endpoint.clone()), probe_config(&args));
    let result = prober.probe(Some(&credential), &args.model).await;
    tracing::info!(
        model = %result.model,
        elapsed_ms = result.elapsed.as_millis() as u64,
        succeeded = result.succeeded(),
        "Probe finished"
    );

    print!("{}", report::probe_result(&result));
    print!("{}", report::rule());

    if result.succeeded() {
        if !args.skip_devices {
            print!("{}", report::devices(&check_audio_devices(), &check_video_devices()));
            println!();
        }
        print!("{}", report::next_steps());
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(note) = result.failure_category().and_then(report::fix_key_first) {
        print!("{note}");
    }
    if args.strict {
        return Ok(ExitCode::from(EXIT_PROBE_FAILED));
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') { raw.to_string() } else { format!("{raw}/") };
    Url::parse(&normalized).with_context(|| format!("invalid --base-url '{raw}'"))
}

async fn run_models(args: ModelsArgs) -> Result<ExitCode> {
    load_dotenv();

    let keys = KeyConfig::from_args(&args.key);
    let Some(credential) = keys.resolve() else {
        print!("{}", report::missing_credential(keys.env_vars()));
        return Ok(ExitCode::from(EXIT_NO_CREDENTIAL));
    };
    println!("🔍 Checking API key: {} (from {})", credential.masked(), credential.source());

    let checker = match &args.base_url {
        Some(raw) => KeyChecker::with_base_url(&credential, parse_base_url(raw)?),
        None => KeyChecker::new(&credential),
    }
    .context("failed to build REST client")?
    .with_delay(Duration::from_millis(args.delay_ms));

    let models: Vec<String> = if args.models.is_empty() {
        DEFAULT_REST_MODELS.iter().map(|m| m.to_string()).collect()
    } else {
        args.models
    };

    let results = checker.check_models(&models).await;
    print!("{}", report::models(&results));
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn live_args(extra: &[&str]) -> LiveArgs {
        let argv = ["live-probe", "live"].into_iter().chain(extra.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Live(args) => args,
            other => panic!("expected live, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_timeout_waits_indefinitely() {
        assert_eq!(probe_config(&live_args(&["--timeout", "0"])).response_timeout, None);
        assert_eq!(
            probe_config(&live_args(&["--timeout", "7"])).response_timeout,
            Some(Duration::from_secs(7))
        );
    }

    #[test]
    fn test_custom_prompt() {
        let config = probe_config(&live_args(&["--prompt", "ping"]));
        assert_eq!(config.prompt, "ping");
        assert_eq!(probe_config(&live_args(&[])).prompt, live_probe::DEFAULT_PROMPT);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/v1beta").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v1beta/");
        assert!(parse_base_url("not a url").is_err());
    }
}
