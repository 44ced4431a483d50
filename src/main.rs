// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! dawgscan CLI - Passive Page Classifier

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dawgscan::signatures::{header_doc, REQUIRED_HEADERS};
use dawgscan::{
    check_missing, resolve_target, ClientEvidenceBundle, Error, HeaderFetcher, HttpClient,
    JsonFilePreferences, PreferenceStore, ScanConfiguration, ScanToggle, Scanner, ScannerConfig,
    StaticEvidence,
};

/// Environment variable overriding the preference file location
const PREFS_ENV: &str = "DAWGSCAN_PREFS";
const DEFAULT_PREFS_FILE: &str = ".dawgscan.json";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dawgscan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "scan" => match ScanArgs::parse(&args[2..]) {
            Some(scan_args) => scan(scan_args).await,
            None => {
                eprintln!("Usage: dawgscan scan <url> [--json] [--evidence <file>]");
                ExitCode::from(1)
            }
        },
        "headers" => {
            if args.len() < 3 {
                eprintln!("Usage: dawgscan headers <url>");
                return ExitCode::from(1);
            }
            headers(&args[2]).await
        }
        "toggle" => {
            if args.len() < 4 {
                eprintln!("Usage: dawgscan toggle <section> <on|off>");
                return ExitCode::from(1);
            }
            report_outcome(toggle(&args[2], &args[3]))
        }
        "toggles" => report_outcome(list_toggles()),
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("dawgscan {}", dawgscan::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"dawgscan - Passive Page Classifier

USAGE:
    dawgscan <COMMAND> [OPTIONS]

COMMANDS:
    scan <url>                  Scan a page and print the report
        --json                  Print the report as JSON
        --evidence <file>       Use client evidence from a JSON file
    headers <url>               Check required security headers only
    toggle <section> <on|off>   Enable or disable a report section
    toggles                     Show report sections
    help                        Show this help message
    version                     Show version information

SECTIONS:
    protocol, headers, technologies, libraries, server, cookies

ENVIRONMENT:
    DAWGSCAN_PREFS              Preference file (default: .dawgscan.json)
    RUST_LOG                    Log filter (default: dawgscan=info)

EXAMPLES:
    dawgscan scan https://example.com
    dawgscan scan https://example.com --json
    dawgscan toggle cookies off
"#
    );
}

struct ScanArgs {
    target: String,
    json: bool,
    evidence: Option<PathBuf>,
}

impl ScanArgs {
    fn parse(args: &[String]) -> Option<Self> {
        let mut target = None;
        let mut json = false;
        let mut evidence = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => json = true,
                "--evidence" => evidence = Some(PathBuf::from(iter.next()?)),
                other if target.is_none() && !other.starts_with("--") => {
                    target = Some(other.to_string())
                }
                _ => return None,
            }
        }

        Some(Self {
            target: target?,
            json,
            evidence,
        })
    }
}

fn prefs_path() -> PathBuf {
    env::var_os(PREFS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_FILE))
}

fn open_prefs() -> anyhow::Result<JsonFilePreferences> {
    let path = prefs_path();
    JsonFilePreferences::open(&path)
        .with_context(|| format!("Failed to open preferences at {}", path.display()))
}

fn load_evidence(path: &Path) -> anyhow::Result<ClientEvidenceBundle> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read evidence file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid evidence file {}", path.display()))
}

fn load_sections() -> anyhow::Result<ScanConfiguration> {
    let prefs = open_prefs()?;
    Ok(ScanConfiguration::load(&prefs)?)
}

fn report_outcome(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn scan(args: ScanArgs) -> ExitCode {
    let sections = match load_sections() {
        Ok(sections) => sections,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let mut scanner = match Scanner::new(ScannerConfig::default()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create scanner: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(ref path) = args.evidence {
        match load_evidence(path) {
            Ok(bundle) => scanner = scanner.with_client_evidence(Arc::new(StaticEvidence(bundle))),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return ExitCode::from(1);
            }
        }
    }

    let report = match scanner.scan(&args.target, &sections).await {
        Ok(report) => report,
        Err(Error::TargetUnavailable(reason)) => {
            eprintln!("Cannot scan this page: {}", reason);
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("Scan failed: {}", e);
            return ExitCode::from(1);
        }
    };

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        print!("{}", report);
    }

    if report.is_failed() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

async fn headers(target: &str) -> ExitCode {
    let url = match resolve_target(target) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Cannot scan this page: {}", e);
            return ExitCode::from(1);
        }
    };

    let client = match ScannerConfig::for_quick_check()
        .http_config()
        .and_then(HttpClient::with_config)
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.fetch_headers(&url).await {
        Ok(received) => {
            let missing = check_missing(&received, &REQUIRED_HEADERS);
            if missing.is_empty() {
                println!("\n[OK] No missing security headers");
            } else {
                println!("\n=== Missing Security Headers ({}) ===", missing.len());
                for name in &missing {
                    match header_doc(name) {
                        Some(link) => println!("  - {} <{}>", name, link),
                        None => println!("  - {}", name),
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to fetch headers: {}", e);
            ExitCode::from(2)
        }
    }
}

fn toggle(section: &str, state: &str) -> anyhow::Result<()> {
    let toggle: ScanToggle = section.parse()?;
    let enabled = match state.to_lowercase().as_str() {
        "on" | "true" | "enable" => true,
        "off" | "false" | "disable" => false,
        other => anyhow::bail!("Expected on or off, got '{}'", other),
    };

    let prefs = open_prefs()?;
    prefs
        .set(toggle.as_str(), enabled)
        .with_context(|| format!("Failed to save {}", prefs.path().display()))?;

    println!("{}: {}", toggle, if enabled { "on" } else { "off" });
    Ok(())
}

fn list_toggles() -> anyhow::Result<()> {
    let prefs = open_prefs()?;
    let sections = ScanConfiguration::load(&prefs)?;

    println!("Preferences: {}", prefs.path().display());
    for toggle in ScanToggle::ALL {
        let state = if sections.is_enabled(toggle) { "on" } else { "off" };
        println!("  {:<14} {}", toggle, state);
    }
    Ok(())
}
