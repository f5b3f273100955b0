//! allowgate CLI - operator tooling for allow-list files

use allowgate_core::{AllowList, AuthRequest, Authorizer, MembershipMode};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "allowgate")]
#[command(about = "allowgate - static allow-list authorization tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a username is authorized by an allow-list
    Check {
        /// Allow-list file path
        #[arg(short, long, default_value = "users.json")]
        config: PathBuf,

        /// Membership mode (presence, flag)
        #[arg(short, long, default_value = "presence")]
        mode: MembershipMode,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Username to check
        username: String,
    },

    /// Validate an allow-list file
    Validate {
        /// Allow-list file path
        file: PathBuf,
    },

    /// Run concurrent lookups and compare them against a sequential pass
    Benchmark {
        /// Allow-list file path (a synthetic list is used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Membership mode (presence, flag)
        #[arg(short, long, default_value = "presence")]
        mode: MembershipMode,

        /// Number of requests to generate
        #[arg(short, long, default_value = "100000")]
        requests: usize,

        /// Number of parallel threads
        #[arg(short, long, default_value = "8")]
        threads: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("allowgate=debug")
            .init();
    }

    match cli.command {
        Commands::Check {
            config,
            mode,
            format,
            username,
        } => check_command(&config, mode, &format, username),
        Commands::Validate { file } => validate_command(&file),
        Commands::Benchmark {
            config,
            mode,
            requests,
            threads,
        } => benchmark_command(config.as_deref(), mode, requests, threads),
    }
}

fn load(path: &Path) -> Result<AllowList> {
    tracing::debug!("Loading allow-list from {}", path.display());
    AllowList::from_path(path)
        .with_context(|| format!("Failed to load allow-list from {}", path.display()))
}

fn check_command(config: &Path, mode: MembershipMode, format: &str, username: String) -> Result<()> {
    let authorizer = Authorizer::with_mode(load(config)?, mode);
    let request = AuthRequest::new(username);
    let response = authorizer.check(&request);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        _ => {
            let status = if response.authorized {
                "AUTHORIZED".green()
            } else {
                "UNAUTHORIZED".red()
            };

            println!("{} Authorization Result", "═".blue().bold());
            println!("{} Username: {:?}", "▸".blue(), request.username);
            println!("{} Status: {}", "▸".blue(), status);
            println!("{} Membership mode: {}", "▸".blue(), mode);
            if let Some(flag) = authorizer.allow_list().flag(&request.username) {
                println!("{} Listed with flag: {}", "▸".blue(), flag);
            }
        }
    }

    Ok(())
}

fn validate_command(file: &Path) -> Result<()> {
    println!("{} Validating {}...", "→".blue(), file.display());

    match AllowList::from_path(file) {
        Ok(list) => {
            let flagged_off = list.usernames().filter(|u| list.flag(u) == Some(false)).count();
            println!("{} Allow-list is valid!", "✓".green());
            println!("  Entries: {}", list.len());
            println!("  Entries with flag false: {}", flagged_off);
        }
        Err(e) => {
            println!("{} Allow-list is invalid:", "✗".red());
            println!("  {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn synthetic_allow_list() -> Result<AllowList> {
    let entries: serde_json::Map<String, serde_json::Value> = (0..1000)
        .map(|i| (format!("user-{}", i), serde_json::Value::Bool(i % 2 == 0)))
        .collect();
    Ok(AllowList::from_json_str(
        &serde_json::Value::Object(entries).to_string(),
    )?)
}

fn benchmark_command(
    config: Option<&Path>,
    mode: MembershipMode,
    requests: usize,
    threads: usize,
) -> Result<()> {
    use rayon::prelude::*;

    println!("{} Running benchmark...", "→".blue());
    println!("  Requests: {}", requests);
    println!("  Threads: {}", threads);
    println!("  Membership mode: {}", mode);

    let allow_list = match config {
        Some(path) => load(path)?,
        None => synthetic_allow_list()?,
    };

    // Even requests hit listed names, odd requests miss
    let mut listed: Vec<String> = allow_list.usernames().map(str::to_string).collect();
    listed.sort_unstable();
    let test_requests: Vec<AuthRequest> = (0..requests)
        .map(|i| match listed.get((i / 2) % listed.len().max(1)) {
            Some(name) if i % 2 == 0 => AuthRequest::new(name.clone()),
            _ => AuthRequest::new(format!("absent-{}", i)),
        })
        .collect();

    let authorizer = Authorizer::with_mode(allow_list, mode);

    let reference: Vec<bool> = test_requests
        .iter()
        .map(|r| authorizer.check(r).authorized)
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build thread pool")?;

    let start = Instant::now();
    let results: Vec<bool> = pool.install(|| {
        test_requests
            .par_iter()
            .map(|r| authorizer.check(r).authorized)
            .collect()
    });
    let duration = start.elapsed();

    let mismatches = results
        .iter()
        .zip(&reference)
        .filter(|(a, b)| a != b)
        .count();
    let authorized = results.iter().filter(|&&r| r).count();
    let throughput = requests as f64 / duration.as_secs_f64().max(f64::EPSILON);

    println!("\n{} Benchmark Results", "═".blue().bold());
    println!("{} Total requests: {}", "▸".blue(), requests);
    println!("{} Authorized: {}", "▸".blue(), authorized);
    println!("{} Unauthorized: {}", "▸".blue(), requests - authorized);
    println!("{} Duration: {:.3}s", "▸".blue(), duration.as_secs_f64());
    println!("{} Throughput: {:.0} req/sec", "▸".blue(), throughput);

    if mismatches > 0 {
        anyhow::bail!("{} concurrent results differ from the sequential reference", mismatches);
    }
    println!("{} Concurrent results match sequential reference", "✓".green());

    Ok(())
}
