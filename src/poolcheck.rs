//! Entrypoint for the `poolcheck` binary.
//!
//! Reads IP address pool manifests and runs them through the same checks an
//! admission webhook would apply, printing every rejected field.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use args::poolcheck::{Args, Config, OutputFormat};
use clap::Parser;
use common::{logging::enable_logger, profiler::start_puffin_server};
use owo_colors::{OwoColorize, Stream::Stdout};
use poolcheck::{
    pool::PoolObject,
    webhook::{PoolWebhook, Verdict, WebhookError},
};

mod args;
mod common;

/// Read a manifest from a file, or from STDIN if the path is `-`
fn read_manifest(path: &Path) -> Result<String, std::io::Error> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Load and decode a pool manifest
fn load_pool(webhook: &PoolWebhook, path: &Path) -> Result<PoolObject, Box<dyn std::error::Error>> {
    log::debug!("Reading pool manifest {}", path.display());
    let body = read_manifest(path)?;
    let mut pool = webhook.decode(&body)?;
    webhook.default_pool(&mut pool);
    Ok(pool)
}

/// Print the outcome of validating one manifest
fn report(path: &Path, result: &Result<(), WebhookError>, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string(&Verdict::from(result)) {
            Ok(json) => println!("{json}"),
            Err(error) => log::error!("Failed to encode verdict: {}", error),
        },
        OutputFormat::Text => match result {
            Ok(()) => println!(
                "{}: {}",
                path.display(),
                "allowed".if_supports_color(Stdout, |text| text.green())
            ),
            Err(WebhookError::Invalid { kind, name, errors }) => {
                println!(
                    "{}: {} {kind} {name:?}",
                    path.display(),
                    "rejected".if_supports_color(Stdout, |text| text.red())
                );
                for error in errors {
                    println!("  {error}");
                }
            }
            Err(error @ WebhookError::BadRequest(_)) => println!(
                "{}: {} {error}",
                path.display(),
                "rejected".if_supports_color(Stdout, |text| text.red())
            ),
        },
    }
}

/// Validate every manifest, returning the number that were rejected
fn run(manifests: &[PathBuf], config: &Config) -> usize {
    let webhook = PoolWebhook::new();

    // Load the prior version of the pool for update checks
    let old = match &config.old_manifest {
        Some(path) => match load_pool(&webhook, path) {
            Ok(pool) => Some(pool),
            Err(error) => {
                log::error!("Failed to load prior pool {}: {}", path.display(), error);
                return manifests.len();
            }
        },
        None => None,
    };

    let mut rejected = 0;
    for path in manifests {
        profiling::scope!("validate_manifest");
        let result = match load_pool(&webhook, path) {
            Ok(pool) => match &old {
                Some(old) => webhook.validate_update(old, &pool),
                None => webhook.validate_create(&pool),
            },
            Err(error) => Err(WebhookError::BadRequest(error.to_string())),
        };
        if result.is_err() {
            rejected += 1;
        }
        report(path, &result, config.format);
        profiling::finish_frame!();
    }
    rejected
}

pub fn main() {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    if let Err(error) = enable_logger(args.verbose) {
        eprintln!("Failed to initialize logging: {error}");
    }

    // Load the config
    let config = match args.data() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Failed to load configuration: {}", error);
            std::process::exit(1);
        }
    };

    // Start the profiler if requested
    let _server = start_puffin_server(&args.profiler_args);

    let rejected = run(&args.manifests, &config);
    if rejected > 0 {
        log::info!(
            "{} of {} manifest(s) rejected",
            rejected,
            args.manifests.len()
        );
        std::process::exit(1);
    }
    log::debug!("All {} manifest(s) allowed", args.manifests.len());
}
