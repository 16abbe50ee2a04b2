use std::path::PathBuf;

use super::ProfilerArgs;

#[derive(clap::Parser)]
#[clap(author, version, about="Validate IP address pool manifests", long_about = None)]
pub struct Args {
    /// Pool manifests (JSON) to validate. Use `-` to read one from stdin
    #[clap(required = true)]
    pub manifests: Vec<PathBuf>,

    #[command(flatten)]
    config_data: Config,

    /// Path to a config file to read
    #[clap(short = 'c', long = "config", conflicts_with = "Config")]
    config_file: Option<PathBuf>,

    #[command(flatten)]
    pub profiler_args: ProfilerArgs,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Get the program configuration from either the config file or the CLI args
    pub fn data(&self) -> Result<Config, Box<dyn std::error::Error>> {
        match self.config_file {
            Some(ref path) => {
                // Read the data from the config file
                let file = std::fs::File::open(path).map_err(|error| match error.kind() {
                    std::io::ErrorKind::NotFound => {
                        log::error!("Config file not found: {}", path.display());
                        std::process::exit(1)
                    }
                    _ => error,
                })?;
                let data: Config = serde_json::from_reader(file)?;
                Ok(data)
            }
            None => Ok(self.config_data.clone()),
        }
    }
}

/// How validation results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per manifest, followed by one line per rejected field
    #[default]
    Text,
    /// One JSON verdict per manifest
    Json,
}

/// Program configuration. Specifiable via either CLI args or a config file
#[derive(Debug, clap::Args, serde::Deserialize, Clone)]
#[group()]
pub struct Config {
    /// Prior version of the pool. When set, every manifest is validated as an update of it
    #[clap(long = "old")]
    #[serde(default, rename = "old")]
    pub old_manifest: Option<PathBuf>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    #[serde(default)]
    pub format: OutputFormat,
}
