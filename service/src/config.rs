use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default AssemblyAI API base URL used when `ASSEMBLY_AI_BASE_URL` is not set.
pub const DEFAULT_ASSEMBLY_AI_BASE_URL: &str = "https://api.assemblyai.com/v2";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// URL (or shared-volume path) of the recorded answer to evaluate.
    #[arg(short, long, env)]
    media_url: Option<String>,

    /// Path to a recorded audio analysis report (`{"status": ..., ...}` JSON).
    /// Used when no AssemblyAI API key is configured.
    #[arg(long, env)]
    audio_result_path: Option<PathBuf>,

    /// Path to a recorded facial emotion analysis report (`{"status": ..., ...}` JSON).
    #[arg(long, env)]
    facial_result_path: Option<PathBuf>,

    /// The API key to use when calling the AssemblyAI API.
    #[arg(long, env)]
    assembly_ai_api_key: Option<String>,

    /// The base URL of the AssemblyAI API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ASSEMBLY_AI_BASE_URL)]
    assembly_ai_base_url: String,

    /// Milliseconds to wait between AssemblyAI transcript status polls
    #[arg(long, env, default_value_t = 3000)]
    pub assembly_ai_poll_interval_ms: u64,

    /// Maximum number of AssemblyAI status polls before giving up
    #[arg(long, env, default_value_t = 100)]
    pub assembly_ai_max_polls: u32,

    /// Clamp the aggregate score into [0, 100]. The additive score is left
    /// unbounded when not set.
    #[arg(long, env, default_value_t = false)]
    pub clamp_aggregate_score: bool,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }

    pub fn audio_result_path(&self) -> Option<&Path> {
        self.audio_result_path.as_deref()
    }

    pub fn facial_result_path(&self) -> Option<&Path> {
        self.facial_result_path.as_deref()
    }

    /// Returns the AssemblyAI API key, if configured.
    pub fn assembly_ai_api_key(&self) -> Option<String> {
        self.assembly_ai_api_key.clone()
    }

    /// Returns the AssemblyAI API base URL.
    pub fn assembly_ai_base_url(&self) -> &str {
        &self.assembly_ai_base_url
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}
