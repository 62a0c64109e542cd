use clap::{Args, Parser, Subcommand};
use live_probe::DEFAULT_MODEL;
use live_probe::gemini::GEMINI_LIVE_URL;

#[derive(Parser, Debug)]
#[command(name = "live-probe", version)]
#[command(about = "Verify that an API key can open a Gemini Live session", long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open one Live session, send a test prompt and report the outcome
    Live(LiveArgs),

    /// Check the key against the REST generateContent endpoint, per model
    Models(ModelsArgs),

    /// Report local audio and camera availability
    Devices,
}

/// Where the API key comes from.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// API key to use instead of the environment
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Environment variable to read the key from (repeatable, checked in order)
    #[arg(long = "env-var", value_name = "NAME", default_values_t = ["GOOGLE_API_KEY".to_string(), "GEMINI_API_KEY".to_string()])]
    pub env_vars: Vec<String>,
}

#[derive(Args, Debug)]
pub struct LiveArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Live model to connect to
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Test prompt sent as the single user turn
    #[arg(long)]
    pub prompt: Option<String>,

    /// Seconds allowed for connecting and the first response (0 waits indefinitely)
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Skip the audio/camera advisory after a successful probe
    #[arg(long)]
    pub skip_devices: bool,

    /// Exit with status 1 when the probe fails
    #[arg(long)]
    pub strict: bool,

    /// Live WebSocket endpoint
    #[arg(long, hide = true, default_value = GEMINI_LIVE_URL)]
    pub endpoint: String,
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Model to check (repeatable)
    #[arg(short, long = "model", value_name = "MODEL")]
    pub models: Vec<String>,

    /// REST base URL
    #[arg(long, hide = true)]
    pub base_url: Option<String>,

    /// Pause between model checks, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub delay_ms: u64,
}
