//! # live-probe-cli
//!
//! Command-line front end for [`live_probe`].
//!
//! ## Subcommands
//!
//! - `live` - open one Gemini Live session with the configured key and report the result
//! - `models` - check the key against the REST `generateContent` endpoint per model
//! - `devices` - report local audio and camera availability
//!
//! The key is read from `--api-key`, else from `GOOGLE_API_KEY` / `GEMINI_API_KEY`
//! (after loading `.env` from the working directory).
//!
//! ## Exit status
//!
//! - `0` - the command ran (a failed probe is reported, not fatal)
//! - `1` - the probe failed and `--strict` was given
//! - `2` - no API key could be found

pub mod cli;
pub mod config;
pub mod launcher;
pub mod report;
pub mod telemetry;

pub use cli::Cli;
pub use launcher::run;
