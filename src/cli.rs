//! CLI definitions for ansimirror
//!
//! Lives in the library so integration tests can parse arguments without
//! spawning the binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::render::{Pacing, TimingMode};

/// Version string: `0.1.0-abc1234 (2026-01-01)` for dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("ANSIMIRROR_BUILD_DATE"),
    ")"
);

/// Version string: `0.1.0 (2026-01-01)` for release builds.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ANSIMIRROR_BUILD_DATE"),
    ")"
);

/// ANSI art mirror with modem download emulation
#[derive(Parser, Debug)]
#[command(name = "ansimirror")]
#[command(version = VERSION)]
#[command(about = "Serve CP437 ANSI art over Gemini and HTTP at modem speed")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Gemini (and optionally HTTP) server
    Serve(ServeArgs),

    /// Render an artwork to stdout at modem speed
    #[command(long_about = "Render an artwork to stdout at modem speed.

The file is transcoded from CP437 to UTF-8, wrapped at 80 columns and
paced like an analog modem transfer. Without flags the configured modem
settings are used.

EXAMPLES:
    ansimirror play art.ans                  Configured default speed
    ansimirror play art.ans --bitrate 2400   Line by line at 2400 bps
    ansimirror play art.ans -b 14400 -s      Character by character
    ansimirror play art.ans --quick          No delay")]
    Play(PlayArgs),

    /// List the artworks in the archive
    List {
        /// Archive directory (defaults to the configured root)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Archive directory (defaults to the configured root)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Gemini listen address
    #[arg(long, value_name = "ADDR")]
    pub gemini: Option<String>,

    /// HTTP listen address
    #[arg(long, value_name = "ADDR", conflicts_with = "no_http")]
    pub http: Option<String>,

    /// Serve Gemini only
    #[arg(long)]
    pub no_http: bool,

    /// Host name shown on the front page
    #[arg(long)]
    pub hostname: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Artwork file to render
    pub file: PathBuf,

    /// Modem speed in bits per second
    #[arg(short, long, value_name = "BPS", value_parser = clap::value_parser!(u32).range(1..))]
    pub bitrate: Option<u32>,

    /// Pace each character instead of each line
    #[arg(short, long)]
    pub simulated: bool,

    /// Skip the modem and print at full speed
    #[arg(short, long, conflicts_with_all = ["bitrate", "simulated"])]
    pub quick: bool,
}

impl PlayArgs {
    /// Resolve the flags against the configured default.
    pub fn pacing(&self, default: Pacing) -> Pacing {
        if self.quick {
            return Pacing::Unthrottled;
        }

        let (default_bitrate, default_mode) = match default {
            Pacing::Throttled { bitrate, mode } => (bitrate.get(), mode),
            Pacing::Unthrottled => (0, TimingMode::PerLine),
        };
        let mode = if self.simulated {
            TimingMode::PerCharacter
        } else if self.bitrate.is_some() {
            TimingMode::PerLine
        } else {
            default_mode
        };
        let bitrate = self.bitrate.unwrap_or(default_bitrate);
        if bitrate == 0 && self.simulated {
            // Unthrottled default but per-character requested: use the stock modem.
            return Pacing::new(crate::config::ModemConfig::default().bitrate, mode);
        }
        Pacing::new(bitrate, mode)
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}
