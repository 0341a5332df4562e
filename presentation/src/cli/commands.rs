//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for pickflick
#[derive(Parser, Debug)]
#[command(name = "pickflick")]
#[command(author, version, about = "Find a movie everybody in the room wants to watch")]
#[command(long_about = r#"
PickFlick helps a group of friends agree on a movie.

One participant creates a room and shares its code, the others enter it.
Everybody swipes through the same ten movies, liking or discarding each one.
The room's result is every movie that nobody discarded and everybody liked.

This binary runs the bot against a console session (the default) or replays
recorded chat platform updates (--replay).

Configuration files are loaded from (in priority order):
1. PICKFLICK_<SECTION>__<KEY>             Environment variables
2. --config <path>                        Explicit config file
3. ./pickflick.toml                       Project-level config
4. ~/.config/pickflick/config.toml        Global config

Example:
  pickflick
  pickflick --participant 42
  pickflick --replay updates.jsonl
"#)]
pub struct Cli {
    /// Participant (chat id) the console session starts as
    #[arg(short, long, value_name = "ID", default_value_t = 1, allow_negative_numbers = true)]
    pub participant: i64,

    /// Replay recorded updates (one JSON update per line) instead of the console
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not echo replies while replaying
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for daily rolling log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Keep no console line history
    #[arg(long)]
    pub no_history: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
