/// CLI module for command-line arguments
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Delay for a specified amount of time, with a countdown.
///
/// Durations are numbers with an optional unit suffix: s (seconds, default),
/// m (minutes), h (hours), d (days) or S (sidereal days). Several durations
/// are added together.
#[derive(Parser, Debug)]
#[command(name = "sleepy", version, about)]
pub struct Args {
    /// Time to sleep, e.g. 1m 30s
    #[arg(value_name = "DURATION", allow_negative_numbers = true)]
    pub durations: Vec<String>,

    /// Be verbose (repeat for more)
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print countdown in these intervals (default 1)
    #[arg(long, value_name = "DURATION")]
    pub interval: Option<String>,

    /// Countdown template using {symbol}, {sleeptime}, {passed} and {remaining}
    #[arg(long, value_name = "TEMPLATE")]
    pub format: Option<String>,

    /// Config file path (default: ~/.config/sleepy/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
