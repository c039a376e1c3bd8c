/// Error and advisory types shared by the parser and the countdown
use std::fmt;
use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Duration token with a non-numeric, negative or non-finite magnitude.
    #[error("invalid time interval: '{0}'")]
    InvalidDuration(String),

    #[error("invalid time interval: the interval must be greater than zero")]
    ZeroInterval,

    /// Writing the progress line failed.
    #[error("cannot write countdown: {0}")]
    Output(#[from] io::Error),
}

/// Conditions noticed while setting up the countdown. None of them abort
/// the run; the countdown sleeps for whatever time remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anomaly {
    /// Measured start-up correction was negative (seconds).
    ClockAnomaly(f64),
    /// Start-up took longer than ten seconds (seconds).
    SlowStartup(f64),
    /// The corrected deadline already lies in the past (seconds missed, negative).
    DeadlineAlreadyPassed(f64),
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::ClockAnomaly(_) => write!(f, "Negative time lapse detected, ignoring"),
            Anomaly::SlowStartup(_) => write!(f, "Took too long to start the program"),
            Anomaly::DeadlineAlreadyPassed(missed) => write!(
                f,
                "Took too long to start the program, missed {} seconds",
                missed
            ),
        }
    }
}
