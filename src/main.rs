use std::process::{self, ExitCode};
use std::time::Instant;

use clap::Parser;
use tracing::{debug, trace, warn};

mod cli;
mod config;
mod duration;
mod error;
mod format;
mod logging;
mod timer;

use crate::config::Config;
use crate::duration::{parse_duration, total_duration};
use crate::error::{Error, Result};
use crate::timer::Settings;

/// Exit status used when the countdown is interrupted with Ctrl-C.
const INTERRUPTED: i32 = 130;

fn main() -> ExitCode {
    // Start-up correction is measured from here.
    let started = Instant::now();

    let args = cli::Args::parse();
    logging::init(args.verbose);
    trace!("args: {args:?}");

    // Leave the countdown line intact and put the prompt below it.
    if let Err(err) = ctrlc::set_handler(|| {
        eprintln!();
        process::exit(INTERRUPTED);
    }) {
        warn!("Could not install Ctrl-C handler: {err}");
    }

    match run(&args, started) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ (Error::InvalidDuration(_) | Error::ZeroInterval)) => {
            eprintln!("sleepy: {err}");
            eprintln!("Try 'sleepy --help' for more information.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("sleepy: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args, started: Instant) -> Result<()> {
    let sleeptime = total_duration(&args.durations)?;
    trace!("sleep time {sleeptime}");

    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let config = config::load_config(&config_path);
    let settings = resolve(args, &config)?;

    let summary = timer::sleep(sleeptime, settings, started)?;
    debug!(
        "done after {} passes, correction {:.6}s, {} anomalies",
        summary.passes,
        summary.correction,
        summary.anomalies.len()
    );
    if let Some(last) = summary.last_step {
        trace!("final pause {}s with {}s left", last.pause, last.remaining);
    }
    Ok(())
}

/// Countdown settings from the command line, then the config file, then
/// built-in defaults.
fn resolve(args: &cli::Args, config: &Config) -> Result<Settings> {
    let defaults = Settings::default();

    let interval_token = args.interval.as_deref().unwrap_or(config.interval());
    let interval = parse_duration(interval_token)?.unwrap_or(defaults.interval);
    if interval <= 0.0 {
        return Err(Error::ZeroInterval);
    }

    let template = match &args.format {
        Some(format) => format.clone(),
        None => config.template().to_string(),
    };

    Ok(Settings {
        interval,
        verbosity: args.verbose,
        template,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DEFAULT_TEMPLATE;

    fn args(extra: &[&str]) -> cli::Args {
        let mut argv = vec!["sleepy"];
        argv.extend_from_slice(extra);
        cli::Args::try_parse_from(argv).unwrap()
    }

    fn config(interval: Option<&str>, format: Option<&str>) -> Config {
        Config {
            interval: interval.map(str::to_string),
            format: format.map(str::to_string),
        }
    }

    #[test]
    fn defaults_without_flags_or_config() {
        let settings = resolve(&args(&[]), &Config::default()).unwrap();
        assert_eq!(settings.interval, 1.0);
        assert_eq!(settings.template, DEFAULT_TEMPLATE);
        assert_eq!(settings.verbosity, 0);
    }

    #[test]
    fn config_overrides_defaults() {
        let config = config(Some("0.5"), Some("{remaining}"));
        let settings = resolve(&args(&["-v"]), &config).unwrap();
        assert_eq!(settings.interval, 0.5);
        assert_eq!(settings.template, "{remaining}");
        assert_eq!(settings.verbosity, 1);
    }

    #[test]
    fn flags_override_config() {
        let config = config(Some("0.5"), Some("{remaining}"));
        let args = args(&["--interval", "2m", "--format", "{passed}"]);
        let settings = resolve(&args, &config).unwrap();
        assert_eq!(settings.interval, 120.0);
        assert_eq!(settings.template, "{passed}");
    }

    #[test]
    fn flag_overrides_only_what_it_names() {
        let config = config(Some("3"), Some("{remaining}"));
        let settings = resolve(&args(&["--interval", "2"]), &config).unwrap();
        assert_eq!(settings.interval, 2.0);
        assert_eq!(settings.template, "{remaining}");
    }

    #[test]
    fn zero_interval_is_rejected() {
        for interval in ["0", "0s", "0.0m"] {
            let result = resolve(&args(&["--interval", interval]), &Config::default());
            assert!(matches!(result, Err(Error::ZeroInterval)), "{interval}: {result:?}");
        }

        let result = resolve(&args(&[]), &config(Some("0"), None));
        assert!(matches!(result, Err(Error::ZeroInterval)), "{result:?}");
    }

    #[test]
    fn empty_interval_falls_back_to_one_second() {
        let settings = resolve(&args(&["--interval", ""]), &config(Some("5"), None)).unwrap();
        assert_eq!(settings.interval, 1.0);
    }

    #[test]
    fn bad_interval_is_invalid_duration() {
        let result = resolve(&args(&["--interval", "soon"]), &Config::default());
        assert!(matches!(result, Err(Error::InvalidDuration(t)) if t == "soon"));
    }
}
