/// Timer module for the self-correcting countdown
use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::error::{Anomaly, Result};
use crate::format::{DEFAULT_TEMPLATE, format_progress};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Start-up corrections above this many seconds are reported.
const SLOW_STARTUP_SECS: f64 = 10.0;

/// Erases the tail of a longer previous line before returning the cursor.
const LINE_END: &str = "    \r";

/// Shortest pause once shrinking starts, unless the interval itself is shorter.
const MIN_PAUSE_SECS: f64 = 0.001;

/// Monotonic time source the countdown reads and sleeps on.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, dur: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, dur: Duration) {
        thread::sleep(dur);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, dur: Duration) {
        (**self).sleep(dur);
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Seconds between redraws.
    pub interval: f64,
    /// Diagnostics tagged with a level above this are suppressed.
    pub verbosity: u8,
    pub template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: 1.0,
            verbosity: 0,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// One pass through the loop that ended in a sleep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub remaining: f64,
    pub pause: f64,
}

/// What a finished countdown observed.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub correction: f64,
    pub anomalies: Vec<Anomaly>,
    /// Number of sleeps taken.
    pub passes: usize,
    pub last_step: Option<Step>,
}

pub struct Countdown<C, W> {
    settings: Settings,
    clock: C,
    out: W,
}

impl<C: Clock, W: Write> Countdown<C, W> {
    pub fn new(settings: Settings, clock: C, out: W) -> Self {
        Self {
            settings,
            clock,
            out,
        }
    }

    /// Block until `total` seconds have passed since `reference`.
    ///
    /// Time already spent between `reference` and this call is subtracted
    /// from the wait. Near the deadline the pause between wake-ups halves
    /// on every pass and never exceeds the time left, so the final wake
    /// lands on the deadline instead of up to one interval past it.
    pub fn run(&mut self, total: f64, reference: Instant) -> Result<Summary> {
        self.run_observed(total, reference, |_| {})
    }

    /// Like [`Countdown::run`], handing every [`Step`] to `observe` right
    /// after its sleep.
    pub fn run_observed<F>(
        &mut self,
        total: f64,
        reference: Instant,
        mut observe: F,
    ) -> Result<Summary>
    where
        F: FnMut(Step),
    {
        let interval = self.settings.interval;
        let startsleep = self.clock.now();
        let correction = signed_secs(reference, startsleep);

        self.diag(3, format_args!("starttime {reference:?}"));
        self.diag(3, format_args!("Correction {correction}"));

        let mut summary = Summary {
            correction,
            ..Summary::default()
        };

        // A negative correction lengthens the wait; it is reported, not clamped.
        if correction < 0.0 {
            self.report(0, Anomaly::ClockAnomaly(correction), &mut summary);
        } else if correction > SLOW_STARTUP_SECS {
            self.report(0, Anomaly::SlowStartup(correction), &mut summary);
        }

        let sleeptime_corr = total - correction;
        if sleeptime_corr < 0.0 {
            self.report(1, Anomaly::DeadlineAlreadyPassed(sleeptime_corr), &mut summary);
        }
        self.diag(3, format_args!("sleep time {total}, corrected {sleeptime_corr}"));

        let mut pause = interval;
        let floor = MIN_PAUSE_SECS.min(interval);
        let mut index = 0;

        loop {
            let passed = signed_secs(startsleep, self.clock.now());
            let remaining = sleeptime_corr - passed;
            if remaining <= 0.0 {
                break;
            }

            // Between 0.9 and 1.5 intervals both of these fire.
            if remaining > 0.9 * interval {
                let line =
                    format_progress(&self.settings.template, SPINNER[index], total, passed, remaining);
                write!(self.out, "{line}{LINE_END}")?;
                self.out.flush()?;
            }
            // The floor keeps a series that cannot reach the deadline from
            // degrading into nanosecond sleeps.
            if remaining < 1.5 * interval {
                pause = (pause / 2.0).max(floor).min(remaining);
            }

            self.clock.sleep(to_sleep(pause));
            let step = Step { remaining, pause };
            observe(step);
            summary.passes += 1;
            summary.last_step = Some(step);
            index = (index + 1) % SPINNER.len();
        }

        self.diag(2, format_args!("woke after {} passes", summary.passes));
        Ok(summary)
    }

    fn report(&self, level: u8, anomaly: Anomaly, summary: &mut Summary) {
        self.diag(level, format_args!("{anomaly}"));
        summary.anomalies.push(anomaly);
    }

    fn diag(&self, level: u8, message: fmt::Arguments<'_>) {
        if level > self.settings.verbosity {
            return;
        }
        match level {
            0 => warn!("{message}"),
            1 => info!("{message}"),
            2 => debug!("{message}"),
            _ => trace!("{message}"),
        }
    }
}

/// Run a countdown on the real clock, drawing on stderr.
pub fn sleep(total: f64, settings: Settings, reference: Instant) -> Result<Summary> {
    Countdown::new(settings, SystemClock, io::stderr()).run(total, reference)
}

/// Seconds from `from` to `to`, negative when `to` is earlier.
fn signed_secs(from: Instant, to: Instant) -> f64 {
    match to.checked_duration_since(from) {
        Some(elapsed) => elapsed.as_secs_f64(),
        None => -from.duration_since(to).as_secs_f64(),
    }
}

/// Rounded up to whole nanoseconds so every sleep makes progress.
fn to_sleep(pause: f64) -> Duration {
    let nanos = (pause * 1e9).ceil();
    if nanos >= u64::MAX as f64 {
        Duration::MAX
    } else {
        Duration::from_nanos(nanos.max(1.0) as u64)
    }
}
