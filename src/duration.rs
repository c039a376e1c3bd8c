/// Duration token parsing: `<number>[s|m|h|d|S]` to seconds
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    SiderealDay,
}

impl Unit {
    pub fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            's' => Some(Unit::Second),
            'm' => Some(Unit::Minute),
            'h' => Some(Unit::Hour),
            'd' => Some(Unit::Day),
            'S' => Some(Unit::SiderealDay),
            _ => None,
        }
    }

    /// Multiplier from this unit to seconds.
    pub fn seconds(self) -> f64 {
        match self {
            Unit::Second => 1.0,
            Unit::Minute => 60.0,
            Unit::Hour => 3600.0,
            Unit::Day => 24.0 * 3600.0 + 0.002,
            Unit::SiderealDay => 24.0 * 3600.0 + 39.0 * 60.0 + 35.24409,
        }
    }
}

/// Parse a single duration token into seconds.
///
/// An empty token yields `Ok(None)` and is left to the caller to interpret.
/// A trailing character that is not a known unit stays part of the number,
/// so `"10x"` fails rather than being read as ten seconds.
pub fn parse_duration(token: &str) -> Result<Option<f64>> {
    let trimmed = token.trim();
    let Some(last) = trimmed.chars().last() else {
        return Ok(None);
    };

    let (number, unit) = match Unit::from_suffix(last) {
        Some(unit) => (&trimmed[..trimmed.len() - last.len_utf8()], unit),
        None => (trimmed, Unit::Second),
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| Error::InvalidDuration(token.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidDuration(token.to_string()));
    }

    Ok(Some(unit.seconds() * value))
}

/// Sum several tokens into one sleep time. Empty tokens count as zero.
pub fn total_duration<I, S>(tokens: I) -> Result<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total = 0.0;
    for token in tokens {
        total += parse_duration(token.as_ref())?.unwrap_or(0.0);
    }
    Ok(total)
}
