use std::fmt;

use chrono::{DateTime, Utc};
use nom::{
    character::complete::{digit1, space1},
    combinator::all_consuming,
    sequence::separated_pair,
    IResult,
};
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::{ntp, split_line};

/// Timing line (`t=<start-time> <stop-time>`) in NTP seconds
///
/// `t=0 0` is a permanent session; a zero stop time alone means the session
/// is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    start: u64,
    stop: u64,
}

fn parse_time_nom(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(digit1, space1, digit1))(input)
}

impl Time {
    pub fn new(start: u64, stop: u64) -> Result<Self> {
        if stop != 0 && stop < start {
            return Err(Error::invalid("time", format!("stop time {} precedes start time {}", stop, start)));
        }
        Ok(Time { start, stop })
    }

    /// `t=0 0`
    pub fn permanent() -> Self {
        Time { start: 0, stop: 0 }
    }

    /// A session bounded by two UTC date-times
    pub fn between(start: &DateTime<Utc>, stop: &DateTime<Utc>) -> Result<Self> {
        Time::new(ntp::from_datetime(start)?, ntp::from_datetime(stop)?)
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn stop(&self) -> u64 {
        self.stop
    }

    pub fn is_permanent(&self) -> bool {
        self.start == 0 && self.stop == 0
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        ntp::to_datetime(self.start)
    }

    pub fn stop_time(&self) -> Option<DateTime<Utc>> {
        ntp::to_datetime(self.stop)
    }
}

impl Field for Time {
    const TYPE: char = 't';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let (_, (start, stop)) =
            parse_time_nom(value).map_err(|_| Error::parse(line, "expected '<start-time> <stop-time>'"))?;

        if !ntp::is_valid_ntp(start) || !ntp::is_valid_ntp(stop) {
            return Err(Error::parse(line, "times must be NTP seconds"));
        }
        let start = start.parse::<u64>().map_err(|e| Error::parse(line, e.to_string()))?;
        let stop = stop.parse::<u64>().map_err(|e| Error::parse(line, e.to_string()))?;
        Time::new(start, stop).map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} {}", self.start, self.stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_time() {
        let time = Time::parse_line("t=2873397496 2873404696").unwrap();
        assert_eq!(time.start(), 2873397496);
        assert_eq!(time.stop(), 2873404696);
        assert!(!time.is_permanent());
        assert_eq!(time.to_string(), "t=2873397496 2873404696");

        assert!(Time::parse_line("t=0 0").unwrap().is_permanent());
    }

    #[test]
    fn test_parse_time_invalid() {
        assert!(Time::parse_line("t=0").is_err());
        assert!(Time::parse_line("t=-1 0").is_err());
        assert!(Time::parse_line("t=01 0").is_err());
        assert!(Time::parse_line("t=10 5").is_err());
    }

    #[test]
    fn test_between_datetimes() {
        let start = Utc.with_ymd_and_hms(2018, 1, 8, 10, 0, 0).unwrap();
        let stop = Utc.with_ymd_and_hms(2018, 1, 8, 12, 0, 0).unwrap();
        let time = Time::between(&start, &stop).unwrap();
        assert_eq!(time.start(), 3_724_394_400);
        assert_eq!(time.stop(), 3_724_401_600);
        assert_eq!(time.start_time(), Some(start));
        assert_eq!(Time::permanent().stop_time(), None);
    }
}
