//! Typed time values (`r=` and `z=` lines)
//!
//! A typed time is a decimal number with an optional unit suffix:
//! `d` (days), `h` (hours), `m` (minutes) or `s` (seconds).
//! Without a suffix the value is in seconds.

use nom::{
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map_res, opt},
    sequence::pair,
    IResult,
};

use crate::error::{Error, Result};

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

fn unit_multiplier(unit: Option<char>) -> u64 {
    match unit {
        Some('d') => SECONDS_PER_DAY,
        Some('h') => SECONDS_PER_HOUR,
        Some('m') => SECONDS_PER_MINUTE,
        _ => 1,
    }
}

/// nom parser for an unsigned typed time, returning seconds
pub fn parse_typed_time(input: &str) -> IResult<&str, u64> {
    let (input, (value, unit)) = pair(
        map_res(digit1, |s: &str| s.parse::<u64>()),
        opt(one_of("dhms")),
    )(input)?;

    match value.checked_mul(unit_multiplier(unit)) {
        Some(seconds) => Ok((input, seconds)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TooLarge,
        ))),
    }
}

/// nom parser for a typed time with an optional leading `-`
pub fn parse_signed_typed_time(input: &str) -> IResult<&str, i64> {
    let (rest, negative) = opt(char('-'))(input)?;
    let (rest, seconds) = parse_typed_time(rest)?;
    let seconds = i64::try_from(seconds).map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge))
    })?;
    Ok((rest, if negative.is_some() { -seconds } else { seconds }))
}

/// Parse a complete typed time token into seconds
pub fn typed_time(token: &str) -> Result<u64> {
    all_consuming(parse_typed_time)(token)
        .map(|(_, seconds)| seconds)
        .map_err(|_| Error::invalid("typed time", format!("'{}' is not a typed time", token)))
}

/// Parse a complete signed typed time token into seconds
pub fn signed_typed_time(token: &str) -> Result<i64> {
    all_consuming(parse_signed_typed_time)(token)
        .map(|(_, seconds)| seconds)
        .map_err(|_| Error::invalid("typed time", format!("'{}' is not a typed time", token)))
}

/// Format seconds using the largest unit that divides the value exactly
pub fn format_typed_time(seconds: u64) -> String {
    if seconds == 0 {
        "0".to_string()
    } else if seconds % SECONDS_PER_DAY == 0 {
        format!("{}d", seconds / SECONDS_PER_DAY)
    } else if seconds % SECONDS_PER_HOUR == 0 {
        format!("{}h", seconds / SECONDS_PER_HOUR)
    } else if seconds % SECONDS_PER_MINUTE == 0 {
        format!("{}m", seconds / SECONDS_PER_MINUTE)
    } else {
        seconds.to_string()
    }
}

/// Signed counterpart of [`format_typed_time`]
pub fn format_signed_typed_time(seconds: i64) -> String {
    if seconds < 0 {
        format!("-{}", format_typed_time(seconds.unsigned_abs()))
    } else {
        format_typed_time(seconds as u64)
    }
}
