use std::fmt;

use nom::{
    character::complete::{digit1, space1},
    combinator::{all_consuming, map_res},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::split_line;
use crate::primitives::typed_time::{format_signed_typed_time, parse_signed_typed_time};

/// One `<adjustment-time> <offset>` pair of a `z=` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZoneAdjustment {
    pub time: u64,
    pub offset: i64,
}

/// Time zone adjustments line (`z=`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZone {
    adjustments: Vec<TimeZoneAdjustment>,
}

fn parse_time_zone_nom(input: &str) -> IResult<&str, Vec<(u64, i64)>> {
    all_consuming(separated_list1(
        space1,
        separated_pair(
            map_res(digit1, |s: &str| s.parse::<u64>()),
            space1,
            parse_signed_typed_time,
        ),
    ))(input)
}

impl TimeZone {
    pub fn new(adjustments: Vec<TimeZoneAdjustment>) -> Result<Self> {
        if adjustments.is_empty() {
            return Err(Error::invalid("time zone", "at least one adjustment is required"));
        }
        Ok(TimeZone { adjustments })
    }

    pub fn adjustments(&self) -> &[TimeZoneAdjustment] {
        &self.adjustments
    }
}

impl Field for TimeZone {
    const TYPE: char = 'z';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let (_, pairs) = parse_time_zone_nom(value)
            .map_err(|_| Error::parse(line, "expected '<adjustment-time> <offset>' pairs"))?;
        TimeZone::new(
            pairs
                .into_iter()
                .map(|(time, offset)| TimeZoneAdjustment { time, offset })
                .collect(),
        )
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("z=")?;
        for (i, adjustment) in self.adjustments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", adjustment.time, format_signed_typed_time(adjustment.offset))?;
        }
        Ok(())
    }
}
