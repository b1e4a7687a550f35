use std::fmt;

use nom::{
    character::complete::space1,
    combinator::all_consuming,
    multi::separated_list1,
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::split_line;
use crate::primitives::typed_time::{format_typed_time, parse_typed_time};

/// Repeat times line (`r=<interval> <duration> <offset>...`), all in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatTime {
    interval: u64,
    duration: u64,
    offsets: Vec<u64>,
}

fn parse_repeat_nom(input: &str) -> IResult<&str, (u64, u64, Vec<u64>)> {
    all_consuming(tuple((
        parse_typed_time,
        preceded(space1, parse_typed_time),
        preceded(space1, separated_list1(space1, parse_typed_time)),
    )))(input)
}

impl RepeatTime {
    pub fn new(interval: u64, duration: u64, offsets: Vec<u64>) -> Result<Self> {
        if interval == 0 {
            return Err(Error::invalid("repeat interval", "must be greater than zero"));
        }
        if offsets.is_empty() {
            return Err(Error::invalid("repeat offsets", "at least one offset is required"));
        }
        Ok(RepeatTime {
            interval,
            duration,
            offsets,
        })
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }
}

impl Field for RepeatTime {
    const TYPE: char = 'r';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let (_, (interval, duration, offsets)) = parse_repeat_nom(value)
            .map_err(|_| Error::parse(line, "expected '<interval> <duration> <offset>...'"))?;
        RepeatTime::new(interval, duration, offsets).map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for RepeatTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r={} {}", format_typed_time(self.interval), format_typed_time(self.duration))?;
        for offset in &self.offsets {
            write!(f, " {}", format_typed_time(*offset))?;
        }
        Ok(())
    }
}
