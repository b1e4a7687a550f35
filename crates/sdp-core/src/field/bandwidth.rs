use std::fmt;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::separated_pair,
    IResult,
};
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::{is_token, is_token_char, split_line};

/// Bandwidth line (`b=<bwtype>:<bandwidth>`), value in kilobits per second
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bandwidth {
    bw_type: String,
    bandwidth: u64,
}

fn parse_bandwidth_nom(input: &str) -> IResult<&str, (&str, u64)> {
    all_consuming(separated_pair(
        take_while1(|c: char| is_token_char(c) && c != ':'),
        char(':'),
        map_res(digit1, |s: &str| s.parse::<u64>()),
    ))(input)
}

impl Bandwidth {
    pub fn new(bw_type: impl Into<String>, bandwidth: u64) -> Result<Self> {
        let bw_type = bw_type.into();
        if !is_token(&bw_type) {
            return Err(Error::invalid("bandwidth type", format!("'{}' is not a token", bw_type)));
        }
        Ok(Bandwidth { bw_type, bandwidth })
    }

    pub fn bw_type(&self) -> &str {
        &self.bw_type
    }

    pub fn bandwidth(&self) -> u64 {
        self.bandwidth
    }
}

impl Field for Bandwidth {
    const TYPE: char = 'b';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let (_, (bw_type, bandwidth)) =
            parse_bandwidth_nom(value).map_err(|_| Error::parse(line, "expected '<bwtype>:<bandwidth>'"))?;
        Bandwidth::new(bw_type, bandwidth)
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b={}:{}", self.bw_type, self.bandwidth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bandwidth() {
        let bw = Bandwidth::parse_line("b=AS:128").unwrap();
        assert_eq!(bw.bw_type(), "AS");
        assert_eq!(bw.bandwidth(), 128);
        assert_eq!(bw.to_string(), "b=AS:128");

        let bw = Bandwidth::parse_line("b=X-YZ:256").unwrap();
        assert_eq!(bw.bw_type(), "X-YZ");
    }

    #[test]
    fn test_parse_bandwidth_invalid() {
        assert!(Bandwidth::parse_line("b=AS").is_err());
        assert!(Bandwidth::parse_line("b=AS:fast").is_err());
        assert!(Bandwidth::parse_line("b=:128").is_err());
        assert!(Bandwidth::parse_line("b=AS:-1").is_err());
        assert!(Bandwidth::new("A S", 1).is_err());
    }
}
