use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{Field, RepeatTime, Time};

/// A `t=` line with the `r=` lines that follow it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDescription {
    time: Time,
    repeat_times: Vec<RepeatTime>,
}

impl TimeDescription {
    pub fn new(time: Time) -> Self {
        TimeDescription {
            time,
            repeat_times: Vec::new(),
        }
    }

    pub fn with_repeat(mut self, repeat: RepeatTime) -> Self {
        self.repeat_times.push(repeat);
        self
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn repeat_times(&self) -> &[RepeatTime] {
        &self.repeat_times
    }

    pub fn add_repeat_time(&mut self, repeat: RepeatTime) {
        self.repeat_times.push(repeat);
    }
}

impl Default for TimeDescription {
    fn default() -> Self {
        TimeDescription::new(Time::permanent())
    }
}

impl fmt::Display for TimeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.time.to_line())?;
        for repeat in &self.repeat_times {
            f.write_str(&repeat.to_line())?;
        }
        Ok(())
    }
}
