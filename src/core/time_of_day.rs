use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{NaiveTime, Timelike};

use crate::core::error::InvalidScheduleError;

/// Wall-clock time of day with minute resolution.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub const MINUTES_PER_DAY: u32 = 24 * 60;

    pub const fn hour(self) -> u32 {
        self.hour
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Minutes since midnight.
    pub const fn minutes_since_midnight(self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidScheduleError;

    /// Accepts `H:MM` and `HH:MM` in 24-hour notation.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidScheduleError { text: text.to_owned() };

        let (hour, minute) = text.split_once(':').ok_or_else(invalid)?;
        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if !(1..=2).contains(&hour.len()) || minute.len() != 2 || !is_digits(hour) || !is_digits(minute)
        {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(Self { hour, minute })
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self { hour: time.hour(), minute: time.minute() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok() -> Result<(), InvalidScheduleError> {
        assert_eq!("08:00".parse::<TimeOfDay>()?, TimeOfDay { hour: 8, minute: 0 });
        assert_eq!("8:05".parse::<TimeOfDay>()?, TimeOfDay { hour: 8, minute: 5 });
        assert_eq!("00:00".parse::<TimeOfDay>()?, TimeOfDay { hour: 0, minute: 0 });
        assert_eq!("23:59".parse::<TimeOfDay>()?, TimeOfDay { hour: 23, minute: 59 });
        assert_eq!("19:30".parse::<TimeOfDay>()?, TimeOfDay { hour: 19, minute: 30 });
        Ok(())
    }

    #[test]
    fn parse_rejects_malformed() {
        for text in [
            "", "24:00", "8", "08:", ":30", "08:5", "08:60", "008:00", "08:000", "-1:00", "+8:00",
            "08-00", "8:5a", " 08:00", "08:00 ", "２３:00",
        ] {
            assert_eq!(
                text.parse::<TimeOfDay>(),
                Err(InvalidScheduleError { text: text.to_owned() }),
                "{text:?}",
            );
        }
    }

    #[test]
    fn display_zero_pads() -> Result<(), InvalidScheduleError> {
        assert_eq!("7:05".parse::<TimeOfDay>()?.to_string(), "07:05");
        Ok(())
    }

    #[test]
    fn minutes_since_midnight_ok() -> Result<(), InvalidScheduleError> {
        assert_eq!("22:30".parse::<TimeOfDay>()?.minutes_since_midnight(), 1350);
        Ok(())
    }
}
