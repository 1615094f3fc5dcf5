use chrono::NaiveTime;

use crate::{core::time_of_day::TimeOfDay, quantity::time::Hours};

/// Daily power schedule of a device group.
///
/// The two times are independent: a power-off time earlier than the power-on time means the
/// device stays on past midnight.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    pub power_on: TimeOfDay,
    pub power_off: TimeOfDay,
}

impl Schedule {
    pub const fn new(power_on: TimeOfDay, power_off: TimeOfDay) -> Self {
        Self { power_on, power_off }
    }

    /// Minutes per day the device is powered on, in `0..1440`.
    ///
    /// Equal power-on and power-off times yield zero: the device is considered never on.
    #[must_use]
    pub const fn operating_minutes(self) -> u32 {
        let start = self.power_on.minutes_since_midnight();
        let end = self.power_off.minutes_since_midnight();
        if end >= start { end - start } else { end + TimeOfDay::MINUTES_PER_DAY - start }
    }

    pub fn operating_hours(self) -> Hours {
        Hours::from_minutes(self.operating_minutes())
    }

    pub fn off_hours(self) -> Hours {
        Hours::FULL_DAY - self.operating_hours()
    }

    /// Whether the device is on at the given time, that is `now` lies within `[power_on, power_off)`.
    #[must_use]
    pub fn is_powered_on(self, now: NaiveTime) -> bool {
        let now = TimeOfDay::from(now);
        if self.power_on <= self.power_off {
            self.power_on <= now && now < self.power_off
        } else {
            now >= self.power_on || now < self.power_off
        }
    }
}
