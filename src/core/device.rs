use std::num::NonZeroU32;

use bon::bon;

use crate::{
    core::{error::InvalidConsumptionError, schedule::Schedule},
    quantity::{energy::KilowattHours, power::Kilowatts, time::Hours},
};

/// One or more identical physical devices sharing a name, a schedule, and a consumption rate.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceGroup {
    pub name: String,
    pub group: String,
    pub schedule: Schedule,
    pub count: NonZeroU32,

    /// Draw of a single device while powered on.
    pub consumption: Kilowatts,
}

#[bon]
impl DeviceGroup {
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        #[builder(into)] group: String,
        schedule: Schedule,
        count: i64,
        consumption: Kilowatts,
    ) -> Result<Self, InvalidConsumptionError> {
        let count = u32::try_from(count)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(InvalidConsumptionError::Count(count))?;
        if !consumption.0.is_finite() || consumption.0 <= 0.0 {
            return Err(InvalidConsumptionError::ConsumptionPerHour(consumption.0));
        }
        Ok(Self { name, group, schedule, count, consumption })
    }
}

impl DeviceGroup {
    pub fn operating_hours(&self) -> Hours {
        self.schedule.operating_hours()
    }

    /// Energy actually used by all devices of the group per day.
    pub fn daily_consumption(&self) -> KilowattHours {
        self.consumption * self.operating_hours() * f64::from(self.count.get())
    }

    /// Energy all devices of the group would use if they ran around the clock.
    pub fn potential_consumption(&self) -> KilowattHours {
        self.consumption * Hours::FULL_DAY * f64::from(self.count.get())
    }

    /// Energy avoided per day compared to running around the clock.
    pub fn daily_savings(&self) -> KilowattHours {
        self.consumption * self.schedule.off_hours() * f64::from(self.count.get())
    }
}
