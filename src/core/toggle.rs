use chrono::{NaiveTime, Timelike};

use crate::core::device::DeviceGroup;

/// Device groups to switch in the current hour.
#[must_use]
#[derive(Debug, Default)]
pub struct DueDevices<'a> {
    pub power_off: Vec<&'a DeviceGroup>,
    pub power_on: Vec<&'a DeviceGroup>,
}

impl DueDevices<'_> {
    pub fn is_empty(&self) -> bool {
        self.power_off.is_empty() && self.power_on.is_empty()
    }
}

/// Select the groups whose power-off or power-on time falls within the hour of `now`.
///
/// Meant to run once an hour, so only the hour is matched.
pub fn due_at(groups: &[DeviceGroup], now: NaiveTime) -> DueDevices<'_> {
    let hour = now.hour();
    DueDevices {
        power_off: groups.iter().filter(|group| group.schedule.power_off.hour() == hour).collect(),
        power_on: groups.iter().filter(|group| group.schedule.power_on.hour() == hour).collect(),
    }
}
