use chrono::{Local, NaiveDate};

use crate::{
    core::{device::DeviceGroup, savings::project_month_to_date},
    quantity::{energy::KilowattHours, time::Hours},
};

/// Consumption figures of one device group, for charting.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesPoint<'a> {
    pub device_name: &'a str,
    pub group: &'a str,
    pub daily_consumption: KilowattHours,

    /// Daily consumption projected over the elapsed days of the month.
    pub monthly_consumption: KilowattHours,

    pub operating_hours: Hours,
}

/// Build the series for the selected device names, in selection order, as of the current
/// local date.
pub fn per_device_series<'a, 's>(
    groups: &'a [DeviceGroup],
    selection: impl IntoIterator<Item = &'s str>,
) -> Vec<SeriesPoint<'a>> {
    per_device_series_on(groups, selection, Local::now().date_naive())
}

/// Names that match no device group are skipped.
pub fn per_device_series_on<'a, 's>(
    groups: &'a [DeviceGroup],
    selection: impl IntoIterator<Item = &'s str>,
    today: NaiveDate,
) -> Vec<SeriesPoint<'a>> {
    selection
        .into_iter()
        .filter_map(|name| groups.iter().find(|group| group.name == name))
        .map(|group| {
            let daily_consumption = group.daily_consumption();
            SeriesPoint {
                device_name: &group.name,
                group: &group.group,
                daily_consumption,
                monthly_consumption: project_month_to_date(daily_consumption, today),
                operating_hours: group.operating_hours(),
            }
        })
        .collect()
}
