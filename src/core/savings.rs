use chrono::{Datelike, Local, NaiveDate};

use crate::{
    core::device::DeviceGroup,
    prelude::*,
    quantity::{energy::KilowattHours, time::Hours},
};

/// Aggregate savings over a collection of device groups.
///
/// Values are unrounded, presentation rounds them.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EnergySavings {
    /// Saved today across all groups, relative to running every device around the clock.
    pub daily: KilowattHours,

    /// Today's savings extrapolated over the days elapsed this month.
    ///
    /// This is a projection, not a sum of recorded history: every day so far is assumed to have
    /// saved as much as today.
    pub projected_month_to_date: KilowattHours,
}

/// Aggregate savings as of the current local date.
///
/// The day of month comes from the system time zone.
pub fn aggregate<'a>(groups: impl IntoIterator<Item = &'a DeviceGroup>) -> EnergySavings {
    aggregate_on(groups, Local::now().date_naive())
}

#[instrument(skip_all, fields(today = %today))]
pub fn aggregate_on<'a>(
    groups: impl IntoIterator<Item = &'a DeviceGroup>,
    today: NaiveDate,
) -> EnergySavings {
    let daily: KilowattHours = groups.into_iter().map(DeviceGroup::daily_savings).sum();
    let projected_month_to_date = project_month_to_date(daily, today);
    debug!(?daily, ?projected_month_to_date, "aggregated");
    EnergySavings { daily, projected_month_to_date }
}

/// Extrapolate a daily figure over the elapsed days of `today`'s month, `today` included.
pub fn project_month_to_date(daily: KilowattHours, today: NaiveDate) -> KilowattHours {
    daily * f64::from(today.day())
}

/// Per-group breakdown, as shown on the dashboard.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeviceSavings {
    pub operating_hours: Hours,
    pub consumption: KilowattHours,
    pub potential_consumption: KilowattHours,
    pub savings: KilowattHours,
}

impl DeviceSavings {
    pub fn of(group: &DeviceGroup) -> Self {
        Self {
            operating_hours: group.operating_hours(),
            consumption: group.daily_consumption(),
            potential_consumption: group.potential_consumption(),
            savings: group.daily_savings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::device::tests::device_group;

    fn groups() -> Result<Vec<DeviceGroup>> {
        Ok(vec![
            device_group("printer", "A", "08:00", "18:00", 2, 0.1)?,
            device_group("router", "B", "20:00", "06:00", 1, 0.5)?,
        ])
    }

    #[test]
    fn aggregate_two_groups() -> Result {
        let today = NaiveDate::from_ymd_opt(2025, 7, 17).unwrap();
        let savings = aggregate_on(&groups()?, today);
        assert_abs_diff_eq!(savings.daily.0, 9.8, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.projected_month_to_date.0, 9.8 * 17.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn first_of_month_projects_today_only() -> Result {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let savings = aggregate_on(&groups()?, today);
        assert_eq!(savings.projected_month_to_date, savings.daily);
        Ok(())
    }

    #[test]
    fn empty_collection_saves_nothing() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let savings = aggregate_on(&Vec::<DeviceGroup>::new(), today);
        assert_eq!(savings.daily, KilowattHours::ZERO);
        assert_eq!(savings.projected_month_to_date, KilowattHours::ZERO);
    }

    /// Reads the wall clock in the local time zone: the two calls may only differ if they
    /// straddle local midnight.
    #[test]
    fn aggregate_is_idempotent() -> Result {
        let groups = groups()?;
        let first = aggregate(&groups);
        let second = aggregate(&groups);
        if first != second {
            assert_eq!(first.daily, second.daily);
        }
        assert_abs_diff_eq!(
            first.projected_month_to_date.0,
            first.daily.0 * f64::from(Local::now().day()),
            epsilon = 1e-9,
        );
        Ok(())
    }

    #[test]
    fn device_savings_ok() -> Result {
        let savings = DeviceSavings::of(&groups()?[1]);
        assert_eq!(savings.operating_hours, Hours(10.0));
        assert_abs_diff_eq!(savings.consumption.0, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(savings.potential_consumption.0, 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(savings.savings.0, 7.0, epsilon = 1e-12);
        Ok(())
    }
}
