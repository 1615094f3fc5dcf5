use std::{collections::BTreeMap, fmt::Debug, fs, path::Path};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    core::device::DeviceGroup,
    prelude::*,
    quantity::{energy::KilowattHours, time::Hours},
};

/// Per-device log of recorded daily savings, kept in a TOML file.
#[must_use]
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsLedger {
    /// Entries are sorted by date, at most one per date.
    #[serde(default)]
    pub devices: BTreeMap<String, Vec<DailySaving>>,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySaving {
    pub date: NaiveDate,

    #[serde(rename = "hours_off")]
    pub hours_off: Hours,

    #[serde(rename = "energy_saved_kwh")]
    pub energy_saved: KilowattHours,
}

impl DailySaving {
    pub fn of(group: &DeviceGroup, date: NaiveDate) -> Self {
        Self { date, hours_off: group.schedule.off_hours(), energy_saved: group.daily_savings() }
    }
}

impl SavingsLedger {
    #[instrument(name = "reading the savings ledger…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse `{}`", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    #[instrument(skip(self), name = "writing the savings ledger…")]
    pub fn write_to<P: AsRef<Path> + Debug>(&self, path: P) -> Result {
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    /// Record the group's savings on the date, replacing an earlier record for the same date.
    pub fn record(&mut self, group: &DeviceGroup, date: NaiveDate) {
        let entry = DailySaving::of(group, date);
        let log = self.devices.entry(group.name.clone()).or_default();
        match log.binary_search_by_key(&date, |saving| saving.date) {
            Ok(index) => log[index] = entry,
            Err(index) => log.insert(index, entry),
        }
    }

    pub fn record_all<'a>(
        &mut self,
        groups: impl IntoIterator<Item = &'a DeviceGroup>,
        date: NaiveDate,
    ) -> usize {
        let mut n_recorded = 0;
        for group in groups {
            self.record(group, date);
            n_recorded += 1;
        }
        info!(n_recorded, %date, "recorded");
        n_recorded
    }

    /// Recorded savings of all devices within the month.
    pub fn month_total(&self, year: i32, month: u32) -> KilowattHours {
        self.devices
            .values()
            .flatten()
            .filter(|saving| saving.date.year() == year && saving.date.month() == month)
            .map(|saving| saving.energy_saved)
            .sum()
    }

    /// Number of distinct dates recorded within the month.
    #[must_use]
    pub fn n_days_recorded(&self, year: i32, month: u32) -> usize {
        let mut dates: Vec<NaiveDate> = self
            .devices
            .values()
            .flatten()
            .map(|saving| saving.date)
            .filter(|date| date.year() == year && date.month() == month)
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates.len()
    }
}
