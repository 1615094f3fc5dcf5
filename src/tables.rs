use chrono::Datelike;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    api::models::{DeviceRecord, User},
    core::{
        device::DeviceGroup,
        savings::{DeviceSavings, EnergySavings},
        series::SeriesPoint,
        toggle::DueDevices,
    },
    ledger::SavingsLedger,
    quantity::{energy::KilowattHours, power::Kilowatts, time::Hours},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn operating_color(hours: Hours) -> Color {
    if hours >= Hours(20.0) {
        Color::Red
    } else if hours >= Hours(12.0) {
        Color::DarkYellow
    } else {
        Color::Green
    }
}

pub fn build_devices_table<'a>(devices: impl IntoIterator<Item = &'a DeviceGroup>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Device",
        "Group",
        "On",
        "Off",
        "Count",
        "Draw",
        "Operating",
        "Around the clock",
        "Consumption",
        "Savings",
    ]);
    for device in devices {
        let savings = DeviceSavings::of(device);
        table.add_row(vec![
            Cell::new(&device.name).add_attribute(Attribute::Bold),
            Cell::new(&device.group),
            Cell::new(device.schedule.power_on),
            Cell::new(device.schedule.power_off).add_attribute(Attribute::Dim),
            Cell::new(device.count).set_alignment(CellAlignment::Right),
            Cell::new(device.consumption).set_alignment(CellAlignment::Right),
            Cell::new(savings.operating_hours)
                .set_alignment(CellAlignment::Right)
                .fg(operating_color(savings.operating_hours)),
            Cell::new(savings.potential_consumption)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(savings.consumption).set_alignment(CellAlignment::Right),
            Cell::new(savings.savings).set_alignment(CellAlignment::Right).fg(Color::Green),
        ]);
    }
    table
}

/// Registered records as they are, invalid ones included, with their identifiers.
pub fn build_records_table(records: &[DeviceRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "ID", "Device", "Group", "On", "Off", "Count", "Draw", "Savings", "Problem",
    ]);
    for record in records {
        let id = record.id.as_ref().map_or_else(|| "-".to_owned(), ToString::to_string);
        let (savings, problem) = match DeviceGroup::try_from(record) {
            Ok(group) => (Cell::new(group.daily_savings()).fg(Color::Green), Cell::new("")),
            Err(error) => (Cell::new("-"), Cell::new(error.cause).fg(Color::Red)),
        };
        table.add_row(vec![
            Cell::new(id).add_attribute(Attribute::Dim),
            Cell::new(&record.device_name).add_attribute(Attribute::Bold),
            Cell::new(&record.group),
            Cell::new(&record.power_on_time),
            Cell::new(&record.power_off_time),
            Cell::new(record.count).set_alignment(CellAlignment::Right),
            Cell::new(Kilowatts(record.consumption_per_hour)).set_alignment(CellAlignment::Right),
            savings.set_alignment(CellAlignment::Right),
            problem,
        ]);
    }
    table
}

pub fn build_totals_table(savings: &EnergySavings) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Saved today", "Saved this month (projected)"]);
    table.add_row(vec![
        Cell::new(savings.daily).fg(Color::Green).add_attribute(Attribute::Bold),
        Cell::new(savings.projected_month_to_date).fg(Color::Green).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_series_table(series: &[SeriesPoint<'_>]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Device", "Group", "Operating", "Daily", "Monthly (projected)"]);
    for point in series {
        table.add_row(vec![
            Cell::new(point.device_name).add_attribute(Attribute::Bold),
            Cell::new(point.group),
            Cell::new(point.operating_hours)
                .set_alignment(CellAlignment::Right)
                .fg(operating_color(point.operating_hours)),
            Cell::new(point.daily_consumption).set_alignment(CellAlignment::Right),
            Cell::new(point.monthly_consumption).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_due_table(due: &DueDevices<'_>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Action", "Device", "Group", "At", "Count"]);
    let rows = due
        .power_off
        .iter()
        .map(|device| ("power off", Color::Red, device, device.schedule.power_off))
        .chain(
            due.power_on
                .iter()
                .map(|device| ("power on", Color::Green, device, device.schedule.power_on)),
        );
    for (action, color, device, at) in rows {
        table.add_row(vec![
            Cell::new(action).fg(color),
            Cell::new(&device.name).add_attribute(Attribute::Bold),
            Cell::new(&device.group),
            Cell::new(at),
            Cell::new(device.count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_ledger_table(ledger: &SavingsLedger, year: i32, month: u32) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Device", "Days", "Hours off (last)", "Recorded savings"]);
    for (device_name, log) in &ledger.devices {
        let in_month = log
            .iter()
            .filter(|saving| saving.date.year() == year && saving.date.month() == month)
            .collect_vec();
        let Some(last) = in_month.last() else { continue };
        let total: KilowattHours = in_month.iter().map(|saving| saving.energy_saved).sum();
        table.add_row(vec![
            Cell::new(device_name).add_attribute(Attribute::Bold),
            Cell::new(in_month.len()).set_alignment(CellAlignment::Right),
            Cell::new(last.hours_off).set_alignment(CellAlignment::Right),
            Cell::new(total).set_alignment(CellAlignment::Right).fg(Color::Green),
        ]);
    }
    table
}

pub fn build_users_table(users: &[User]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Username", "Admin"]);
    for user in users {
        table.add_row(vec![
            Cell::new(&user.id).add_attribute(Attribute::Dim),
            Cell::new(&user.username).add_attribute(Attribute::Bold),
            Cell::new(if user.is_admin { "yes" } else { "no" })
                .fg(if user.is_admin { Color::Magenta } else { Color::Reset }),
        ]);
    }
    table
}
