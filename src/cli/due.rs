use chrono::{Local, NaiveTime};
use clap::Parser;

use crate::{
    cli::connection::SourceArgs,
    core::{time_of_day::TimeOfDay, toggle::due_at},
    prelude::*,
    tables::build_due_table,
};

#[derive(Parser)]
pub struct DueArgs {
    #[clap(flatten)]
    source: SourceArgs,

    /// Time of day to check instead of now, as `HH:MM`.
    #[clap(long)]
    at: Option<TimeOfDay>,
}

impl DueArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let now = match self.at {
            Some(at) => NaiveTime::from_hms_opt(at.hour(), at.minute(), 0)
                .context("the time of day is out of range")?,
            None => Local::now().time(),
        };
        let devices = self.source.try_new_source()?.fetch_device_groups().await?;
        let n_powered_on =
            devices.iter().filter(|device| device.schedule.is_powered_on(now)).count();
        let due = due_at(&devices, now);
        info!(
            %now,
            n_devices = devices.len(),
            n_powered_on,
            n_power_off = due.power_off.len(),
            n_power_on = due.power_on.len(),
            "checked"
        );
        if due.is_empty() {
            info!("nothing to do this hour");
        } else {
            println!("{}", build_due_table(&due));
        }
        Ok(())
    }
}
