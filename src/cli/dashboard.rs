use clap::Parser;

use crate::{
    cli::connection::SourceArgs,
    core::savings::aggregate,
    prelude::*,
    tables::{build_devices_table, build_totals_table},
    view::filter::DeviceFilter,
};

#[derive(Parser)]
pub struct DashboardArgs {
    #[clap(flatten)]
    source: SourceArgs,

    /// Only show devices whose name or group contains the text (case-insensitive).
    #[clap(long)]
    search: Option<String>,

    /// Only show devices of the group.
    #[clap(long)]
    group: Option<String>,
}

impl DashboardArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let devices = self.source.try_new_source()?.fetch_device_groups().await?;
        let filter = DeviceFilter::new(self.search.as_deref(), self.group.as_deref());
        let shown = filter.apply(&devices);
        info!(n_devices = devices.len(), n_shown = shown.len(), "filtered");

        if shown.is_empty() {
            warn!("{}", empty_reason(devices.len()));
        } else {
            println!("{}", build_devices_table(shown.iter().copied()));
        }
        println!("{}", build_totals_table(&aggregate(shown)));
        Ok(())
    }
}

/// Why the device table came out empty.
const fn empty_reason(n_devices: usize) -> &'static str {
    if n_devices == 0 { "no devices registered yet" } else { "no devices match the filter" }
}
