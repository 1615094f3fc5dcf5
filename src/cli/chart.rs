use clap::Parser;

use crate::{
    cli::connection::SourceArgs,
    core::series::per_device_series,
    prelude::*,
    tables::build_series_table,
    view::selection::ChartSelection,
};

#[derive(Parser)]
pub struct ChartArgs {
    #[clap(flatten)]
    source: SourceArgs,

    /// Device to chart, in order. Naming a device again deselects it.
    #[clap(long = "device", required = true, num_args = 1..)]
    devices: Vec<String>,
}

impl ChartArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let selection: ChartSelection = self.devices.iter().collect();
        ensure!(!selection.is_empty(), "every device was deselected");

        let devices = self.source.try_new_source()?.fetch_device_groups().await?;
        for device_name in selection.iter() {
            if !devices.iter().any(|device| device.name == device_name) {
                warn!(device_name, "not found");
            }
        }

        let series = per_device_series(&devices, selection.iter());
        println!("{}", build_series_table(&series));
        Ok(())
    }
}
