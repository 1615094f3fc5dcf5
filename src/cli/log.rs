use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;

use crate::{
    cli::connection::SourceArgs,
    core::savings::aggregate_on,
    ledger::SavingsLedger,
    prelude::*,
    tables::{build_ledger_table, build_totals_table},
};

#[derive(Parser)]
pub struct LogArgs {
    #[clap(flatten)]
    source: SourceArgs,

    /// Savings ledger file.
    #[clap(long = "ledger", env = "POWERDOWN_LEDGER", default_value = "savings.toml")]
    ledger_path: PathBuf,

    /// Date to record, defaults to today.
    #[clap(long)]
    date: Option<NaiveDate>,
}

impl LogArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let devices = self.source.try_new_source()?.fetch_device_groups().await?;

        let mut ledger = SavingsLedger::read_from(&self.ledger_path)?;
        ledger.record_all(&devices, date);
        ledger.write_to(&self.ledger_path)?;

        let (year, month) = (date.year(), date.month());
        let recorded = ledger.month_total(year, month);
        let projected = aggregate_on(&devices, date);
        info!(
            %date,
            n_days_recorded = ledger.n_days_recorded(year, month),
            ?recorded,
            projected = ?projected.projected_month_to_date,
            "month to date"
        );
        println!("{}", build_ledger_table(&ledger, year, month));
        println!("{}", build_totals_table(&projected));
        Ok(())
    }
}
