use clap::{Parser, Subcommand};

use crate::{
    api::{
        models::{ConnectivityType, DeviceRecord, RecordId},
        source::DeviceSource,
    },
    cli::connection::{ApiArgs, SourceArgs},
    prelude::*,
    tables::build_records_table,
};

#[derive(Parser)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: DevicesCommand,
}

impl DevicesArgs {
    pub async fn run(self) -> Result {
        match self.command {
            DevicesCommand::List(args) => args.run().await,
            DevicesCommand::Add(args) => args.run().await,
            DevicesCommand::Update(args) => args.run().await,
            DevicesCommand::Remove(args) => args.run().await,
        }
    }
}

#[derive(Subcommand)]
pub enum DevicesCommand {
    /// List the registered devices with their identifiers, invalid ones included.
    List(ListArgs),

    /// Register a device group.
    Add(AddArgs),

    /// Replace the fields of a registered device group.
    Update(UpdateArgs),

    /// Remove a registered device group.
    Remove(RemoveArgs),
}

/// Fields of a device group record.
#[derive(Parser)]
pub struct DeviceFields {
    #[clap(long = "name")]
    name: String,

    #[clap(long)]
    group: String,

    /// Power-on time, `HH:MM`.
    #[clap(long = "power-on")]
    power_on: String,

    /// Power-off time, `HH:MM`. Earlier than the power-on time means the next day.
    #[clap(long = "power-off")]
    power_off: String,

    /// Number of identical devices.
    #[clap(long, default_value = "1")]
    count: i64,

    /// Draw of a single device while powered on, kWh per hour.
    #[clap(long = "consumption-per-hour")]
    consumption_per_hour: f64,

    #[clap(long = "serial-number")]
    serial_number: Option<String>,

    #[clap(long = "device-type")]
    device_type: Option<String>,

    #[clap(long = "hw-type")]
    hw_type: Option<String>,

    #[clap(long)]
    site: Option<String>,

    #[clap(long)]
    owner: Option<String>,

    #[clap(long = "connectivity-type", value_enum)]
    connectivity_type: Option<ConnectivityType>,

    #[clap(long)]
    ip: Option<String>,

    #[clap(long)]
    port: Option<u16>,

    #[clap(long = "login-user")]
    login_user: Option<String>,

    #[clap(long = "device-password", env = "POWERDOWN_DEVICE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[clap(long = "read-community")]
    read_community: Option<String>,

    #[clap(long = "write-community")]
    write_community: Option<String>,
}

impl From<DeviceFields> for DeviceRecord {
    fn from(fields: DeviceFields) -> Self {
        Self {
            id: None,
            device_name: fields.name,
            group: fields.group,
            power_on_time: fields.power_on,
            power_off_time: fields.power_off,
            count: fields.count,
            consumption_per_hour: fields.consumption_per_hour,
            serial_number: fields.serial_number,
            device_type: fields.device_type,
            hw_type: fields.hw_type,
            site: fields.site,
            owner: fields.owner,
            connectivity_type: fields.connectivity_type,
            ip: fields.ip,
            port: fields.port,
            login_user: fields.login_user,
            password: fields.password,
            read_community: fields.read_community,
            write_community: fields.write_community,
        }
    }
}

#[derive(Parser)]
pub struct ListArgs {
    #[clap(flatten)]
    source: SourceArgs,
}

impl ListArgs {
    #[instrument(skip_all)]
    async fn run(self) -> Result {
        let records = self.source.try_new_source()?.fetch_devices().await?;
        if records.is_empty() {
            warn!("no devices registered yet");
        } else {
            println!("{}", build_records_table(&records));
        }
        Ok(())
    }
}

#[derive(Parser)]
pub struct AddArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[clap(flatten)]
    fields: DeviceFields,
}

impl AddArgs {
    #[instrument(skip_all)]
    async fn run(self) -> Result {
        let record = DeviceRecord::from(self.fields);
        let body = self.api.try_new_client()?.create_device(&record).await?;
        info!(message = ?body.text(), "done");
        Ok(())
    }
}

#[derive(Parser)]
pub struct UpdateArgs {
    #[clap(flatten)]
    api: ApiArgs,

    /// Record identifier, as shown by `devices list`.
    #[clap(long)]
    id: String,

    #[clap(flatten)]
    fields: DeviceFields,
}

impl UpdateArgs {
    #[instrument(skip_all, fields(id = %self.id))]
    async fn run(self) -> Result {
        let record = DeviceRecord::from(self.fields);
        let body =
            self.api.try_new_client()?.update_device(&RecordId(self.id), &record).await?;
        info!(message = ?body.text(), "done");
        Ok(())
    }
}

#[derive(Parser)]
pub struct RemoveArgs {
    #[clap(flatten)]
    api: ApiArgs,

    /// Record identifier, as shown by `devices list`.
    #[clap(long)]
    id: String,
}

impl RemoveArgs {
    #[instrument(skip_all, fields(id = %self.id))]
    async fn run(self) -> Result {
        let body = self.api.try_new_client()?.delete_device(&RecordId(self.id)).await?;
        info!(message = ?body.text(), "done");
        Ok(())
    }
}
