use std::path::PathBuf;

use async_trait::async_trait;

use crate::{
    api::{Api, models::DeviceRecord},
    core::device::DeviceGroup,
    prelude::*,
};

#[async_trait]
pub trait DeviceSource: Sync {
    async fn fetch_devices(&self) -> Result<Vec<DeviceRecord>>;

    /// Fetch the devices and keep those that pass validation.
    #[instrument(skip_all)]
    async fn fetch_device_groups(&self) -> Result<Vec<DeviceGroup>> {
        Ok(into_device_groups(&self.fetch_devices().await?))
    }
}

#[async_trait]
impl DeviceSource for Api {
    async fn fetch_devices(&self) -> Result<Vec<DeviceRecord>> {
        self.get_devices().await
    }
}

/// Saved `/devices` response.
pub struct DeviceFile(pub PathBuf);

#[async_trait]
impl DeviceSource for DeviceFile {
    #[instrument(skip_all, fields(path = %self.0.display()))]
    async fn fetch_devices(&self) -> Result<Vec<DeviceRecord>> {
        let contents = tokio::fs::read(&self.0)
            .await
            .with_context(|| format!("failed to read `{}`", self.0.display()))?;
        let devices: Vec<DeviceRecord> = serde_json::from_slice(&contents)
            .with_context(|| format!("failed to parse `{}`", self.0.display()))?;
        info!(n_devices = devices.len(), "loaded");
        Ok(devices)
    }
}

/// Validate the records, skipping and reporting those out of contract.
pub fn into_device_groups(records: &[DeviceRecord]) -> Vec<DeviceGroup> {
    records
        .iter()
        .filter_map(|record| match DeviceGroup::try_from(record) {
            Ok(group) => Some(group),
            Err(error) => {
                warn!(id = ?record.id, "skipping: {:#}", Error::from(error));
                None
            }
        })
        .collect()
}
