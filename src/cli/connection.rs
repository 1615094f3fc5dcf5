use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

use crate::{
    api::{
        Api,
        source::{DeviceFile, DeviceSource},
    },
    prelude::*,
};

#[derive(Parser)]
pub struct ApiArgs {
    /// Device registry API base URL.
    #[clap(long = "api-base-url", env = "POWERDOWN_API_BASE_URL", default_value = "http://localhost:5000")]
    pub base_url: Url,

    /// Bearer token, as printed by `login`.
    #[clap(long = "access-token", env = "POWERDOWN_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

impl ApiArgs {
    pub fn try_new_client(&self) -> Result<Api> {
        Api::try_new(self.base_url.clone(), self.access_token.as_deref())
    }
}

#[derive(Parser)]
pub struct SourceArgs {
    #[clap(flatten)]
    pub api: ApiArgs,

    /// Read the devices from a saved `/devices` response instead of the API.
    #[clap(long = "devices-file", env = "POWERDOWN_DEVICES_FILE")]
    pub devices_file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn try_new_source(&self) -> Result<Box<dyn DeviceSource>> {
        match &self.devices_file {
            Some(path) => Ok(Box::new(DeviceFile(path.clone()))),
            None => Ok(Box::new(self.api.try_new_client()?)),
        }
    }
}
