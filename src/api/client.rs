use std::time::Duration;

use derive_more::{Display, Error};
use reqwest::{
    Client,
    ClientBuilder,
    Response,
    StatusCode,
    Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::{
    api::models::{Credentials, DeviceRecord, LoginResponse, NewUser, RecordId, StatusBody, User},
    prelude::*,
};

/// Non-success response from the device registry.
#[derive(Debug, Display, Error)]
#[display("{status}: {}", message.as_deref().unwrap_or("no details"))]
pub struct ApiError {
    #[error(not(source))]
    pub status: StatusCode,

    #[error(not(source))]
    pub message: Option<String>,
}

/// Client of the device registry REST API.
pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn try_new(base_url: Url, access_token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(access_token) = access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {access_token}"))
                .context("the access token is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static("authorization"), value);
        }
        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base_url })
    }

    #[instrument(skip_all, fields(username = username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .client
            .post(self.url(&["login"])?)
            .json(&Credentials { username, password })
            .send()
            .await
            .context("failed to send the login request")?;
        if response.status() == StatusCode::UNAUTHORIZED {
            bail!("invalid credentials for `{username}`");
        }
        let response: LoginResponse = Self::parse(response).await?;
        info!(
            user = %response.logged_in_user,
            is_admin = response.is_admin,
            message = ?response.message,
            "logged in"
        );
        Ok(response)
    }

    /// Self-registration. The backend may report a failure in a successful response.
    #[instrument(skip_all, fields(username = user.username))]
    pub async fn register(&self, user: &NewUser<'_>) -> Result<StatusBody> {
        let response = self.client.post(self.url(&["register"])?).json(user).send().await?;
        let body: StatusBody = Self::parse(response).await?;
        if body.is_error() {
            bail!("registration failed: {}", body.text().unwrap_or_default());
        }
        info!(message = ?body.text(), "registered");
        Ok(body)
    }

    #[instrument(skip_all)]
    pub async fn get_devices(&self) -> Result<Vec<DeviceRecord>> {
        let url = self.url(&["devices"])?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to request the devices from `{url}`"))?;
        let devices: Vec<DeviceRecord> = Self::parse(response)
            .await
            .with_context(|| format!("failed to fetch the devices from `{url}`"))?;
        info!(n_devices = devices.len(), "fetched");
        Ok(devices)
    }

    #[instrument(skip_all, fields(device_name = %device.device_name))]
    pub async fn create_device(&self, device: &DeviceRecord) -> Result<StatusBody> {
        device.validate()?;
        let response = self.client.post(self.url(&["device"])?).json(device).send().await?;
        let body = Self::parse(response).await?;
        info!("created");
        Ok(body)
    }

    #[instrument(skip_all, fields(id = %id, device_name = %device.device_name))]
    pub async fn update_device(&self, id: &RecordId, device: &DeviceRecord) -> Result<StatusBody> {
        device.validate()?;
        let response =
            self.client.put(self.url(&["device", &id.0])?).json(device).send().await?;
        let body = Self::parse(response).await?;
        info!("updated");
        Ok(body)
    }

    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete_device(&self, id: &RecordId) -> Result<StatusBody> {
        let response = self.client.delete(self.url(&["device", &id.0])?).send().await?;
        let body = Self::parse(response).await?;
        info!("deleted");
        Ok(body)
    }

    #[instrument(skip_all)]
    pub async fn get_users(&self) -> Result<Vec<User>> {
        let response = self.client.get(self.url(&["users"])?).send().await?;
        let users: Vec<User> = Self::parse(response).await?;
        info!(n_users = users.len(), "fetched");
        Ok(users)
    }

    #[instrument(skip_all, fields(username = user.username, is_admin = user.is_admin))]
    pub async fn create_user(&self, user: &NewUser<'_>) -> Result<StatusBody> {
        let response = self.client.post(self.url(&["users"])?).json(user).send().await?;
        let body = Self::parse(response).await?;
        info!("created");
        Ok(body)
    }

    #[instrument(skip_all, fields(username = username))]
    pub async fn delete_user(&self, username: &str) -> Result<StatusBody> {
        let response = self.client.delete(self.url(&["users", username])?).send().await?;
        let body = Self::parse(response).await?;
        info!("deleted");
        Ok(body)
    }

    /// Append the segments to the base URL, percent-encoding each of them.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("`{}` cannot be a base URL", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Deserialize a successful response, or turn the status body into an [`ApiError`].
    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StatusBody>(&body)
            .ok()
            .and_then(|body| body.text())
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_owned()));
        Err(ApiError { status, message }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> Result<Api> {
        Api::try_new(base_url.parse()?, Some("token"))
    }

    #[test]
    fn url_ok() -> Result {
        let api = api("http://localhost:5000")?;
        assert_eq!(api.url(&["devices"])?.as_str(), "http://localhost:5000/devices");
        assert_eq!(
            api.url(&["device", "6878f2a1c3b0d1e5f4a2b9c0"])?.as_str(),
            "http://localhost:5000/device/6878f2a1c3b0d1e5f4a2b9c0",
        );
        Ok(())
    }

    #[test]
    fn url_keeps_base_path() -> Result {
        let api = api("https://registry.example.com/api/")?;
        assert_eq!(api.url(&["users"])?.as_str(), "https://registry.example.com/api/users");
        Ok(())
    }

    #[test]
    fn url_encodes_usernames() -> Result {
        let api = api("http://localhost:5000")?;
        assert_eq!(
            api.url(&["users", "jane doe/ops"])?.as_str(),
            "http://localhost:5000/users/jane%20doe%2Fops",
        );
        Ok(())
    }

    #[test]
    fn rejects_invalid_token() -> Result {
        assert!(Api::try_new("http://localhost:5000".parse()?, Some("line\nbreak")).is_err());
        Ok(())
    }

    #[test]
    fn api_error_display() {
        let error = ApiError { status: StatusCode::NOT_FOUND, message: Some("Device not found".into()) };
        assert_eq!(error.to_string(), "404 Not Found: Device not found");
        let error = ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, message: None };
        assert_eq!(error.to_string(), "500 Internal Server Error: no details");
    }
}
