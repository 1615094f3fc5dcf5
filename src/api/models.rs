use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, PickFirst, serde_as};

use crate::{
    core::{
        device::DeviceGroup,
        error::{InvalidDeviceError, InvalidFieldError},
        schedule::Schedule,
    },
    quantity::power::Kilowatts,
};

/// Document identifier as issued by the backend.
///
/// The backend serializes it either as a plain string or as `{"$oid": "…"}`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "RawRecordId")]
pub struct RecordId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Plain(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl From<RawRecordId> for RecordId {
    fn from(raw: RawRecordId) -> Self {
        match raw {
            RawRecordId::Plain(id) | RawRecordId::Extended { oid: id } => Self(id),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityType {
    Ssh,
    Snmp,
}

/// Device group record as exchanged with the backend.
///
/// Only the name, the group, the schedule, the count, and the consumption take part in the
/// savings calculation. The rest is carried along untouched.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    #[serde(rename = "_id", alias = "id", skip_serializing)]
    pub id: Option<RecordId>,

    #[builder(into)]
    pub device_name: String,

    #[builder(into)]
    pub group: String,

    #[builder(into)]
    pub power_on_time: String,

    #[builder(into)]
    pub power_off_time: String,

    #[serde(default = "DeviceRecord::default_count")]
    #[builder(default = 1)]
    pub count: i64,

    pub consumption_per_hour: f64,

    #[serde(rename = "deviceSlNo", skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Unknown or blank values, such as `""` from an untouched form, read as absent.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectivity_type: Option<ConnectivityType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// Some records carry the port as a string, possibly a blank one.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_community: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_community: Option<String>,
}

impl DeviceRecord {
    const fn default_count() -> i64 {
        1
    }

    /// Apply the same checks as [`DeviceGroup`] without keeping the result.
    pub fn validate(&self) -> Result<(), InvalidDeviceError> {
        DeviceGroup::try_from(self).map(drop)
    }
}

impl TryFrom<&DeviceRecord> for DeviceGroup {
    type Error = InvalidDeviceError;

    fn try_from(record: &DeviceRecord) -> Result<Self, Self::Error> {
        let convert = || -> Result<Self, InvalidFieldError> {
            if record.device_name.trim().is_empty() {
                return Err(InvalidFieldError::Missing("deviceName"));
            }
            if record.group.trim().is_empty() {
                return Err(InvalidFieldError::Missing("group"));
            }
            let schedule =
                Schedule::new(record.power_on_time.parse()?, record.power_off_time.parse()?);
            Ok(Self::builder()
                .name(&record.device_name)
                .group(&record.group)
                .schedule(schedule)
                .count(record.count)
                .consumption(Kilowatts(record.consumption_per_hour))
                .build()?)
        };
        convert()
            .map_err(|cause| InvalidDeviceError { device_name: record.device_name.clone(), cause })
    }
}

#[must_use]
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: RecordId,

    pub username: String,

    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

#[derive(Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password: &'a str,

    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[must_use]
#[derive(Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "access_token")]
    pub access_token: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(rename = "loggedinUser")]
    pub logged_in_user: String,

    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// Status body the backend sends with most responses.
///
/// `error` is usually a message, but some endpoints send `true` alongside a `message`.
#[derive(Default, Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl StatusBody {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The most descriptive text in the body.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match &self.error {
            Some(serde_json::Value::String(error)) => Some(error.clone()),
            _ => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::error::{InvalidConsumptionError, InvalidScheduleError},
        prelude::*,
        quantity::time::Hours,
    };

    #[test]
    fn devices_response_ok() -> Result {
        // language=json
        let body = r#"[
            {
                "_id": {"$oid": "6878f2a1c3b0d1e5f4a2b9c0"},
                "deviceName": "printer-01",
                "group": "office",
                "powerOnTime": "08:00",
                "powerOffTime": "18:00",
                "count": 2,
                "consumptionPerHour": 0.1
            },
            {
                "_id": "6878f2a1c3b0d1e5f4a2b9c1",
                "deviceName": "core-switch",
                "deviceSlNo": "SN-42",
                "deviceType": "switch",
                "hwType": "C9300",
                "site": "HQ",
                "group": "network",
                "owner": "netops",
                "connectivityType": "snmp",
                "ip": "10.0.0.2",
                "port": "161",
                "readCommunity": "public",
                "writeCommunity": "private",
                "powerOnTime": "20:00",
                "powerOffTime": "6:00",
                "consumptionPerHour": 0.5
            }
        ]"#;
        let records: Vec<DeviceRecord> = serde_json::from_str(body)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(RecordId("6878f2a1c3b0d1e5f4a2b9c0".to_owned())));
        assert_eq!(records[0].count, 2);
        assert_eq!(records[1].id, Some(RecordId("6878f2a1c3b0d1e5f4a2b9c1".to_owned())));
        assert_eq!(records[1].count, 1);
        assert_eq!(records[1].port, Some(161));
        assert_eq!(records[1].connectivity_type, Some(ConnectivityType::Snmp));
        assert_eq!(records[1].serial_number.as_deref(), Some("SN-42"));

        let group = DeviceGroup::try_from(&records[1])?;
        assert_eq!(group.operating_hours(), Hours(10.0));
        assert_eq!(group.count.get(), 1);
        Ok(())
    }

    #[test]
    fn numeric_port_ok() -> Result {
        // language=json
        let body = r#"{
            "deviceName": "server",
            "group": "rack",
            "connectivityType": "ssh",
            "port": 22,
            "powerOnTime": "00:00",
            "powerOffTime": "23:00",
            "count": 3,
            "consumptionPerHour": 0.35
        }"#;
        let record: DeviceRecord = serde_json::from_str(body)?;
        assert_eq!(record.port, Some(22));
        assert_eq!(record.id, None);
        Ok(())
    }

    #[test]
    fn blank_opaque_fields_read_as_absent() -> Result {
        // language=json
        let body = r#"[
            {"deviceName": "printer", "group": "office", "powerOnTime": "08:00", "powerOffTime": "18:00", "count": 2, "consumptionPerHour": 0.1},
            {"deviceName": "scanner", "group": "office", "connectivityType": "", "port": "", "powerOnTime": "09:00", "powerOffTime": "17:00", "consumptionPerHour": 0.05},
            {"deviceName": "modem", "group": "network", "connectivityType": "telnet", "port": 70000, "powerOnTime": "06:00", "powerOffTime": "23:00", "consumptionPerHour": 0.02}
        ]"#;
        let records: Vec<DeviceRecord> = serde_json::from_str(body)?;
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].connectivity_type, None);
        assert_eq!(records[1].port, None);
        assert_eq!(records[2].connectivity_type, None);
        assert_eq!(records[2].port, None);
        assert!(records.iter().all(|record| record.validate().is_ok()));
        Ok(())
    }

    #[test]
    fn serialize_skips_id_and_absent_fields() -> Result {
        let record = DeviceRecord {
            id: Some(RecordId("abc".to_owned())),
            ..DeviceRecord::builder()
                .device_name("printer")
                .group("office")
                .power_on_time("08:00")
                .power_off_time("18:00")
                .consumption_per_hour(0.1)
                .build()
        };
        let value = serde_json::to_value(&record)?;
        assert_eq!(
            value,
            serde_json::json!({
                "deviceName": "printer",
                "group": "office",
                "powerOnTime": "08:00",
                "powerOffTime": "18:00",
                "count": 1,
                "consumptionPerHour": 0.1,
            }),
        );
        Ok(())
    }

    fn record() -> DeviceRecord {
        DeviceRecord::builder()
            .device_name("printer")
            .group("office")
            .power_on_time("08:00")
            .power_off_time("18:00")
            .count(2)
            .consumption_per_hour(0.1)
            .build()
    }

    #[test]
    fn validate_ok() {
        assert!(record().validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_time() {
        let record = DeviceRecord { power_off_time: "25:00".to_owned(), ..record() };
        let error = record.validate().unwrap_err();
        assert_eq!(error.device_name, "printer");
        assert!(matches!(
            error.cause,
            InvalidFieldError::Schedule(InvalidScheduleError { ref text }) if text == "25:00",
        ));
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        let error = DeviceRecord { count: 0, ..record() }.validate().unwrap_err();
        assert!(matches!(error.cause, InvalidFieldError::Consumption(InvalidConsumptionError::Count(0))));

        let error = DeviceRecord { consumption_per_hour: -1.0, ..record() }.validate().unwrap_err();
        assert!(matches!(
            error.cause,
            InvalidFieldError::Consumption(InvalidConsumptionError::ConsumptionPerHour(_)),
        ));
    }

    #[test]
    fn validate_rejects_missing_name() {
        let error = DeviceRecord { device_name: " ".to_owned(), ..record() }.validate().unwrap_err();
        assert!(matches!(error.cause, InvalidFieldError::Missing("deviceName")));
    }

    #[test]
    fn users_response_ok() -> Result {
        // language=json
        let body = r#"[
            {"id": "6878f2a1c3b0d1e5f4a2b9d0", "username": "admin", "isAdmin": true},
            {"id": "6878f2a1c3b0d1e5f4a2b9d1", "username": "jane"}
        ]"#;
        let users: Vec<User> = serde_json::from_str(body)?;
        assert!(users[0].is_admin);
        assert!(!users[1].is_admin);
        assert_eq!(users[1].username, "jane");
        Ok(())
    }

    #[test]
    fn login_response_ok() -> Result {
        // language=json
        let body = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiJ9.e30.sig",
            "message": "Login Successfull",
            "loggedinUser": "admin",
            "isAdmin": true
        }"#;
        let response: LoginResponse = serde_json::from_str(body)?;
        assert_eq!(response.logged_in_user, "admin");
        assert!(response.is_admin);
        Ok(())
    }

    #[test]
    fn status_body_ok() -> Result {
        // language=json
        let body: StatusBody = serde_json::from_str(r#"{"error": "Device not found"}"#)?;
        assert!(body.is_error());
        assert_eq!(body.text().as_deref(), Some("Device not found"));

        // language=json
        let body: StatusBody = serde_json::from_str(
            r#"{"error": true, "message": "Exception when trying to insert user"}"#,
        )?;
        assert!(body.is_error());
        assert_eq!(body.text().as_deref(), Some("Exception when trying to insert user"));

        // language=json
        let body: StatusBody = serde_json::from_str(r#"{"message": "Device added successfully"}"#)?;
        assert!(!body.is_error());
        Ok(())
    }
}
