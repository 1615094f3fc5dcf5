use derive_more::{Display, Error};

/// A power-on or power-off time is not a 24-hour `HH:MM` time of day.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display("`{text}` is not a valid `HH:MM` time of day")]
pub struct InvalidScheduleError {
    #[error(not(source))]
    pub text: String,
}

#[derive(Copy, Clone, Debug, Display, Error, PartialEq)]
pub enum InvalidConsumptionError {
    #[display("device count must be at least 1, got {_0}")]
    Count(#[error(not(source))] i64),

    #[display("consumption per hour must be a positive number, got {_0}")]
    ConsumptionPerHour(#[error(not(source))] f64),
}

#[derive(Debug, Display, Error)]
#[display("device `{device_name}` is out of contract")]
pub struct InvalidDeviceError {
    #[error(not(source))]
    pub device_name: String,

    #[error(source)]
    pub cause: InvalidFieldError,
}

#[derive(Debug, Display, Error, derive_more::From)]
pub enum InvalidFieldError {
    #[display("`{_0}` is required")]
    #[from(ignore)]
    Missing(#[error(not(source))] &'static str),

    Schedule(InvalidScheduleError),
    Consumption(InvalidConsumptionError),
}
