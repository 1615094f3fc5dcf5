quantity!(Hours, via: f64, suffix: "h", precision: 1);

impl Hours {
    pub const FULL_DAY: Self = Self(24.0);

    pub fn from_minutes(minutes: u32) -> Self {
        Self(f64::from(minutes) / 60.0)
    }
}
