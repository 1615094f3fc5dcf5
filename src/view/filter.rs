use crate::core::device::DeviceGroup;

/// Device list filter: a case-insensitive search over names and groups, and an exact group.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct DeviceFilter {
    search: Option<String>,
    group: Option<String>,
}

impl DeviceFilter {
    pub fn new(search: Option<&str>, group: Option<&str>) -> Self {
        Self {
            search: search.map(str::trim).filter(|text| !text.is_empty()).map(str::to_lowercase),
            group: group.map(str::to_owned),
        }
    }

    #[must_use]
    pub fn matches(&self, device: &DeviceGroup) -> bool {
        let matches_group = self.group.as_ref().is_none_or(|group| &device.group == group);
        let matches_search = self.search.as_ref().is_none_or(|search| {
            device.name.to_lowercase().contains(search)
                || device.group.to_lowercase().contains(search)
        });
        matches_group && matches_search
    }

    pub fn apply<'a>(&self, devices: &'a [DeviceGroup]) -> Vec<&'a DeviceGroup> {
        devices.iter().filter(|device| self.matches(device)).collect()
    }
}
