/// Devices picked for charting, in the order they were picked.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChartSelection(Vec<String>);

impl ChartSelection {
    /// Add the device if it is not selected yet, otherwise remove it.
    ///
    /// Returns whether the device is selected afterwards.
    pub fn toggle(&mut self, device_name: &str) -> bool {
        if let Some(index) = self.0.iter().position(|selected| selected == device_name) {
            self.0.remove(index);
            false
        } else {
            self.0.push(device_name.to_owned());
            true
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ChartSelection {
    /// Replay the toggles: a name given twice ends up deselected.
    fn from_iter<T: IntoIterator<Item = S>>(toggles: T) -> Self {
        let mut selection = Self::default();
        for device_name in toggles {
            selection.toggle(device_name.as_ref());
        }
        selection
    }
}
