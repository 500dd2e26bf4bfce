/// Settings for a [`TouchNormalizer`](crate::TouchNormalizer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchConfig {
    /// Suppress the platform default for category handlers. The document-level
    /// move suppressor ignores this setting.
    pub prevent_default: bool,
    /// Keep a clone of the last raw event seen by a category handler.
    pub record_last_event: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            prevent_default: true,
            record_last_event: true,
        }
    }
}

impl TouchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    pub fn with_record_last_event(mut self, record: bool) -> Self {
        self.record_last_event = record;
        self
    }
}
