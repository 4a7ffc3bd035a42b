use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Reading – one timestamped particulate-matter sample
// ---------------------------------------------------------------------------

/// A single sensor reading (one record of the source document).
///
/// The measurement fields keep their source names: different sensors emit
/// different spellings for the same channel (`pm2_5` vs `PM2.5`), and the
/// series layer resolves them through ordered alias lists.  Only numeric
/// fields are retained; a key that is present with value `0.0` is still
/// present.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// ISO-8601 timestamp with offset, kept as text.  Ordering is assumed
    /// ascending but never verified.
    pub timestamp: String,
    /// Measurement fields under their source names.
    pub fields: BTreeMap<String, f64>,
}

impl Reading {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Reading {
            timestamp: timestamp.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Insert one measurement field, builder-style.
    pub fn with_field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}
