use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const LINKEDIN_URL: &str = "LinkedIn URL";
pub const UPDATED_TIMESTAMP: &str = "Updated Timestamp";
pub const ERROR: &str = "error";

const RAW_TEXT_LIMIT: usize = 500;

/// Fields the language model is asked to fill, in schema order.
pub const SCHEMA_FIELDS: [&str; 22] = [
    "Name",
    "Gender",
    "Profile Image",
    "Location",
    "Headline",
    "About",
    "Activity Posts",
    "Current Position",
    "Current Company",
    "Current Company Duration",
    "Education",
    "Education URLs",
    "Degrees",
    "Connection Count",
    "Languages",
    "Skills",
    "Websites",
    "Contact Phone",
    "Contact Email",
    "Contact Twitter",
    "Birthday",
    "Position Level",
];

/// Export column order.
pub const EXPORT_COLUMNS: [&str; 24] = [
    "Name",
    "Gender",
    "Profile Image",
    LINKEDIN_URL,
    "Location",
    "Headline",
    "About",
    "Activity Posts",
    "Current Position",
    "Current Company",
    "Current Company Duration",
    "Education",
    "Education URLs",
    "Degrees",
    "Connection Count",
    "Languages",
    "Skills",
    "Websites",
    "Contact Phone",
    "Contact Email",
    "Contact Twitter",
    "Birthday",
    "Position Level",
    UPDATED_TIMESTAMP,
];

/// One scraped profile as returned by the model, plus the metadata the
/// crawler stamps on it. Keys are kept as the model produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord(Map<String, Value>);

impl ProfileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker for a profile that could not be fetched or parsed at all.
    pub fn not_found(url: &str) -> Self {
        let mut record = Self::new();
        record.insert(ERROR, "Data not found for the profile");
        record.insert("url", url);
        record
    }

    /// Marker for a model reply that could not be turned into a record.
    pub fn parse_failure(message: impl Into<String>, raw_text: &str) -> Self {
        let mut record = Self::new();
        record.insert(ERROR, message.into());
        record.insert(
            "raw_text",
            raw_text.chars().take(RAW_TEXT_LIMIT).collect::<String>(),
        );
        record
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn error(&self) -> Option<&str> {
        self.0.get(ERROR).and_then(Value::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.0.contains_key(ERROR)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Text written to the export for `column`. Absent and null fields are
    /// empty, lists are joined with "; ".
    pub fn cell(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(value) => render_value(value),
        }
    }
}

impl From<Map<String, Value>> for ProfileRecord {
    fn from(value: Map<String, Value>) -> Self {
        ProfileRecord(value)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(render_value)
            .join("; "),
        other => other.to_string(),
    }
}
