//! Typed catalog row

use serde::{de::Error as _, Deserialize, Deserializer};

/// One assessment from the catalog dataset
///
/// Field names follow the dataset's column headers. The record's identity is
/// its row position in the catalog, which is also its key in the vector index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssessmentRecord {
    #[serde(rename = "Individual Test Solutions")]
    pub name: String,

    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Remote Testing (y/n)", deserialize_with = "deserialize_flag")]
    pub remote_testing: bool,

    #[serde(rename = "Adaptive/IRT (y/n)", deserialize_with = "deserialize_flag")]
    pub adaptive_irt: bool,

    #[serde(rename = "Assessment Length", default)]
    pub duration: String,

    /// Raw space-separated test-type codes, e.g. `"A K P"`
    #[serde(rename = "Test Type", default)]
    pub test_type_codes: String,
}

impl AssessmentRecord {
    /// Expanded, human-readable test types
    pub fn test_types(&self) -> Vec<String> {
        crate::test_types::expand_codes(&self.test_type_codes)
    }
}

/// Parse a yes/no flag cell
///
/// Accepts y/yes/true/1 and n/no/false/0 in any case. An empty cell is `false`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Render a flag the way the catalog's users expect to read it
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| D::Error::custom(format!("invalid yes/no flag: {:?}", raw)))
}
