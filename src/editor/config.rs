use crate::error::TableEditorError;
use serde::Deserialize;

/// Options controlling how edits are applied.
///
/// Every field has a default, so a partial JSON object is a valid configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Strip leading and trailing whitespace from text values before comparing and storing
    pub trim: bool,
    /// Prefix for the names of inserted columns
    pub column_prefix: String,
    /// Store empty text written into a non-text column as a missing value
    pub empty_as_missing: bool,
    /// Emit a tracing event for every warning
    pub log_warnings: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            trim: true,
            column_prefix: "V".to_owned(),
            empty_as_missing: true,
            log_warnings: true,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, TableEditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json() {
        let config = EditorConfig::from_json(r#"{"trim": false, "column_prefix": "col"}"#).unwrap();
        assert!(!config.trim);
        assert_eq!(config.column_prefix, "col");
        assert!(config.empty_as_missing);
        assert!(config.log_warnings);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(EditorConfig::from_json(r#""x""#).is_err());
        assert!(EditorConfig::from_json(r#"{"trim": "yes"}"#).is_err());
        assert!(EditorConfig::from_json("{").is_err());
    }
}
