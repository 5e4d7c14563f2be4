//! YAML stylesheets: per-column styles keyed by header name.
//!
//! A stylesheet lets column styles live next to the data they describe
//! instead of in code:
//!
//! ```yaml
//! price:
//!   align: right
//!   thousand_separator: comma
//! name:
//!   font_weight: bold
//! ```
//!
//! Header lookup is exact and case-sensitive, the same rule as programmatic
//! column styles. Unknown style fields fail parsing loudly rather than being
//! skipped.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StylesheetError;

use super::types::Style;

/// Parsed stylesheet: header name to style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    columns: BTreeMap<String, Style>,
}

impl Stylesheet {
    /// Parses a stylesheet from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, StylesheetError> {
        let columns: BTreeMap<String, Style> = serde_yaml::from_str(content)?;
        Ok(Self { columns })
    }

    /// Loads a stylesheet from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StylesheetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StylesheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// The style for a header name, if the sheet defines one.
    pub fn get(&self, header: &str) -> Option<&Style> {
        self.columns.get(header)
    }

    /// Iterates header/style pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
