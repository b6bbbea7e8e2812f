//! Column catalog supplied by the host

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// One reportable field as described by the entity metadata service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub alias: String,
    /// Fully-qualified type id, e.g. `java.lang.String`
    #[serde(rename = "type")]
    pub type_id: String,
    /// Short type name used to pick applicable operators
    pub type_short: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColumnInfo {
    alias: String,
    #[serde(rename = "type")]
    type_id: String,
    #[serde(default)]
    type_short: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl<'de> Deserialize<'de> for ColumnInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawColumnInfo::deserialize(deserializer)?;
        let type_short = match raw.type_short {
            Some(short) if !short.is_empty() => short,
            _ => short_type_name(&raw.type_id).to_string(),
        };
        Ok(ColumnInfo {
            alias: raw.alias,
            type_id: raw.type_id,
            type_short,
            label: raw.label,
        })
    }
}

impl ColumnInfo {
    pub fn new(alias: impl Into<String>, type_id: impl Into<String>) -> Self {
        let type_id = type_id.into();
        let type_short = short_type_name(&type_id).to_string();
        Self {
            alias: alias.into(),
            type_id,
            type_short,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label for display, falling back to the alias
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.alias)
    }
}

/// Last `.`-separated segment of a type id (`java.lang.String` -> `String`)
pub fn short_type_name(type_id: &str) -> &str {
    type_id.rsplit('.').next().unwrap_or(type_id)
}

/// Read-only set of columns for one edit session, indexed by alias
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: Vec<ColumnInfo>,
    by_alias: AHashMap<String, usize>,
}

impl ColumnCatalog {
    /// Build a catalog; on duplicate aliases the first declaration wins
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        let mut by_alias = AHashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            by_alias.entry(column.alias.clone()).or_insert(idx);
        }
        Self { columns, by_alias }
    }

    /// Parse the host's metadata JSON (an array of column objects)
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let columns: Vec<ColumnInfo> = serde_json::from_str(json)?;
        Ok(Self::new(columns))
    }

    pub fn find(&self, alias: &str) -> Option<&ColumnInfo> {
        self.by_alias.get(alias).map(|&idx| &self.columns[idx])
    }

    /// Fully-qualified type of a field, or `""` when the field is unknown
    pub fn type_of(&self, alias: &str) -> &str {
        self.find(alias).map(|c| c.type_id.as_str()).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnInfo> for ColumnCatalog {
    fn from_iter<I: IntoIterator<Item = ColumnInfo>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
