use std::collections::BTreeMap;

use serde::Deserialize;

use crate::value::DataValue;

/// Label → value pairs supplied by the caller.
///
/// Keys that name no block are ignored when the page is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DataMap {
    entries: BTreeMap<String, DataValue>,
}

impl DataMap {
    pub fn new() -> Self {
        DataMap::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<DataValue>) -> Option<DataValue> {
        self.entries.insert(label.into(), value.into())
    }

    pub fn get(&self, label: &str) -> Option<&DataValue> {
        self.entries.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: DataMap) {
        self.entries.extend(other.entries);
    }
}

impl<K: Into<String>, V: Into<DataValue>> FromIterator<(K, V)> for DataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        DataMap {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_toml_table() {
        let data: DataMap = toml::from_str(
            r#"
title = "Welcome"
count = 3
ratio = 0.25
draft = false
"#,
        )
        .unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.get("title"), Some(&DataValue::Text("Welcome".into())));
        assert_eq!(data.get("count"), Some(&DataValue::Integer(3)));
        assert_eq!(data.get("ratio"), Some(&DataValue::Float(0.25)));
        assert_eq!(data.get("draft"), Some(&DataValue::Boolean(false)));
    }

    #[test]
    fn later_entries_win() {
        let mut data: DataMap = [("a", "1"), ("b", "2")].into_iter().collect();
        data.extend([("b", "3")].into_iter().collect());
        assert_eq!(data.get("b"), Some(&DataValue::Text("3".into())));
        assert_eq!(data.insert("a", 9_i64), Some(DataValue::Text("1".into())));
    }
}
