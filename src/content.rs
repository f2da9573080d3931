//! Content maps: section label to replacement text.
//!
//! Order matters. When a heading could match several labels the first one
//! wins, so a `ContentMap` keeps entries in insertion order and loads them
//! from JSON or TOML in the order they appear in the file.

use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::path::Path;

/// An ordered mapping from section label to replacement body text.
///
/// # Example
///
/// ```
/// use docsplice::ContentMap;
///
/// let map = ContentMap::from_json_str(r#"{"INTRODUCTION": "New intro", "SCOPE": "New scope"}"#)?;
/// assert_eq!(map.find_match("SCOPE"), Some(("SCOPE", "New scope")));
/// # Ok::<(), docsplice::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap {
    entries: Vec<(String, String)>,
}

impl ContentMap {
    /// Create an empty content map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Re-inserting a label replaces its text in place.
    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) {
        let label = label.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some((_, existing)) => *existing = text,
            None => self.entries.push((label, text)),
        }
    }

    /// Replacement text for an exact label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(label, text)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, text)| (key.as_str(), text.as_str()))
    }

    /// First entry whose key contains `label` or is contained in it.
    pub fn find_match(&self, label: &str) -> Option<(&str, &str)> {
        self.iter()
            .find(|(key, _)| label.contains(key) || key.contains(label))
    }

    /// Parse a JSON object of label/text pairs.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a TOML table of label/text pairs.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a content map file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let map = match ext.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(path = %path.display(), entries = map.len(), "loaded content map");
        Ok(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ContentMap::new();
        for (label, text) in iter {
            map.insert(label, text);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ContentMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for ContentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, text) in &self.entries {
            map.serialize_entry(label, text)?;
        }
        map.end()
    }
}

struct ContentMapVisitor;

impl<'de> Visitor<'de> for ContentMapVisitor {
    type Value = ContentMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of section labels to replacement text")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<ContentMap, A::Error> {
        let mut map = ContentMap::new();
        while let Some((label, text)) = access.next_entry::<String, String>()? {
            map.insert(label, text);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ContentMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ContentMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_insert_keeps_position() {
        let mut map = ContentMap::new();
        map.insert("INTRODUCTION", "a");
        map.insert("SCOPE", "b");
        map.insert("INTRODUCTION", "c");

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("INTRODUCTION", "c"), ("SCOPE", "b")]);
        assert_eq!(map.get("SCOPE"), Some("b"));
        assert_eq!(map.get("scope"), None);
    }

    #[test]
    fn test_find_match_both_directions() {
        let map: ContentMap = [("OBJECTIVES", "x"), ("PROPOSED SYSTEM", "y")]
            .into_iter()
            .collect();

        // Key inside the label
        assert_eq!(map.find_match("PROJECT OBJECTIVES").map(|m| m.0), Some("OBJECTIVES"));
        // Label inside the key
        assert_eq!(map.find_match("PROPOSED").map(|m| m.0), Some("PROPOSED SYSTEM"));
        assert_eq!(map.find_match("CONCLUSION"), None);
        // The empty label is contained in every key
        assert_eq!(map.find_match("").map(|m| m.0), Some("OBJECTIVES"));
    }

    #[test]
    fn test_first_key_wins() {
        let forward: ContentMap = [("SCOPE", "1"), ("OUT OF SCOPE", "2")].into_iter().collect();
        let reverse: ContentMap = [("OUT OF SCOPE", "2"), ("SCOPE", "1")].into_iter().collect();
        assert_eq!(forward.find_match("SCOPE"), Some(("SCOPE", "1")));
        assert_eq!(reverse.find_match("SCOPE"), Some(("OUT OF SCOPE", "2")));
    }

    #[test]
    fn test_json_keeps_file_order() {
        let map = ContentMap::from_json_str(r#"{"ZETA": "z", "ALPHA": "a", "MID": "m"}"#).unwrap();
        let labels: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["ZETA", "ALPHA", "MID"]);
    }

    #[test]
    fn test_toml_keeps_file_order() {
        let map = ContentMap::from_toml_str(
            "SCOPE = \"new scope\"\nINTRODUCTION = \"\"\"\nline one\nline two\"\"\"\n",
        )
        .unwrap();
        let labels: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["SCOPE", "INTRODUCTION"]);
        assert_eq!(map.get("INTRODUCTION"), Some("line one\nline two"));
    }

    #[test]
    fn test_rejects_non_string_values() {
        let err = ContentMap::from_json_str(r#"{"SCOPE": 3}"#).unwrap_err();
        assert!(matches!(err, Error::ContentMap(_)));
        assert!(ContentMap::from_json_str("[]").is_err());
    }

    #[test]
    fn test_serialize_roundtrip_order() {
        let map: ContentMap = [("B", "2"), ("A", "1")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("content.json");
        std::fs::write(&json_path, r#"{"SCOPE": "s"}"#).unwrap();
        assert_eq!(ContentMap::load(&json_path).unwrap().len(), 1);

        let toml_path = dir.path().join("content.TOML");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "SCOPE = \"s\"").unwrap();
        assert_eq!(ContentMap::load(&toml_path).unwrap().get("SCOPE"), Some("s"));

        let yaml_path = dir.path().join("content.yaml");
        std::fs::write(&yaml_path, "SCOPE: s").unwrap();
        assert!(matches!(
            ContentMap::load(&yaml_path),
            Err(Error::UnsupportedFormat(_))
        ));

        assert!(matches!(
            ContentMap::load(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
