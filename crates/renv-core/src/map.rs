//! Inline rank-to-value tables, e.g. `--map '0:3,1:2'`.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{RenvError, RenvResult};

pub const DEFAULT_MAP_SEPARATOR: &str = ",";
pub const DEFAULT_KEYVAL_SEPARATOR: &str = ":";

const QUOTES: [char; 2] = ['"', '\''];

/// Delimiters used by [`TaskMap::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    /// Between entries.
    pub map: String,
    /// Between the key and value of one entry.
    pub keyval: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            map: DEFAULT_MAP_SEPARATOR.to_string(),
            keyval: DEFAULT_KEYVAL_SEPARATOR.to_string(),
        }
    }
}

impl Separators {
    pub fn new(map: impl Into<String>, keyval: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            keyval: keyval.into(),
        }
    }

    pub fn validate(&self) -> RenvResult<()> {
        if self.map.is_empty() {
            return Err(RenvError::EmptySeparator { which: "map" });
        }
        if self.keyval.is_empty() {
            return Err(RenvError::EmptySeparator { which: "key/value" });
        }
        Ok(())
    }
}

/// Rank index text → value.
///
/// Keys are compared as raw text: `" 1"` and `"1"` are different ranks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMap(BTreeMap<String, String>);

impl TaskMap {
    /// Parse `key<keyval>value<map>key<keyval>value...`.
    ///
    /// Only the first two `keyval`-delimited parts of an entry are used, any
    /// further parts are dropped. Values are trimmed, then lose at most one
    /// quote character on each end. A repeated key keeps its last value.
    pub fn parse(raw: &str, separators: &Separators) -> RenvResult<Self> {
        separators.validate()?;

        let mut map = BTreeMap::new();
        for entry in raw.split(separators.map.as_str()) {
            let mut parts = entry.split(separators.keyval.as_str());
            let key = parts.next().unwrap_or_default();
            let value = parts.next().ok_or_else(|| RenvError::MalformedMap {
                entry: entry.to_string(),
                separator: separators.keyval.clone(),
            })?;

            let value = unquote(value.trim());
            trace!(target: "renv.core", key, value, "map entry");
            map.insert(key.to_string(), value.to_string());
        }
        Ok(Self(map))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// Open and close quotes need not match.
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix(QUOTES).unwrap_or(value);
    value.strip_suffix(QUOTES).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> TaskMap {
        TaskMap::parse(raw, &Separators::default()).unwrap()
    }

    #[test]
    fn parses_simple_map() {
        let map = parse("0:3,1:2");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("0"), Some("3"));
        assert_eq!(map.get("1"), Some("2"));
        assert_eq!(map.get("2"), None);
    }

    #[test]
    fn values_are_trimmed_then_unquoted() {
        let map = parse("0: '3' ,1:\"A B\",2:'x\",3:  plain  ");
        assert_eq!(map.get("0"), Some("3"));
        assert_eq!(map.get("1"), Some("A B"));
        assert_eq!(map.get("2"), Some("x"));
        assert_eq!(map.get("3"), Some("plain"));
    }

    #[test]
    fn only_one_quote_layer_is_removed() {
        let map = parse("0:''3'',1:'");
        assert_eq!(map.get("0"), Some("'3'"));
        assert_eq!(map.get("1"), Some(""));
    }

    #[test]
    fn keys_are_kept_raw() {
        let map = parse("1: ABC, 2: DEF,'3':GHI");
        assert_eq!(map.get("1"), Some("ABC"));
        assert_eq!(map.get(" 2"), Some("DEF"));
        assert_eq!(map.get("2"), None);
        assert_eq!(map.get("'3'"), Some("GHI"));
    }

    #[test]
    fn extra_keyval_parts_are_dropped() {
        // "0:a:b" loses ":b"; URLs and times in values get truncated.
        let map = parse("0:a:b,1:http://host");
        assert_eq!(map.get("0"), Some("a"));
        assert_eq!(map.get("1"), Some("http"));
    }

    #[test]
    fn later_duplicate_wins() {
        let map = parse("0:first,1:x,0:second");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("0"), Some("second"));
    }

    #[test]
    fn entry_without_separator_is_malformed() {
        let err = TaskMap::parse("0:3,1", &Separators::default()).unwrap_err();
        assert_eq!(
            err,
            RenvError::MalformedMap {
                entry: "1".into(),
                separator: ":".into()
            }
        );
    }

    #[test]
    fn empty_and_trailing_entries_are_malformed() {
        let seps = Separators::default();
        assert!(matches!(
            TaskMap::parse("", &seps),
            Err(RenvError::MalformedMap { .. })
        ));
        assert!(matches!(
            TaskMap::parse("0:3,", &seps),
            Err(RenvError::MalformedMap { .. })
        ));
    }

    #[test]
    fn empty_value_is_allowed() {
        let map = parse("0:,1:  ");
        assert_eq!(map.get("0"), Some(""));
        assert_eq!(map.get("1"), Some(""));
    }

    #[test]
    fn custom_separators() {
        let seps = Separators::new(";", "=");
        let map = TaskMap::parse("0=A;1=B", &seps).unwrap();
        assert_eq!(map.get("1"), Some("B"));

        let seps = Separators::new(" | ", "=>");
        let map = TaskMap::parse("0=>gpu0 | 1=>gpu1", &seps).unwrap();
        assert_eq!(map.get("0"), Some("gpu0"));
        assert_eq!(map.get("1"), Some("gpu1"));
    }

    #[test]
    fn empty_separators_are_rejected() {
        assert_eq!(
            TaskMap::parse("0:1", &Separators::new("", ":")),
            Err(RenvError::EmptySeparator { which: "map" })
        );
        assert_eq!(
            TaskMap::parse("0:1", &Separators::new(",", "")),
            Err(RenvError::EmptySeparator { which: "key/value" })
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let raw = "3:d,1:b,0:a,2:c,1:B";
        let first = parse(raw);
        let second = parse(raw);
        assert_eq!(first, second);

        let keys: Vec<_> = first.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["0", "1", "2", "3"]);
    }
}
