use std::{
    collections::BTreeMap,
    ffi::{OsStr, OsString},
};

/// Owned copy of a process environment.
///
/// Values are kept as [`OsString`] so that variables which are not valid UTF-8
/// reach the replacement process byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment(BTreeMap<OsString, OsString>);

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Snapshot the environment of the current process.
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the value of `key`, if present.
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.0.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Check whether `key` is defined, even if its value is empty.
    pub fn contains(&self, key: impl AsRef<OsStr>) -> bool {
        self.0.contains_key(key.as_ref())
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn set<K, V>(&mut self, key: K, value: V) -> Option<OsString>
    where
        K: Into<OsString>,
        V: Into<OsString>,
    {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: impl AsRef<OsStr>) -> Option<OsString> {
        self.0.remove(key.as_ref())
    }

    /// Iterate over all variables, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.0.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Hand over the variables, e.g. to `Command::envs`.
    pub fn into_vars(self) -> impl Iterator<Item = (OsString, OsString)> {
        self.0.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
