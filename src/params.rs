/// Insertion-ordered key/value store backing the percent-encoded request
/// body.
///
/// The collector ignores parameter order, but the body is built in insertion
/// order so the client-wide fields (`v`, `tid`, `cid`, `t`) come first,
/// followed by hit fields in the order the builders add them and custom
/// parameters last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, overwriting in place when the key is already present.
    /// An overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Inserts `key` only when the optional value passes the presence test.
    pub fn insert_provided<V: ParamValue>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            if value.is_provided() {
                self.insert(key, value.to_param());
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upserts every entry of `other` onto `self`, in `other`'s order.
    pub fn overlay(&mut self, other: &Params) {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Presence test applied to every optional hit field.
///
/// Empty strings and zero numerics count as "not provided" and are omitted
/// from the wire body. Zero is therefore indistinguishable from absence for
/// optional numeric fields; a caller cannot send a literal `0` through one.
/// Required fields bypass this test and are always sent.
pub trait ParamValue {
    fn is_provided(&self) -> bool;
    fn to_param(&self) -> String;
}

impl ParamValue for &str {
    fn is_provided(&self) -> bool {
        !self.is_empty()
    }

    fn to_param(&self) -> String {
        (*self).to_owned()
    }
}

impl ParamValue for String {
    fn is_provided(&self) -> bool {
        !self.is_empty()
    }

    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for u32 {
    fn is_provided(&self) -> bool {
        *self != 0
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for u64 {
    fn is_provided(&self) -> bool {
        *self != 0
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for f64 {
    fn is_provided(&self) -> bool {
        *self != 0.0
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}
