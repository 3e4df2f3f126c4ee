//! Header bag used by outgoing requests and incoming responses.

/// HeaderBag is an ordered, case-normalized mapping from header name to one
/// or more string values.
///
/// Names are stored lower-cased and keep the order in which they were first
/// inserted. When a single value is required the first one wins.
///
/// ```
/// use trustedsign_core::HeaderBag;
///
/// let mut headers = HeaderBag::new();
/// headers.set("content-type", "application/json");
/// headers.append("X-Trace", "a");
/// headers.append("x-trace", "b");
///
/// assert_eq!(headers.get("Content-Type"), Some("application/json"));
/// assert_eq!(headers.get_all("X-TRACE"), ["a", "b"]);
/// assert_eq!(
///     headers.to_canonical_pairs(),
///     vec![
///         ("Content-Type".to_string(), "application/json".to_string()),
///         ("X-Trace".to_string(), "a".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBag {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderBag {
    /// Create an empty header bag.
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = Self::normalize(name);
        self.entries.iter().position(|(k, _)| *k == name)
    }

    /// Replace all values of `name` with `value`.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        match self.position(name.as_ref()) {
            Some(idx) => self.entries[idx].1 = vec![value.into()],
            None => self
                .entries
                .push((Self::normalize(name.as_ref()), vec![value.into()])),
        }
    }

    /// Add `value` after the existing values of `name`.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        match self.position(name.as_ref()) {
            Some(idx) => self.entries[idx].1.push(value.into()),
            None => self
                .entries
                .push((Self::normalize(name.as_ref()), vec![value.into()])),
        }
    }

    /// Append every value of `other` to this bag.
    pub fn extend(&mut self, other: HeaderBag) {
        for (name, values) in other.entries {
            for value in values {
                self.append(&name, value);
            }
        }
    }

    /// Get the first value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|idx| self.entries[idx].1.first())
            .map(String::as_str)
    }

    /// Get all values of `name`, empty if the header is absent.
    pub fn get_all(&self, name: &str) -> &[String] {
        match self.position(name) {
            Some(idx) => &self.entries[idx].1,
            None => &[],
        }
    }

    /// Check if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove `name` and return its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag holds no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(normalized name, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Flatten into `(Canonical-Name, first value)` pairs.
    pub fn to_canonical_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.first().map(|v| (canonical_name(k), v.clone())))
            .collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for HeaderBag {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bag = HeaderBag::new();
        for (k, v) in iter {
            bag.append(k, v);
        }
        bag
    }
}

/// Upper-case the first letter of every `-`-separated word: `app-key` => `App-Key`
pub fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
