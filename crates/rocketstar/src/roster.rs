//! The astronaut roster.
//!
//! The roster document is a JSON object whose keys are the names crew entries
//! refer to. Keys are matched according to a [`NameMatching`] policy and
//! repeated keys are handled according to a [`DuplicatePolicy`]; both are
//! explicit so neither behavior is inherited by accident.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::AstronautRecord;

/// How repeated roster keys are handled while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The record parsed last replaces earlier ones (logged as a warning).
    #[default]
    LastWins,
    /// A repeated key fails the load.
    Reject,
}

/// How crew names are compared against roster keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// Raw string equality.
    #[default]
    Exact,
    /// Compare after [`normalize_name`].
    Normalized,
}

impl NameMatching {
    /// The lookup key for `name` under this policy.
    #[must_use]
    pub fn key<'a>(self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Exact => Cow::Borrowed(name),
            Self::Normalized => Cow::Owned(normalize_name(name)),
        }
    }
}

impl fmt::Display for NameMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Normalized => write!(f, "normalized"),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastWins => write!(f, "last_wins"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Trim, fold internal whitespace runs to one space, and lowercase.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"));
    whitespace.replace_all(name.trim(), " ").to_lowercase()
}

/// Astronaut records keyed by the name crew entries use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Records under their original document keys.
    entries: BTreeMap<String, AstronautRecord>,
    /// Lookup key (per `matching`) to original key.
    index: BTreeMap<String, String>,
    matching: NameMatching,
}

impl Roster {
    /// Create an empty roster using the given matching policy.
    #[must_use]
    pub fn new(matching: NameMatching) -> Self {
        Self {
            entries: BTreeMap::new(),
            index: BTreeMap::new(),
            matching,
        }
    }

    /// Insert a record under `key`.
    ///
    /// Returns the record it replaced, if `key` collided with an existing key
    /// under the roster's matching policy. With normalized matching the
    /// replaced record may have been stored under a differently spelled key.
    pub fn insert(&mut self, key: String, record: AstronautRecord) -> Option<AstronautRecord> {
        let lookup = self.matching.key(&key).into_owned();
        let replaced = self
            .index
            .insert(lookup, key.clone())
            .and_then(|previous| self.entries.remove(&previous));
        self.entries.insert(key, record);
        replaced
    }

    /// Look up a record by crew name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AstronautRecord> {
        self.get_key_value(name).map(|(_, record)| record)
    }

    /// Look up a record by crew name, returning the key it is stored under.
    #[must_use]
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &AstronautRecord)> {
        let key = self.index.get(self.matching.key(name).as_ref())?;
        self.entries
            .get_key_value(key)
            .map(|(key, record)| (key.as_str(), record))
    }

    /// Whether a crew name resolves.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of astronauts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The matching policy in effect.
    #[must_use]
    pub fn matching(&self) -> NameMatching {
        self.matching
    }

    /// Iterate `(key, record)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AstronautRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries whose key differs from the record's own `id`.
    pub fn mismatched_ids(&self) -> impl Iterator<Item = (&str, &AstronautRecord)> {
        self.iter().filter(|(key, record)| *key != record.id)
    }

    /// Record ids claimed by more than one key, with the keys claiming them.
    #[must_use]
    pub fn shared_ids(&self) -> Vec<(&str, Vec<&str>)> {
        let mut by_id: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, record) in self.iter() {
            by_id.entry(record.id.as_str()).or_default().push(key);
        }
        by_id.into_iter().filter(|(_, keys)| keys.len() > 1).collect()
    }
}

impl Serialize for Roster {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(&self.entries)
    }
}

/// Roster document entries in document order, duplicates included.
///
/// Deserializing straight into a map would drop repeated keys silently;
/// this keeps them so the duplicate policy can see them.
#[derive(Debug, Default)]
pub(crate) struct RosterEntries(pub(crate) Vec<(String, AstronautRecord)>);

impl<'de> Deserialize<'de> for RosterEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RosterEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of astronaut records")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, AstronautRecord>()? {
                    entries.push(entry);
                }
                Ok(RosterEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
