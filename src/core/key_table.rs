//! The unified cross-locale key table.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer};

/// Join key across locales: `namespace.name`, or `name` for flat resources.
pub fn qualified_key_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}.{}", ns, name),
        None => name.to_string(),
    }
}

/// A key defined more than once within a single locale. The first
/// occurrence is kept; this records the one that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    pub locale: String,
    /// Resource file holding the dropped occurrence.
    pub path: PathBuf,
}

/// Every qualified key mapped to one value per locale.
///
/// Rows are ordered by key (byte-wise ascending). Each row holds exactly
/// one slot per entry of [`KeyTable::locales`], in the same order; `None`
/// means the locale has no value for that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    locales: Vec<String>,
    rows: BTreeMap<String, Vec<Option<String>>>,
    duplicates: Vec<DuplicateKey>,
}

impl KeyTable {
    /// Column order: source locale first, then targets.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<KeyRow<'_>> {
        self.rows
            .get_key_value(key)
            .map(|(key, values)| self.row(key, values))
    }

    /// `None` if the key or locale is unknown, `Some(None)` if the locale
    /// has no value for the key.
    pub fn value(&self, key: &str, locale: &str) -> Option<Option<&str>> {
        self.get(key).and_then(|row| row.value(locale))
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyRow<'_>> {
        self.rows.iter().map(|(key, values)| self.row(key, values))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }

    /// Number of keys with no value in `locale`.
    pub fn missing_count(&self, locale: &str) -> usize {
        let Some(index) = self.locale_index(locale) else {
            return 0;
        };
        self.rows.values().filter(|v| v[index].is_none()).count()
    }

    /// Rows where at least one locale has no value. Row and column order
    /// are unchanged.
    pub fn with_empty_values(&self) -> KeyTable {
        KeyTable {
            locales: self.locales.clone(),
            rows: self
                .rows
                .iter()
                .filter(|(_, values)| values.iter().any(Option::is_none))
                .map(|(key, values)| (key.clone(), values.clone()))
                .collect(),
            duplicates: self.duplicates.clone(),
        }
    }

    fn locale_index(&self, locale: &str) -> Option<usize> {
        self.locales.iter().position(|l| l == locale)
    }

    fn row<'a>(&'a self, key: &'a str, values: &'a [Option<String>]) -> KeyRow<'a> {
        KeyRow {
            key,
            locales: &self.locales,
            values,
        }
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct KeyRow<'a> {
    key: &'a str,
    locales: &'a [String],
    values: &'a [Option<String>],
}

impl<'a> KeyRow<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// `(locale, value)` pairs in column order.
    pub fn values(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + use<'a> {
        self.locales
            .iter()
            .zip(self.values)
            .map(|(locale, value)| (locale.as_str(), value.as_deref()))
    }

    pub fn value(&self, locale: &str) -> Option<Option<&'a str>> {
        self.locales
            .iter()
            .position(|l| l == locale)
            .map(|i| self.values[i].as_deref())
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }

    pub fn missing_locales(&self) -> Vec<&'a str> {
        self.values()
            .filter(|(_, value)| value.is_none())
            .map(|(locale, _)| locale)
            .collect()
    }
}

impl Serialize for KeyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|row| (row.key(), row)))
    }
}

impl Serialize for KeyRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.values())
    }
}

/// Accumulates keys locale by locale, keeping the first value seen for
/// each `(key, locale)` pair. An explicit null does not claim the slot, so
/// a later value for the same pair fills it without being a duplicate.
#[derive(Debug)]
pub(crate) struct KeyTableBuilder {
    locales: Vec<String>,
    rows: BTreeMap<String, Vec<Option<String>>>,
    duplicates: Vec<DuplicateKey>,
}

impl KeyTableBuilder {
    pub(crate) fn new(locales: Vec<String>) -> Self {
        Self {
            locales,
            rows: BTreeMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Record `value` for `key` in the locale at `locale_index`.
    ///
    /// Returns `false` (and records a [`DuplicateKey`]) when the pair
    /// already holds a value.
    pub(crate) fn insert(
        &mut self,
        locale_index: usize,
        key: String,
        value: Option<&str>,
        path: &Path,
    ) -> bool {
        let width = self.locales.len();
        let slot = &mut self
            .rows
            .entry(key.clone())
            .or_insert_with(|| vec![None; width])[locale_index];

        if slot.is_some() {
            let locale = self.locales[locale_index].clone();
            tracing::warn!(
                key = %key,
                locale = %locale,
                path = %path.display(),
                "duplicate key within the same locale; only the first instance will be used"
            );
            self.duplicates.push(DuplicateKey {
                key,
                locale,
                path: path.to_path_buf(),
            });
            return false;
        }

        *slot = value.map(String::from);
        true
    }

    /// Freeze the table. Unseen slots are already `None`.
    pub(crate) fn finish(self) -> KeyTable {
        KeyTable {
            locales: self.locales,
            rows: self.rows,
            duplicates: self.duplicates,
        }
    }
}
