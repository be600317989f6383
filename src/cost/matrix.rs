use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixEntry {
    pub attribute: String,
    pub from: String,
    pub to: String,
    pub minutes: f64,
}

/// Exact changeover minutes keyed by `(attribute, from, to)`.
///
/// Entries are directional; use [`MatrixLookup::insert_symmetric`] for data
/// that applies both ways. On the wire this is a flat list of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<MatrixEntry>", into = "Vec<MatrixEntry>")]
pub struct MatrixLookup {
    // attribute -> from -> to -> minutes
    table: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
}

impl MatrixLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        attribute: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        minutes: f64,
    ) {
        self.table
            .entry(attribute.into())
            .or_default()
            .entry(from.into())
            .or_default()
            .insert(to.into(), minutes);
    }

    pub fn insert_symmetric(&mut self, attribute: &str, a: &str, b: &str, minutes: f64) {
        self.insert(attribute, a, b, minutes);
        self.insert(attribute, b, a, minutes);
    }

    #[inline]
    pub fn get(&self, attribute: &str, from: &str, to: &str) -> Option<f64> {
        self.table.get(attribute)?.get(from)?.get(to).copied()
    }

    /// All `(from, to, minutes)` entries recorded for one attribute.
    pub fn transitions<'a>(
        &'a self,
        attribute: &str,
    ) -> impl Iterator<Item = (&'a str, &'a str, f64)> + 'a {
        self.table
            .get(attribute)
            .into_iter()
            .flat_map(|froms| froms.iter())
            .flat_map(|(from, tos)| {
                tos.iter()
                    .map(move |(to, &minutes)| (from.as_str(), to.as_str(), minutes))
            })
    }

    pub fn len(&self) -> usize {
        self.table
            .values()
            .flat_map(|froms| froms.values())
            .map(|tos| tos.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = MatrixEntry> + '_ {
        self.table.iter().flat_map(|(attribute, froms)| {
            froms.iter().flat_map(move |(from, tos)| {
                tos.iter().map(move |(to, &minutes)| MatrixEntry {
                    attribute: attribute.clone(),
                    from: from.clone(),
                    to: to.clone(),
                    minutes,
                })
            })
        })
    }

    /// Keeps only entries whose attribute is requested and whose endpoints
    /// were both observed for that attribute.
    pub fn restricted_to(&self, observed: &BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut out = MatrixLookup::new();
        for (attribute, values) in observed {
            let Some(froms) = self.table.get(attribute) else {
                continue;
            };
            for (from, tos) in froms.iter().filter(|(f, _)| values.contains(*f)) {
                for (to, &minutes) in tos.iter().filter(|(t, _)| values.contains(*t)) {
                    out.insert(attribute.as_str(), from.as_str(), to.as_str(), minutes);
                }
            }
        }
        out
    }

    pub fn merge(&mut self, other: MatrixLookup) {
        for entry in other.entries() {
            self.insert(entry.attribute, entry.from, entry.to, entry.minutes);
        }
    }
}

impl From<Vec<MatrixEntry>> for MatrixLookup {
    fn from(entries: Vec<MatrixEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<MatrixLookup> for Vec<MatrixEntry> {
    fn from(matrix: MatrixLookup) -> Self {
        matrix.entries().collect()
    }
}

impl FromIterator<MatrixEntry> for MatrixLookup {
    fn from_iter<T: IntoIterator<Item = MatrixEntry>>(iter: T) -> Self {
        let mut m = MatrixLookup::new();
        for e in iter {
            m.insert(e.attribute, e.from, e.to, e.minutes);
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_directional() {
        let mut m = MatrixLookup::new();
        m.insert("Material", "Steel", "Aluminum", 5.0);
        assert_eq!(m.get("Material", "Steel", "Aluminum"), Some(5.0));
        assert_eq!(m.get("Material", "Aluminum", "Steel"), None);

        m.insert_symmetric("Material", "Steel", "Copper", 7.0);
        assert_eq!(m.get("Material", "Copper", "Steel"), Some(7.0));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn restriction_drops_unobserved_values() {
        let mut m = MatrixLookup::new();
        m.insert("Color", "Red", "Blue", 3.0);
        m.insert("Color", "Red", "Green", 4.0);
        m.insert("Size", "S", "M", 1.0);

        let mut observed = BTreeMap::new();
        observed.insert(
            "Color".to_string(),
            ["Red", "Blue"].iter().map(|s| s.to_string()).collect(),
        );

        let r = m.restricted_to(&observed);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("Color", "Red", "Blue"), Some(3.0));
    }

    #[test]
    fn serializes_as_flat_entries() {
        let mut m = MatrixLookup::new();
        m.insert("Color", "Red", "Blue", 3.0);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(
            json,
            r#"[{"attribute":"Color","from":"Red","to":"Blue","minutes":3.0}]"#
        );
        let back: MatrixLookup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
