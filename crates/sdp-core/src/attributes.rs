//! Name-keyed store for generic `a=` lines
//!
//! Names keep their first-seen order. A name maps to a single attribute
//! until a second one with the same name arrives, at which point the entry
//! becomes an ordered list. A name with no attributes has no entry at all.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::{Attribute, Field};

/// Storage for all attributes sharing one name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeEntry {
    One(Attribute),
    Many(Vec<Attribute>),
}

impl AttributeEntry {
    fn as_slice(&self) -> &[Attribute] {
        match self {
            AttributeEntry::One(attribute) => std::slice::from_ref(attribute),
            AttributeEntry::Many(list) => list,
        }
    }

    fn push(&mut self, attribute: Attribute) {
        match self {
            AttributeEntry::One(first) => {
                *self = AttributeEntry::Many(vec![first.clone(), attribute]);
            }
            AttributeEntry::Many(list) => list.push(attribute),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStore {
    entries: Vec<(String, AttributeEntry)>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Add an attribute, promoting a single entry to a list on collision
    pub fn add(&mut self, attribute: Attribute) {
        match self.position(attribute.name()) {
            Some(index) => self.entries[index].1.push(attribute),
            None => self
                .entries
                .push((attribute.name().to_string(), AttributeEntry::One(attribute))),
        }
    }

    /// The raw entry for a name
    pub fn entry(&self, name: &str) -> Option<&AttributeEntry> {
        self.position(name).map(|index| &self.entries[index].1)
    }

    /// First attribute with the given name
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entry(name).and_then(|entry| entry.as_slice().first())
    }

    /// Every attribute with the given name, in insertion order
    pub fn get_all(&self, name: &str) -> Vec<&Attribute> {
        self.entry(name)
            .map(|entry| entry.as_slice().iter().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, name: &str) -> usize {
        self.entry(name).map(|entry| entry.as_slice().len()).unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove the first attribute with the given name
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        let index = self.position(name)?;
        if let AttributeEntry::Many(list) = &mut self.entries[index].1 {
            let removed = list.remove(0);
            if list.len() == 1 {
                let last = list.remove(0);
                self.entries[index].1 = AttributeEntry::One(last);
            }
            return Some(removed);
        }
        match self.entries.remove(index).1 {
            AttributeEntry::One(attribute) => Some(attribute),
            AttributeEntry::Many(_) => None,
        }
    }

    /// Remove every attribute with the given name
    pub fn remove_all(&mut self, name: &str) -> Vec<Attribute> {
        match self.position(name) {
            Some(index) => match self.entries.remove(index).1 {
                AttributeEntry::One(attribute) => vec![attribute],
                AttributeEntry::Many(list) => list,
            },
            None => Vec::new(),
        }
    }

    /// Replace the whole store
    pub fn replace_all<I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut staged = AttributeStore::new();
        for attribute in attributes {
            staged.add(attribute);
        }
        *self = staged;
    }

    /// Replace the whole store from raw `a=` lines; nothing changes if any
    /// line fails to parse
    pub fn replace_all_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut staged = AttributeStore::new();
        for line in lines {
            staged.add(Attribute::parse_line(line.as_ref())?);
        }
        *self = staged;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All attributes, grouped by first-seen name
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter().flat_map(|(_, entry)| entry.as_slice().iter())
    }

    /// Distinct names in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Total number of attributes
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, entry)| entry.as_slice().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Attribute> for AttributeStore {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut store = AttributeStore::new();
        store.replace_all(iter);
        store
    }
}

impl Extend<Attribute> for AttributeStore {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        for attribute in iter {
            self.add(attribute);
        }
    }
}
