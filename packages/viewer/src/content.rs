//! Content objects and the desired anchorage multimap.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Application value displayed by a part. Compared by equality, never by
/// any secondary key.
pub trait ContentObject: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> ContentObject for T {}

/// Desired anchorages of a part: content object -> roles.
///
/// Set semantics: inserting the same (content, role) pair twice is a no-op.
/// Iteration follows first insertion of each content object.
#[derive(Debug, Clone)]
pub struct AnchorageMap<C: ContentObject> {
    entries: Vec<(C, BTreeSet<String>)>,
    index: HashMap<C, usize>,
}

impl<C: ContentObject> AnchorageMap<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a (content, role) pair. Returns false when it was already present.
    pub fn insert(&mut self, content: C, role: impl Into<String>) -> bool {
        let role = role.into();
        match self.index.get(&content) {
            Some(&slot) => self.entries[slot].1.insert(role),
            None => {
                self.index.insert(content.clone(), self.entries.len());
                self.entries.push((content, BTreeSet::from([role])));
                true
            }
        }
    }

    /// Remove a (content, role) pair. Returns false when it was absent.
    pub fn remove(&mut self, content: &C, role: &str) -> bool {
        let Some(&slot) = self.index.get(content) else {
            return false;
        };
        let removed = self.entries[slot].1.remove(role);
        if self.entries[slot].1.is_empty() {
            self.index.remove(content);
            self.entries.remove(slot);
            for position in self.index.values_mut() {
                if *position > slot {
                    *position -= 1;
                }
            }
        }
        removed
    }

    pub fn contains(&self, content: &C, role: &str) -> bool {
        self.index
            .get(content)
            .is_some_and(|&slot| self.entries[slot].1.contains(role))
    }

    pub fn contains_content(&self, content: &C) -> bool {
        self.index.contains_key(content)
    }

    /// Roles under which `content` is desired, in lexical order
    pub fn roles(&self, content: &C) -> impl Iterator<Item = &str> {
        self.index
            .get(content)
            .into_iter()
            .flat_map(|&slot| self.entries[slot].1.iter().map(String::as_str))
    }

    /// Every (content, role) pair
    pub fn iter(&self) -> impl Iterator<Item = (&C, &str)> {
        self.entries
            .iter()
            .flat_map(|(content, roles)| roles.iter().map(move |role| (content, role.as_str())))
    }

    /// Number of (content, role) pairs
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, roles)| roles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: ContentObject> Default for AnchorageMap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ContentObject> PartialEq for AnchorageMap<C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(content, role)| other.contains(content, role))
    }
}

impl<C: ContentObject> Eq for AnchorageMap<C> {}

impl<C: ContentObject, R: Into<String>> FromIterator<(C, R)> for AnchorageMap<C> {
    fn from_iter<I: IntoIterator<Item = (C, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (content, role) in iter {
            map.insert(content, role);
        }
        map
    }
}
