//! Equivalence classes: a map from elements to class tags together with the
//! inverse map from tags to member sets, kept mutually consistent. A class
//! whose last member is removed disappears.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equivalence<E: Ord, C: Ord> {
    class_of: BTreeMap<E, C>,
    members: BTreeMap<C, BTreeSet<E>>,
}

impl<E: Ord, C: Ord> Default for Equivalence<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord, C: Ord> Equivalence<E, C> {
    pub fn new() -> Self {
        Equivalence {
            class_of: BTreeMap::new(),
            members: BTreeMap::new(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.class_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_of.is_empty()
    }

    pub fn class_of(&self, e: &E) -> Option<&C> {
        self.class_of.get(e)
    }

    pub fn members(&self, c: &C) -> Option<&BTreeSet<E>> {
        self.members.get(c)
    }

    /// Iterate classes and their member sets in ascending tag order.
    pub fn classes(&self) -> impl Iterator<Item = (&C, &BTreeSet<E>)> {
        self.members.iter()
    }
}

impl<E: Ord + Clone, C: Ord + Clone> Equivalence<E, C> {
    /// Assign `e` to class `c`, moving it out of any class it was in.
    pub fn insert(&mut self, e: E, c: C) {
        self.remove(&e);
        self.class_of.insert(e.clone(), c.clone());
        self.members.entry(c).or_default().insert(e);
    }

    /// Remove `e`, deleting its class if it becomes empty. Returns the tag it
    /// belonged to.
    pub fn remove(&mut self, e: &E) -> Option<C> {
        let c = self.class_of.remove(e)?;
        let emptied = match self.members.get_mut(&c) {
            Some(set) => {
                set.remove(e);
                set.is_empty()
            }
            None => false,
        };
        if emptied {
            self.members.remove(&c);
        }
        Some(c)
    }
}
