use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use crate::set::FuzzySet;

new_key_type! {
    /// A fuzzy set key
    pub struct SetKey;
}

/// A collection of fuzzy sets under unique names.
///
/// Keys stay valid until their set is removed; re-inserting a name replaces
/// the set in place and keeps its key.
#[derive(Default)]
pub struct FuzzySets {
    sets: SlotMap<SetKey, (String, FuzzySet)>,
    names: HashMap<String, SetKey>,
}

impl FuzzySets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `set` under `name`, returning its key and the set it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, set: FuzzySet) -> (SetKey, Option<FuzzySet>) {
        let name = name.into();

        if let Some(&key) = self.names.get(&name) {
            tracing::debug!(%name, label = set.label(), "replacing fuzzy set");
            let previous = std::mem::replace(&mut self.sets[key].1, set);

            return (key, Some(previous));
        }

        tracing::debug!(%name, label = set.label(), "adding fuzzy set");
        let key = self.sets.insert((name.clone(), set));
        self.names.insert(name, key);

        (key, None)
    }

    pub fn get(&self, name: &str) -> Option<&FuzzySet> {
        self.key(name).and_then(|key| self.get_by_key(key))
    }

    pub fn get_by_key(&self, key: SetKey) -> Option<&FuzzySet> {
        self.sets.get(key).map(|(_, set)| set)
    }

    pub fn key(&self, name: &str) -> Option<SetKey> {
        self.names.get(name).copied()
    }

    pub fn name(&self, key: SetKey) -> Option<&str> {
        self.sets.get(key).map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FuzzySet> {
        let key = self.names.remove(name)?;

        tracing::debug!(name, "removing fuzzy set");

        self.sets.remove(key).map(|(_, set)| set)
    }

    /// Names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.values().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FuzzySet)> + '_ {
        self.sets.values().map(|(name, set)| (name.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
fn sample_set(c: f64) -> FuzzySet {
    use crate::universe::Universe;

    let universe = Universe::linspace(0., 10., 101).unwrap();

    FuzzySet::gaussian(&universe, c, 1.).unwrap()
}

#[test]
fn test_insert_and_lookup() {
    let mut sets = FuzzySets::new();
    let (low, replaced) = sets.insert("low", sample_set(2.));

    assert!(replaced.is_none());
    sets.insert("high", sample_set(8.));

    assert_eq!(sets.len(), 2);
    assert_eq!(sets.key("low"), Some(low));
    assert_eq!(sets.name(low), Some("low"));
    assert_eq!(sets.get("high").unwrap().label(), "Gaussian(8,1)");
    assert!(sets.get("medium").is_none());

    let mut names: Vec<_> = sets.names().collect();
    names.sort_unstable();
    assert_eq!(names, ["high", "low"]);
}

#[test]
fn test_insert_replaces_by_name() {
    let mut sets = FuzzySets::new();
    let (key, _) = sets.insert("a", sample_set(2.));
    let (same_key, replaced) = sets.insert("a", sample_set(5.));

    assert_eq!(key, same_key);
    assert_eq!(replaced.unwrap().label(), "Gaussian(2,1)");
    assert_eq!(sets.len(), 1);
    assert_eq!(sets.get_by_key(key).unwrap().label(), "Gaussian(5,1)");
}

#[test]
fn test_remove() {
    let mut sets = FuzzySets::new();
    let (key, _) = sets.insert("a", sample_set(2.));

    assert!(sets.remove("a").is_some());
    assert!(sets.remove("a").is_none());
    assert!(sets.get_by_key(key).is_none());
    assert!(sets.is_empty());
    assert!(!sets.contains("a"));
}
