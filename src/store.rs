//! Two-level result stores: group name, then identifier, then instance.
//!
//! Navigation is nil-safe: looking up a group or identifier that never
//! appeared returns `None` rather than an error, since probing for optional
//! targets is an expected operation.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Instances of one group, keyed by identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifiers<T> {
    group: String,
    instances: BTreeMap<String, T>,
}

impl<T> Identifiers<T> {
    fn new(group: &str) -> Self {
        Self {
            group: group.to_string(),
            instances: BTreeMap::new(),
        }
    }

    /// The group name shared by every instance.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Looks up the instance for `identifier`.
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<&T> {
        self.instances.get(identifier)
    }

    /// Iterates over `(identifier, instance)` pairs, sorted by identifier.
    pub fn iter(&self) -> btree_map::Iter<'_, String, T> {
        self.instances.iter()
    }

    /// Iterates over the identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if the group has no instance.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Identifiers<T> {
    type Item = (&'a String, &'a T);
    type IntoIter = btree_map::Iter<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// All instances, keyed by group name and then identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<T> {
    groups: BTreeMap<String, Identifiers<T>>,
}

impl<T> Default for Groups<T> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<T> Groups<T> {
    /// Looks up the identifiers seen for `group`.
    #[must_use]
    pub fn lookup(&self, group: &str) -> Option<&Identifiers<T>> {
        self.groups.get(group)
    }

    /// Looks up a single instance by group and identifier.
    #[must_use]
    pub fn instance(&self, group: &str, identifier: &str) -> Option<&T> {
        self.lookup(group)
            .and_then(|identifiers| identifiers.lookup(identifier))
    }

    /// Iterates over `(group, identifiers)` pairs, sorted by group name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Identifiers<T>> {
        self.groups.iter()
    }

    /// Iterates over every instance of every group.
    pub fn instances(&self) -> impl Iterator<Item = &T> {
        self.groups
            .values()
            .flat_map(|identifiers| identifiers.instances.values())
    }

    /// Number of groups with at least one instance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if nothing was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the instance for `(group, identifier)`, creating it with
    /// `create` on first use.
    pub(crate) fn get_or_insert_with(
        &mut self,
        group: &str,
        identifier: &str,
        create: impl FnOnce() -> T,
    ) -> &mut T {
        let identifiers = self
            .groups
            .entry(group.to_string())
            .or_insert_with(|| Identifiers::new(group));

        identifiers
            .instances
            .entry(identifier.to_string())
            .or_insert_with(|| {
                tracing::debug!(group, identifier, "Created group instance");
                create()
            })
    }
}

impl<'a, T> IntoIterator for &'a Groups<T> {
    type Item = (&'a String, &'a Identifiers<T>);
    type IntoIter = btree_map::Iter<'a, String, Identifiers<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Groups<u32> {
        let mut groups = Groups::default();
        *groups.get_or_insert_with("http", "b", || 0) += 2;
        *groups.get_or_insert_with("http", "a", || 0) += 1;
        *groups.get_or_insert_with("tcp", "db", || 10) += 1;
        groups
    }

    #[test]
    fn lookup_is_two_level() {
        let groups = store();
        let http = groups.lookup("http").unwrap();

        assert_eq!(http.group(), "http");
        assert_eq!(http.lookup("a"), Some(&1));
        assert_eq!(http.lookup("b"), Some(&2));
        assert_eq!(groups.instance("tcp", "db"), Some(&11));
    }

    #[test]
    fn missing_names_return_none() {
        let groups = store();
        assert!(groups.lookup("icmp").is_none());
        assert!(groups.instance("http", "zzz").is_none());
        assert!(groups.instance("icmp", "a").is_none());
    }

    #[test]
    fn existing_instance_is_reused() {
        let mut groups = store();
        let created = groups.get_or_insert_with("http", "a", || 100);
        assert_eq!(*created, 1);
    }

    #[test]
    fn iteration_is_sorted() {
        let groups = store();

        let names: Vec<&String> = groups.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["http", "tcp"]);

        let ids: Vec<&str> = groups.lookup("http").unwrap().identifiers().collect();
        assert_eq!(ids, ["a", "b"]);

        let all: Vec<u32> = groups.instances().copied().collect();
        assert_eq!(all, [1, 2, 11]);
    }

    #[test]
    fn empty_store() {
        let groups: Groups<u32> = Groups::default();
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
        assert_eq!(groups.instances().count(), 0);
    }
}
