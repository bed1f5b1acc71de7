use std::collections::HashMap;

use super::NodeId;

/// Unique-name registry for one scene.
///
/// Colliding requests get the lowest free numeric suffix:
/// `"Foo"`, `"Foo 1"`, `"Foo 2"`, ... Freed names become available again.
#[derive(Debug, Default)]
pub(crate) struct NameRegistry {
    by_name: HashMap<String, NodeId>,
}

impl NameRegistry {
    /// Registers `id` under `requested` or its first free suffixed variant.
    /// Returns the name actually used.
    pub(crate) fn register(&mut self, requested: &str, id: NodeId) -> String {
        let name = if self.by_name.contains_key(requested) {
            (1u32..)
                .map(|n| format!("{requested} {n}"))
                .find(|candidate| !self.by_name.contains_key(candidate))
                .unwrap_or_else(|| format!("{requested} {id:?}"))
        } else {
            requested.to_owned()
        };

        self.by_name.insert(name.clone(), id);
        name
    }

    /// Frees `name` if it still belongs to `id`.
    pub(crate) fn remove(&mut self, name: &str, id: NodeId) {
        if self.by_name.get(name) == Some(&id) {
            self.by_name.remove(name);
        }
    }

    #[inline]
    pub(crate) fn get(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.by_name.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn collisions_get_increasing_suffixes() {
        let ids = ids(3);
        let mut names = NameRegistry::default();
        assert_eq!(names.register("Foo", ids[0]), "Foo");
        assert_eq!(names.register("Foo", ids[1]), "Foo 1");
        assert_eq!(names.register("Foo", ids[2]), "Foo 2");
        assert_eq!(names.get("Foo 1"), Some(ids[1]));
    }

    #[test]
    fn freed_suffix_is_reused() {
        let ids = ids(4);
        let mut names = NameRegistry::default();
        names.register("Foo", ids[0]);
        names.register("Foo", ids[1]);
        names.register("Foo", ids[2]);
        names.remove("Foo 1", ids[1]);
        assert_eq!(names.register("Foo", ids[3]), "Foo 1");
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn remove_ignores_foreign_owner() {
        let ids = ids(2);
        let mut names = NameRegistry::default();
        names.register("Foo", ids[0]);
        names.remove("Foo", ids[1]);
        assert_eq!(names.get("Foo"), Some(ids[0]));
    }
}
