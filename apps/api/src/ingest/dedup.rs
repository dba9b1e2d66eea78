use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    /// An earlier accepted row of the same upload has the key.
    InFile,
    /// A record already in the store has the key.
    InStore,
}

/// Tracks uniqueness keys across one upload. Only accepted rows are recorded,
/// so a rejected row never shadows a later valid one.
#[derive(Debug)]
pub struct DuplicateGuard<K> {
    existing: HashSet<K>,
    seen: HashSet<K>,
}

impl<K: Eq + Hash + Clone> DuplicateGuard<K> {
    pub fn new(existing: impl IntoIterator<Item = K>) -> Self {
        Self {
            existing: existing.into_iter().collect(),
            seen: HashSet::new(),
        }
    }

    /// In-file duplicates are reported before store duplicates.
    pub fn check(&self, key: &K) -> Option<DuplicateKind> {
        if self.seen.contains(key) {
            Some(DuplicateKind::InFile)
        } else if self.existing.contains(key) {
            Some(DuplicateKind::InStore)
        } else {
            None
        }
    }

    pub fn record(&mut self, key: K) {
        self.seen.insert(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_file_takes_precedence_over_store() {
        let mut guard = DuplicateGuard::new(["ENG-1".to_string()]);
        assert_eq!(guard.check(&"ENG-1".to_string()), Some(DuplicateKind::InStore));
        guard.record("ENG-1".to_string());
        assert_eq!(guard.check(&"ENG-1".to_string()), Some(DuplicateKind::InFile));
    }

    #[test]
    fn test_unseen_key_passes() {
        let mut guard = DuplicateGuard::new(Vec::<String>::new());
        assert_eq!(guard.check(&"ENG-2".to_string()), None);
        guard.record("ENG-2".to_string());
        assert_eq!(guard.check(&"ENG-3".to_string()), None);
    }
}
