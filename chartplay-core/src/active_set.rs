use chartplay_types::ObjectId;

/// Insertion-ordered set of object ids.
///
/// Active sets stay small (bounded by the lookahead horizons), so a vector
/// with linear membership checks keeps iteration order without hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSet {
    ids: Vec<ObjectId>,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn add_unique(&mut self, id: ObjectId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns whether `id` was present.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        match self.ids.iter().position(|&other| other == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Keep ids for which `keep` returns true, visiting in insertion order.
    pub fn retain(&mut self, keep: impl FnMut(&ObjectId) -> bool) {
        self.ids.retain(keep);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.ids
    }
}
