use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity handle shared by every entity and decorator.
///
/// Collections reject duplicates by `ItemId`, never by structural equality: two lessons
/// with the same title and rates are distinct unless one was cloned from the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::ItemId;

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn copies_keep_identity() {
        let id = ItemId::new();
        let copy = id;
        assert_eq!(id, copy);
    }
}
