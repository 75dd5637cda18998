use derive_more::derive::{Constructor, Deref, DerefMut, IntoIterator};
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decoded string table: an order-preserving map from 32-bit string keys to localized text.
///
/// Keys are unique within one table; insertion order follows the order entries appear in the
/// resource. Dereferences to the inner [`IndexMap`] for map-style access.
#[derive(Constructor, Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, IntoIterator)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[into_iterator(owned, ref)]
pub struct StringTable(IndexMap<u32, String>);

impl StringTable {
    /// Try to get an entry's text by its key.
    pub fn text(&self, key: u32) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Merge another table into this one; colliding keys take the other table's text.
    pub fn merge(&mut self, other: StringTable) {
        self.0.extend(other.0);
    }
}

impl FromIterator<(u32, String)> for StringTable {
    fn from_iter<T: IntoIterator<Item = (u32, String)>>(iter: T) -> Self {
        StringTable(iter.into_iter().collect())
    }
}

#[cfg(all(test, feature = "serde"))]
mod test {
    use pretty_assertions::assert_eq;

    use crate::types::StringTable;

    #[test]
    fn serde_round_trip() {
        let table: StringTable = [(1u32, "hello".to_owned()), (2, "a\tb".to_owned())]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&table).unwrap();
        let back: StringTable = serde_json::from_str(&json).unwrap();

        assert_eq!(back, table);
    }
}
