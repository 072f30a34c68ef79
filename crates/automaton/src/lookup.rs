//! Keyed transition tables.

use fxhash::FxHashMap;

use crate::error::AutomatonError;

/// Constant-time map from a symbol to a transition target.
///
/// Most automaton positions only have zero or one non-trivial fallback, so
/// those shapes are stored inline; everything else goes into an
/// [`FxHashMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyedTable {
    #[default]
    Empty,
    Single {
        key: u8,
        value: usize,
    },
    Map(FxHashMap<u8, usize>),
}

impl KeyedTable {
    /// Build a table from parallel key and value slices of equal length.
    /// When a key repeats, the last value wins.
    pub fn build(keys: &[u8], values: &[usize]) -> Result<Self, AutomatonError> {
        if keys.len() != values.len() {
            return Err(AutomatonError::TableLengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        Ok(Self::from_pairs(keys.iter().copied().zip(values.iter().copied())))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, usize)>) -> Self {
        let mut map: FxHashMap<u8, usize> = pairs.into_iter().collect();
        match map.len() {
            0 => KeyedTable::Empty,
            1 => {
                let Some((key, value)) = map.drain().next() else {
                    return KeyedTable::Empty;
                };
                KeyedTable::Single { key, value }
            }
            _ => KeyedTable::Map(map),
        }
    }

    #[inline]
    pub fn get(&self, key: u8) -> Option<usize> {
        match self {
            KeyedTable::Empty => None,
            KeyedTable::Single { key: k, value } => (*k == key).then_some(*value),
            KeyedTable::Map(map) => map.get(&key).copied(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            KeyedTable::Empty => 0,
            KeyedTable::Single { .. } => 1,
            KeyedTable::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
