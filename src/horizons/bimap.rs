use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Two-way lookup table, used for the name ↔ code correspondence of Horizons bodies.
///
/// Both directions are stored, so lookups are `O(1)` either way. Inserting a pair whose key
/// or value already exists replaces the previous association in both directions.
#[derive(Debug, Clone)]
pub struct BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> Default for BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        if let Some(old_value) = self.forward.insert(key.clone(), value.clone()) {
            self.reverse.remove(&old_value);
        }
        if let Some(old_key) = self.reverse.insert(value, key.clone()) {
            if old_key != key {
                self.forward.remove(&old_key);
            }
        }
    }

    pub fn get_by_key<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.forward.get(key)
    }

    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.reverse.get(value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.forward.keys()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> FromIterator<(K, V)> for BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BiMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
