use crate::chain_map::{Error, Result};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;
use std::result;
use std::slice;
use std::vec;

const INITIAL_BUCKET_COUNT: usize = 1 << 10;

/// A hash map implemented using separate chaining.
///
/// Entries are distributed over a table of buckets by the hash of their key;
/// colliding entries chain inside their bucket. The bucket count is owned by
/// the map instance and doubles once the load factor crosses one half, at
/// which point every entry is redistributed; entries keep their logical
/// presence but generally move to a different bucket.
///
/// # Examples
/// ```
/// use rank_collections::chain_map::ChainMap;
///
/// let mut map = ChainMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.get(&0), Some(&1));
/// assert_eq!(map.get(&1), None);
///
/// assert_eq!(map.remove(&0), Some(1));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct ChainMap<K, V, B = RandomState> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    build_hasher: B,
}

impl<K, V> ChainMap<K, V>
where
    K: Hash + Eq,
{
    /// Constructs a new, empty `ChainMap<K, V>` with the default bucket count
    /// and the default hasher.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let map: ChainMap<u32, u32> = ChainMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(INITIAL_BUCKET_COUNT, RandomState::new())
    }

    /// Constructs a new, empty `ChainMap<K, V>` with a specific initial
    /// bucket count and the default hasher.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let map: ChainMap<u32, u32> = ChainMap::with_capacity(4);
    /// assert_eq!(map.capacity(), 4);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, B> ChainMap<K, V, B>
where
    K: Hash + Eq,
    B: BuildHasher,
{
    /// Constructs a new, empty `ChainMap<K, V, B>` with the default bucket
    /// count and a caller-supplied hasher.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let map: ChainMap<u32, u32, _> = ChainMap::with_hasher(RandomState::new());
    /// ```
    pub fn with_hasher(build_hasher: B) -> Self {
        Self::with_capacity_and_hasher(INITIAL_BUCKET_COUNT, build_hasher)
    }

    /// Constructs a new, empty `ChainMap<K, V, B>` with a specific initial
    /// bucket count and a caller-supplied hasher.
    pub fn with_capacity_and_hasher(capacity: usize, build_hasher: B) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(capacity.max(1), Vec::new);
        ChainMap {
            buckets,
            len: 0,
            build_hasher,
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        let mut hasher = self.build_hasher.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.buckets.len()
    }

    fn is_overloaded(&self) -> bool {
        2 * (self.len + 1) >= self.buckets.len()
    }

    fn rehash(&mut self) {
        let new_bucket_count = self.buckets.len() * 2;
        let old_buckets = mem::replace(&mut self.buckets, Vec::new());
        self.buckets.resize_with(new_bucket_count, Vec::new);
        for (key, value) in old_buckets.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in
    /// the map, the map is unchanged, the existing value is kept, and `false`
    /// is returned.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// assert!(map.insert(1, 1));
    /// assert!(!map.insert(1, 2));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.contains_key(&key) {
            return false;
        }
        if self.is_overloaded() {
            self.rehash();
        }
        let index = self.bucket_index(&key);
        self.buckets[index].push((key, value));
        self.len += 1;
        true
    }

    /// Removes a key from the map. If the key exists in the map, the
    /// associated value is returned. Otherwise `None` is returned.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some(1));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.bucket_index(key);
        let position = self.buckets[index].iter().position(|pair| pair.0 == *key)?;
        self.len -= 1;
        Some(self.buckets[index].swap_remove(position).1)
    }

    /// Returns an immutable reference to the value associated with a
    /// particular key. Returns `None` if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|pair| pair.0 == *key)
            .map(|pair| &pair.1)
    }

    /// Returns a mutable reference to the value associated with a particular
    /// key. Returns `None` if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|pair| pair.0 == *key)
            .map(|pair| &mut pair.1)
    }

    /// Returns an immutable reference to the value associated with a
    /// particular key, or `Err(Error::KeyNotFound)` if the key does not exist
    /// in the map.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::{ChainMap, Error};
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.at(&1), Ok(&1));
    /// assert_eq!(map.at(&0), Err(Error::KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular
    /// key, inserting a default value first when the key does not exist in
    /// the map. Note that looking up an absent key therefore mutates the map.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map: ChainMap<u32, u32> = ChainMap::new();
    /// *map.get_or_insert_default(1) += 5;
    /// assert_eq!(map.get(&1), Some(&5));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = self.bucket_index(&key);
        match self.buckets[index].iter().position(|pair| pair.0 == key) {
            Some(position) => &mut self.buckets[index][position].1,
            None => {
                if self.is_overloaded() {
                    self.rehash();
                }
                self.len += 1;
                let index = self.bucket_index(&key);
                let bucket = &mut self.buckets[index];
                bucket.push((key, V::default()));
                let position = bucket.len() - 1;
                &mut bucket[position].1
            }
        }
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let map: ChainMap<u32, u32> = ChainMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets in the map.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns a reference to the map's hasher.
    pub fn hasher(&self) -> &B {
        &self.build_hasher
    }

    /// Clears the map, removing all entries and keeping the bucket count.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator over the map yielding key-value pairs in bucket
    /// order.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> ChainMapIter<'_, K, V> {
        ChainMapIter {
            outer: self.buckets.iter(),
            inner: [].iter(),
        }
    }

    /// Returns a mutable iterator over the map yielding key-value pairs in
    /// bucket order.
    ///
    /// # Examples
    /// ```
    /// use rank_collections::chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.insert(1, 1);
    ///
    /// for (_, value) in map.iter_mut() {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn iter_mut(&mut self) -> ChainMapIterMut<'_, K, V> {
        ChainMapIterMut {
            outer: self.buckets.iter_mut(),
            inner: [].iter_mut(),
        }
    }
}

impl<K, V, B> IntoIterator for ChainMap<K, V, B>
where
    K: Hash + Eq,
    B: BuildHasher,
{
    type IntoIter = ChainMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        ChainMapIntoIter {
            outer: self.buckets.into_iter(),
            inner: Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V, B> IntoIterator for &'a ChainMap<K, V, B>
where
    K: 'a + Hash + Eq,
    V: 'a,
    B: BuildHasher,
{
    type IntoIter = ChainMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, B> IntoIterator for &'a mut ChainMap<K, V, B>
where
    K: 'a + Hash + Eq,
    V: 'a,
    B: BuildHasher,
{
    type IntoIter = ChainMapIterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `ChainMap<K, V, B>`.
///
/// This iterator yields owned key-value pairs in bucket order.
pub struct ChainMapIntoIter<K, V> {
    outer: vec::IntoIter<Vec<(K, V)>>,
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for ChainMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.inner.next() {
                return Some(pair);
            }
            match self.outer.next() {
                Some(bucket) => self.inner = bucket.into_iter(),
                None => return None,
            }
        }
    }
}

/// An iterator for `ChainMap<K, V, B>`.
///
/// This iterator yields immutable references to key-value pairs in bucket
/// order.
pub struct ChainMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    outer: slice::Iter<'a, Vec<(K, V)>>,
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for ChainMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.inner.next() {
                return Some((&pair.0, &pair.1));
            }
            match self.outer.next() {
                Some(bucket) => self.inner = bucket.iter(),
                None => return None,
            }
        }
    }
}

/// A mutable iterator for `ChainMap<K, V, B>`.
///
/// This iterator yields mutable references to the values of key-value pairs
/// in bucket order.
pub struct ChainMapIterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    outer: slice::IterMut<'a, Vec<(K, V)>>,
    inner: slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for ChainMapIterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.inner.next() {
                return Some((&pair.0, &mut pair.1));
            }
            match self.outer.next() {
                Some(bucket) => self.inner = bucket.iter_mut(),
                None => return None,
            }
        }
    }
}

impl<K, V, B> Default for ChainMap<K, V, B>
where
    K: Hash + Eq,
    B: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hasher(INITIAL_BUCKET_COUNT, B::default())
    }
}

impl<K, V, B> FromIterator<(K, V)> for ChainMap<K, V, B>
where
    K: Hash + Eq,
    B: BuildHasher + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, B> Extend<(K, V)> for ChainMap<K, V, B>
where
    K: Hash + Eq,
    B: BuildHasher,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, B> Clone for ChainMap<K, V, B>
where
    K: Hash + Eq + Clone,
    V: Clone,
    B: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        ChainMap {
            buckets: self.buckets.clone(),
            len: self.len,
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<'a, K, V, B> Index<&'a K> for ChainMap<K, V, B>
where
    K: Hash + Eq,
    B: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("Error: key not found.")
    }
}

impl<K, V, B> fmt::Debug for ChainMap<K, V, B>
where
    K: Hash + Eq + fmt::Debug,
    V: fmt::Debug,
    B: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, B> PartialEq for ChainMap<K, V, B>
where
    K: Hash + Eq,
    V: PartialEq,
    B: BuildHasher,
{
    fn eq(&self, other: &ChainMap<K, V, B>) -> bool {
        self.len == other.len && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, B> Eq for ChainMap<K, V, B>
where
    K: Hash + Eq,
    V: Eq,
    B: BuildHasher,
{
}

impl<K, V, B> Serialize for ChainMap<K, V, B>
where
    K: Hash + Eq + Serialize,
    V: Serialize,
    B: BuildHasher,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ChainMapVisitor<K, V, B> {
    marker: PhantomData<(K, V, B)>,
}

impl<'de, K, V, B> Visitor<'de> for ChainMapVisitor<K, V, B>
where
    K: Hash + Eq + Deserialize<'de>,
    V: Deserialize<'de>,
    B: BuildHasher + Default,
{
    type Value = ChainMap<K, V, B>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = ChainMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, B> Deserialize<'de> for ChainMap<K, V, B>
where
    K: Hash + Eq + Deserialize<'de>,
    V: Deserialize<'de>,
    B: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ChainMapVisitor {
            marker: PhantomData,
        })
    }
}
