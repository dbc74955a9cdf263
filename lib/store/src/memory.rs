use ahash::AHashMap;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::hash::HashStore;
use crate::kv::KvStore;
use crate::sorted_set::SortedSetStore;

/// Per-key structure typing, mirroring what a real server enforces.
#[derive(Debug, Clone)]
enum Entry {
    Hash(AHashMap<String, String>),
    SortedSet(AHashMap<String, f64>),
    Str(String),
}

/// Embedded backend implementing all three store traits.
///
/// Keys are typed by the first structure written to them; an operation
/// against a key holding a different structure fails with
/// [`StoreError::WrongType`], the way a real server would reject it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<AHashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Drop every key.
    pub fn clear(&self) {
        self.data.write().clear();
    }

    /// Members of a sorted set ordered by ascending score, ties broken
    /// lexically by member.
    fn sorted_members(map: &AHashMap<String, f64>) -> Vec<(String, f64)> {
        let mut members: Vec<(String, f64)> = map.iter().map(|(m, s)| (m.clone(), *s)).collect();
        members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        members
    }
}

#[async_trait]
impl HashStore for MemoryStore {
    async fn set_fields(&self, key: &str, fields: HashMap<String, String>) -> Result<u64> {
        let mut data = self.data.write();
        let entry = data
            .entry(key.to_owned())
            .or_insert_with(|| Entry::Hash(AHashMap::new()));
        let Entry::Hash(map) = entry else {
            return Err(StoreError::WrongType { key: key.to_owned() });
        };
        let mut created = 0;
        for (field, value) in fields {
            if map.insert(field, value).is_none() {
                created += 1;
            }
        }
        Ok(created)
    }

    async fn get_fields(&self, key: &str, fields: &[String]) -> Result<Vec<Option<String>>> {
        let data = self.data.read();
        match data.get(key) {
            None => Ok(vec![None; fields.len()]),
            Some(Entry::Hash(map)) => Ok(fields.iter().map(|f| map.get(f).cloned()).collect()),
            Some(_) => Err(StoreError::WrongType { key: key.to_owned() }),
        }
    }

    async fn get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let data = self.data.read();
        match data.get(key) {
            None => Ok(HashMap::new()),
            Some(Entry::Hash(map)) => {
                Ok(map.iter().map(|(f, v)| (f.clone(), v.clone())).collect())
            }
            Some(_) => Err(StoreError::WrongType { key: key.to_owned() }),
        }
    }

    async fn remove_field(&self, key: &str, field: &str) -> Result<u64> {
        let mut data = self.data.write();
        let Some(entry) = data.get_mut(key) else {
            return Ok(0);
        };
        let Entry::Hash(map) = entry else {
            return Err(StoreError::WrongType { key: key.to_owned() });
        };
        let removed = u64::from(map.remove(field).is_some());
        if map.is_empty() {
            data.remove(key);
        }
        Ok(removed)
    }
}

#[async_trait]
impl SortedSetStore for MemoryStore {
    async fn add_member(&self, key: &str, member: &str, score: f64) -> Result<u64> {
        let mut data = self.data.write();
        let entry = data
            .entry(key.to_owned())
            .or_insert_with(|| Entry::SortedSet(AHashMap::new()));
        let Entry::SortedSet(map) = entry else {
            return Err(StoreError::WrongType { key: key.to_owned() });
        };
        Ok(u64::from(map.insert(member.to_owned(), score).is_none()))
    }

    async fn range(&self, key: &str) -> Result<Vec<String>> {
        let members = self.range_with_scores(key).await?;
        Ok(members.into_iter().map(|(member, _)| member).collect())
    }

    async fn range_with_scores(&self, key: &str) -> Result<Vec<(String, f64)>> {
        let data = self.data.read();
        match data.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::SortedSet(map)) => Ok(Self::sorted_members(map)),
            Some(_) => Err(StoreError::WrongType { key: key.to_owned() }),
        }
    }

    async fn rev_range(&self, key: &str) -> Result<Vec<String>> {
        let mut members = self.range(key).await?;
        members.reverse();
        Ok(members)
    }

    async fn remove_members(&self, key: &str, members: &[String]) -> Result<u64> {
        let mut data = self.data.write();
        let Some(entry) = data.get_mut(key) else {
            return Ok(0);
        };
        let Entry::SortedSet(map) = entry else {
            return Err(StoreError::WrongType { key: key.to_owned() });
        };
        let mut removed = 0;
        for member in members {
            if map.remove(member).is_some() {
                removed += 1;
            }
        }
        if map.is_empty() {
            data.remove(key);
        }
        Ok(removed)
    }

    async fn member_score(&self, key: &str, member: &str) -> Result<Option<f64>> {
        let data = self.data.read();
        match data.get(key) {
            None => Ok(None),
            Some(Entry::SortedSet(map)) => Ok(map.get(member).copied()),
            Some(_) => Err(StoreError::WrongType { key: key.to_owned() }),
        }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // SET overwrites regardless of the previous structure type.
        self.data
            .write()
            .insert(key.to_owned(), Entry::Str(value.to_owned()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.read();
        match data.get(key) {
            None => Ok(None),
            Some(Entry::Str(value)) => Ok(Some(value.clone())),
            Some(_) => Err(StoreError::WrongType { key: key.to_owned() }),
        }
    }

    async fn del(&self, keys: &[String]) -> Result<u64> {
        let mut data = self.data.write();
        let mut removed = 0;
        for key in keys {
            if data.remove(key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
