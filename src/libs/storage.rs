use {
    crate::libs::{
        cart::{deserialize_cart, serialize_cart, CartItem},
        contributor::{deserialize_contributor_data, serialize_contributor_data, Contributor},
        error::Result,
        identity::Keypair,
        keys::{get_cart_storage_key, get_committed_cart_storage_key, get_contributor_storage_key},
    },
    dashmap::DashMap,
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
        sync::Mutex,
    },
};

/// Flat string key-value storage, the shape of a browser's `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object on disk. Every mutation rewrites the
/// whole file; a missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.load()?;
        f(&mut map);
        self.save(&map)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|m| {
            m.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|m| {
            m.remove(key);
        })
    }
}

/// Per-round view over a store: carts and contributor record for one round.
pub struct RoundStorage<'a, S: KeyValueStore> {
    store: &'a S,
    round: String,
}

impl<'a, S: KeyValueStore> RoundStorage<'a, S> {
    pub fn new(store: &'a S, round_address: impl Into<String>) -> Self {
        Self {
            store,
            round: round_address.into(),
        }
    }

    pub fn load_cart(&self) -> Result<Vec<CartItem>> {
        let raw = self.store.get_item(&get_cart_storage_key(&self.round))?;
        deserialize_cart(raw.as_deref())
    }

    pub fn save_cart(&self, cart: &[CartItem]) -> Result<()> {
        self.store
            .set_item(&get_cart_storage_key(&self.round), &serialize_cart(cart)?)
    }

    pub fn load_committed_cart(&self) -> Result<Vec<CartItem>> {
        let raw = self
            .store
            .get_item(&get_committed_cart_storage_key(&self.round))?;
        deserialize_cart(raw.as_deref())
    }

    pub fn save_committed_cart(&self, cart: &[CartItem]) -> Result<()> {
        self.store.set_item(
            &get_committed_cart_storage_key(&self.round),
            &serialize_cart(cart)?,
        )
    }

    pub fn load_contributor<K: Keypair>(&self) -> Result<Option<Contributor<K>>> {
        let raw = self
            .store
            .get_item(&get_contributor_storage_key(&self.round))?;
        deserialize_contributor_data(raw.as_deref())
    }

    pub fn save_contributor<K: Keypair>(&self, contributor: &Contributor<K>) -> Result<()> {
        self.store.set_item(
            &get_contributor_storage_key(&self.round),
            &serialize_contributor_data(contributor)?,
        )
    }

    /// Forget everything stored for this round.
    pub fn clear(&self) -> Result<()> {
        self.store.remove_item(&get_cart_storage_key(&self.round))?;
        self.store
            .remove_item(&get_committed_cart_storage_key(&self.round))?;
        self.store
            .remove_item(&get_contributor_storage_key(&self.round))
    }
}
