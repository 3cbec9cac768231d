//! Process-lifetime store of Pokémon summaries.
//!
//! [`KeyedCache`] is a plain keyed map behind the [`Cache`] capability.
//! [`PokemonCache`] composes one with the well-populated threshold and the
//! single-flight bookkeeping for the full-catalog fetch. Entries are only
//! ever added; nothing is evicted or invalidated.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use futures::future::{BoxFuture, Shared};

use crate::config::DEFAULT_CACHE_THRESHOLD;
use crate::error::Result;
use crate::model::PokemonSummary;

/// Pending full-catalog walk that every concurrent caller awaits.
pub type CatalogFetch = Shared<BoxFuture<'static, Result<Vec<PokemonSummary>>>>;

/// Keyed store capability.
pub trait Cache<T> {
    fn get(&self, key: &str) -> Option<T>;
    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: T);
    /// Snapshot of every value; order carries no meaning.
    fn get_all(&self) -> Vec<T>;
    fn size(&self) -> usize;
}

/// `HashMap`-backed [`Cache`] with interior mutability.
#[derive(Debug)]
pub struct KeyedCache<T> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T> Default for KeyedCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> KeyedCache<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Clone> Cache<T> for KeyedCache<T> {
    fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: T) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
    }

    fn get_all(&self) -> Vec<T> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.values().cloned().collect()
    }

    fn size(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[derive(Default)]
struct InFlight {
    in_progress: bool,
    pending: Option<CatalogFetch>,
}

/// Summary cache keyed by Pokémon name.
pub struct PokemonCache {
    store: KeyedCache<PokemonSummary>,
    threshold: usize,
    in_flight: Mutex<InFlight>,
}

impl Default for PokemonCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_THRESHOLD)
    }
}

impl fmt::Debug for PokemonCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let in_flight = self.lock_in_flight();
        f.debug_struct("PokemonCache")
            .field("size", &self.store.size())
            .field("threshold", &self.threshold)
            .field("in_progress", &in_flight.in_progress)
            .field("pending", &in_flight.pending.is_some())
            .finish()
    }
}

impl PokemonCache {
    /// Empty cache that reports well-populated once it holds more than
    /// `threshold` entries.
    pub fn new(threshold: usize) -> Self {
        Self {
            store: KeyedCache::new(),
            threshold,
            in_flight: Mutex::new(InFlight::default()),
        }
    }

    /// Insert a summary under its name. Re-inserting the same name overwrites
    /// with an identical value.
    pub fn add_pokemon(&self, pokemon: PokemonSummary) {
        let key = pokemon.name.clone();
        self.store.set(&key, pokemon);
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn is_well_populated(&self) -> bool {
        self.store.size() > self.threshold
    }

    /// True only while the flag is set and a pending fetch is published.
    pub fn is_fetch_in_progress(&self) -> bool {
        let in_flight = self.lock_in_flight();
        in_flight.in_progress && in_flight.pending.is_some()
    }

    pub fn set_fetch_in_progress(&self, status: bool) {
        self.lock_in_flight().in_progress = status;
    }

    pub fn set_fetch_promise(&self, fetch: Option<CatalogFetch>) {
        self.lock_in_flight().pending = fetch;
    }

    pub fn fetch_promise(&self) -> Option<CatalogFetch> {
        self.lock_in_flight().pending.clone()
    }

    /// Clear both the flag and the pending handle.
    pub fn finish_fetch(&self) {
        let mut in_flight = self.lock_in_flight();
        in_flight.in_progress = false;
        in_flight.pending = None;
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, InFlight> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Cache<PokemonSummary> for PokemonCache {
    fn get(&self, key: &str) -> Option<PokemonSummary> {
        self.store.get(key)
    }

    fn set(&self, key: &str, value: PokemonSummary) {
        self.store.set(key, value);
    }

    fn get_all(&self) -> Vec<PokemonSummary> {
        self.store.get_all()
    }

    fn size(&self) -> usize {
        self.store.size()
    }
}
