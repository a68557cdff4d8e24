//! Profile-scoped dose event store.
//!
//! The store owns the canonical per-profile event collections and keeps
//! the persisted mapping in step with memory: every mutation validates,
//! applies to memory, then rewrites the `profile_data` key before
//! returning. A failed write is reported to the caller; memory is not
//! rolled back, so the caller knows the disk copy is behind and can
//! retry.

use crate::kv::{KvStore, KEY_PROFILE_DATA};
use crate::types::{Catalog, DoseEvent, ProfileBook, Refresh};
use crate::{Error, Result};
use uuid::Uuid;

/// Dose event store over a key-value persistence backend
pub struct DoseStore<K: KvStore> {
    book: ProfileBook,
    kv: K,
}

impl<K: KvStore> DoseStore<K> {
    /// Load the store, seeding a slot for each configured profile.
    ///
    /// Missing persisted data starts from the seed; a corrupt payload is
    /// logged and replaced by the seed rather than failing startup.
    pub fn load(kv: K, profile_names: &[String]) -> Result<Self> {
        let book = match kv.get(KEY_PROFILE_DATA)? {
            Some(raw) => match serde_json::from_str::<ProfileBook>(&raw) {
                Ok(mut book) => {
                    // Profiles configured after the last save still need a slot
                    for name in profile_names {
                        book.profiles.entry(name.clone()).or_default();
                    }
                    book
                }
                Err(e) => {
                    tracing::warn!(
                        "Unparseable profile data: {}. Starting from empty profiles.",
                        e
                    );
                    ProfileBook::seeded(profile_names)
                }
            },
            None => {
                tracing::info!(
                    "No persisted profile data, seeding {} profiles",
                    profile_names.len()
                );
                ProfileBook::seeded(profile_names)
            }
        };

        Ok(Self { book, kv })
    }

    /// Known profile names
    pub fn profile_names(&self) -> Vec<String> {
        self.book.profiles.keys().cloned().collect()
    }

    pub fn contains_profile(&self, name: &str) -> bool {
        self.book.profiles.contains_key(name)
    }

    /// Validate and append an event, then persist the full mapping.
    pub fn add(&mut self, catalog: &Catalog, profile: &str, event: DoseEvent) -> Result<Refresh> {
        if event.compound.is_empty() || catalog.get(&event.compound).is_none() {
            return Err(Error::UnknownCompound(event.compound));
        }
        if !event.dose_mg.is_finite() || event.dose_mg <= 0.0 {
            return Err(Error::InvalidDose(event.dose_mg));
        }

        let events = self
            .book
            .profiles
            .get_mut(profile)
            .ok_or_else(|| Error::UnknownProfile(profile.into()))?;

        tracing::debug!(
            "Adding {} mg of {:?} to profile {:?}",
            event.dose_mg,
            event.compound,
            profile
        );
        events.push(event);
        self.persist()?;
        Ok(Refresh)
    }

    /// Remove an event by id. An unknown id is a no-op failure; the store
    /// is left untouched.
    pub fn delete(&mut self, profile: &str, id: Uuid) -> Result<Refresh> {
        let events = self
            .book
            .profiles
            .get_mut(profile)
            .ok_or_else(|| Error::UnknownProfile(profile.into()))?;

        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(Error::EventNotFound(id));
        }

        tracing::debug!("Deleted event {} from profile {:?}", id, profile);
        self.persist()?;
        Ok(Refresh)
    }

    /// Events for one profile, in insertion order
    pub fn list(&self, profile: &str) -> Result<&[DoseEvent]> {
        self.book
            .profiles
            .get(profile)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownProfile(profile.into()))
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.book)?;
        self.kv.set(KEY_PROFILE_DATA, &payload)
    }
}
