//! Active-profile coordination and the API consumed by display layers.
//!
//! The tracker scopes store reads and writes to the selected profile,
//! persists the selection, and hands every successful mutation back to
//! the caller as a [`Refresh`] so stale views get re-queried. It never
//! reaches into display code itself.

use crate::kv::{KvStore, KEY_CURRENT_PROFILE};
use crate::projection;
use crate::store::DoseStore;
use crate::types::{Catalog, DoseEvent, ProjectionPoint, Refresh};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Profile coordinator over a dose store and a selection backend
pub struct Tracker<K: KvStore> {
    store: DoseStore<K>,
    selection: K,
    catalog: Catalog,
    active: String,
}

impl<K: KvStore> Tracker<K> {
    /// Build a tracker, resolving the initial selection from the
    /// `current_profile` key.
    ///
    /// A missing or no-longer-known persisted selection falls back to
    /// `default_profile`, which must itself be a known profile.
    pub fn new(
        store: DoseStore<K>,
        selection: K,
        catalog: Catalog,
        default_profile: &str,
    ) -> Result<Self> {
        let active = match selection.get(KEY_CURRENT_PROFILE)? {
            Some(name) if store.contains_profile(&name) => name,
            Some(name) => {
                tracing::warn!(
                    "Persisted profile {:?} is not configured, falling back to {:?}",
                    name,
                    default_profile
                );
                default_profile.to_string()
            }
            None => default_profile.to_string(),
        };

        if !store.contains_profile(&active) {
            return Err(Error::UnknownProfile(active));
        }

        Ok(Self {
            store,
            selection,
            catalog,
            active,
        })
    }

    /// Known profile names
    pub fn profiles(&self) -> Vec<String> {
        self.store.profile_names()
    }

    pub fn current_profile(&self) -> &str {
        &self.active
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Select another known profile and persist the selection.
    ///
    /// An unknown name fails without changing the active profile or any
    /// stored events.
    pub fn switch_profile(&mut self, name: &str) -> Result<Refresh> {
        if !self.store.contains_profile(name) {
            return Err(Error::UnknownProfile(name.into()));
        }

        self.active = name.to_string();
        self.selection.set(KEY_CURRENT_PROFILE, name)?;
        tracing::info!("Switched to profile {:?}", name);
        Ok(Refresh)
    }

    /// Log a new administration under the active profile
    pub fn add_dose(
        &mut self,
        compound: &str,
        dose_mg: f64,
        taken_at: DateTime<Utc>,
    ) -> Result<Refresh> {
        let event = DoseEvent {
            id: Uuid::new_v4(),
            compound: compound.into(),
            dose_mg,
            taken_at,
        };
        self.store.add(&self.catalog, &self.active, event)
    }

    /// Delete an administration from the active profile by id
    pub fn delete_dose(&mut self, id: Uuid) -> Result<Refresh> {
        self.store.delete(&self.active, id)
    }

    /// The active profile's log, newest first.
    ///
    /// Future-dated events are visible here (they contribute nothing to
    /// the projection before their time). Events whose compound no longer
    /// resolves in the catalog are skipped with a warning.
    pub fn log(&self) -> Vec<DoseEvent> {
        let mut events: Vec<DoseEvent> = self.resolvable_events().cloned().collect();
        events.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
        events
    }

    /// Distinct compound keys present in the active profile, for the
    /// one-projection-per-compound display loop
    pub fn active_compounds(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for event in self.resolvable_events() {
            if !keys.iter().any(|k| k == &event.compound) {
                keys.push(event.compound.clone());
            }
        }
        keys
    }

    /// Level curve for one compound of the active profile at the given
    /// query instants
    pub fn projection(
        &self,
        compound: &str,
        time_points: &[DateTime<Utc>],
    ) -> Result<Vec<ProjectionPoint>> {
        let half_life_days = self.catalog.half_life_days(compound)?;
        let events: Vec<DoseEvent> = self
            .resolvable_events()
            .filter(|e| e.compound == compound)
            .cloned()
            .collect();

        Ok(projection::project(&events, half_life_days, time_points))
    }

    /// Active profile's events whose compound still resolves in the
    /// catalog. The active profile is always known (checked at
    /// construction and on every switch), so a missing slot reads empty.
    fn resolvable_events(&self) -> impl Iterator<Item = &DoseEvent> {
        self.store
            .list(&self.active)
            .unwrap_or(&[])
            .iter()
            .filter(move |event| {
                let known = self.catalog.get(&event.compound).is_some();
                if !known {
                    tracing::warn!(
                        "Dose event {} references unknown compound {:?}, excluded from display",
                        event.id,
                        event.compound
                    );
                }
                known
            })
    }
}
