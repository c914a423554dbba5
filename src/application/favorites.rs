//! Favorites cache with optimistic mutation
//!
//! Local membership flips immediately on toggle; the backend call follows and
//! a failed call rolls the flip back. `reconcile` replaces the cache with the
//! server's list and is run at session start.

use std::sync::Arc;

use dashmap::DashSet;
use tracing::{debug, info, warn};

use crate::domain::{DomainResult, FavoritesGateway};

pub struct FavoritesStore {
    gateway: Arc<dyn FavoritesGateway>,
    ids: DashSet<String>,
}

impl FavoritesStore {
    pub fn new(gateway: Arc<dyn FavoritesGateway>) -> Self {
        Self {
            gateway,
            ids: DashSet::new(),
        }
    }

    pub fn contains(&self, property_id: &str) -> bool {
        self.ids.contains(property_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Snapshot of cached ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().map(|id| id.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Replace the cache with server truth.
    pub async fn reconcile(&self) -> DomainResult<usize> {
        let server_ids = self.gateway.list_favorites().await?;
        self.ids.clear();
        for id in server_ids {
            self.ids.insert(id);
        }
        info!(count = self.ids.len(), "Favorites reconciled");
        Ok(self.ids.len())
    }

    /// Flip membership. Returns the new membership on success; on failure the
    /// cache is restored and the error returned.
    pub async fn toggle(&self, property_id: &str) -> DomainResult<bool> {
        let now_favorite = if self.ids.remove(property_id).is_some() {
            false
        } else {
            self.ids.insert(property_id.to_string());
            true
        };
        debug!(%property_id, now_favorite, "Favorite toggled locally");

        let result = if now_favorite {
            self.gateway.add_favorite(property_id).await
        } else {
            self.gateway.remove_favorite(property_id).await
        };

        match result {
            Ok(()) => Ok(now_favorite),
            Err(err) => {
                warn!(%property_id, error = %err, "Favorite update rejected; rolling back");
                if now_favorite {
                    self.ids.remove(property_id);
                } else {
                    self.ids.insert(property_id.to_string());
                }
                Err(err.into())
            }
        }
    }

    /// Drop everything, e.g. on sign-out.
    pub fn clear(&self) {
        self.ids.clear();
    }
}
