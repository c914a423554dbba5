//! In-memory backend implementation

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    BookingGateway, BookingRecord, BookingRequest, BookingStatus, CurrentUser, FavoritesGateway,
    Property, PropertyGateway, SessionStore,
};
use crate::shared::errors::GatewayError;

/// In-memory stand-in for the REST backend, for development and testing
pub struct InMemoryBackend {
    properties: DashMap<String, Property>,
    bookings: DashMap<String, BookingRequest>,
    favorites: DashSet<String>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            properties: DashMap::new(),
            bookings: DashMap::new(),
            favorites: DashSet::new(),
        }
    }

    pub fn seed_property(&self, property: Property) {
        self.properties.insert(property.id.clone(), property);
    }

    pub fn booking(&self, id: &str) -> Option<BookingRequest> {
        self.bookings.get(id).map(|b| b.clone())
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyGateway for InMemoryBackend {
    async fn get_property(&self, id: &str) -> Result<Property, GatewayError> {
        self.properties
            .get(id)
            .map(|p| p.clone())
            .ok_or_else(|| GatewayError::NotFound(format!("property {id}")))
    }
}

#[async_trait]
impl BookingGateway for InMemoryBackend {
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingRecord, GatewayError> {
        if !self.properties.contains_key(&request.property_id) {
            return Err(GatewayError::NotFound(format!(
                "property {}",
                request.property_id
            )));
        }
        let id = Uuid::new_v4().to_string();
        self.bookings.insert(id.clone(), request.clone());
        debug!(booking_id = %id, property_id = %request.property_id, "Booking stored");
        Ok(BookingRecord {
            id,
            status: BookingStatus::Pending,
        })
    }
}

#[async_trait]
impl FavoritesGateway for InMemoryBackend {
    async fn list_favorites(&self) -> Result<Vec<String>, GatewayError> {
        Ok(self.favorites.iter().map(|id| id.key().clone()).collect())
    }

    async fn add_favorite(&self, property_id: &str) -> Result<(), GatewayError> {
        if !self.properties.contains_key(property_id) {
            return Err(GatewayError::NotFound(format!("property {property_id}")));
        }
        self.favorites.insert(property_id.to_string());
        Ok(())
    }

    async fn remove_favorite(&self, property_id: &str) -> Result<(), GatewayError> {
        self.favorites.remove(property_id);
        Ok(())
    }
}

/// Session store that lives only as long as the process
#[derive(Default)]
pub struct MemorySessionStore {
    user: RwLock<Option<CurrentUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<CurrentUser>, GatewayError> {
        let guard = self
            .user
            .read()
            .map_err(|e| GatewayError::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, user: &CurrentUser) -> Result<(), GatewayError> {
        let mut guard = self
            .user
            .write()
            .map_err(|e| GatewayError::Storage(e.to_string()))?;
        *guard = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), GatewayError> {
        let mut guard = self
            .user
            .write()
            .map_err(|e| GatewayError::Storage(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
