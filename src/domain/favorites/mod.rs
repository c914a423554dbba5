//! Favorites contract

use async_trait::async_trait;

use crate::shared::errors::GatewayError;

#[async_trait]
pub trait FavoritesGateway: Send + Sync {
    /// Property ids the signed-in user has saved.
    async fn list_favorites(&self) -> Result<Vec<String>, GatewayError>;

    async fn add_favorite(&self, property_id: &str) -> Result<(), GatewayError>;

    async fn remove_favorite(&self, property_id: &str) -> Result<(), GatewayError>;
}
