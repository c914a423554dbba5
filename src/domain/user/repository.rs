use async_trait::async_trait;

use super::CurrentUser;
use crate::shared::errors::GatewayError;

/// Persisted sign-in session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<CurrentUser>, GatewayError>;

    async fn save(&self, user: &CurrentUser) -> Result<(), GatewayError>;

    async fn clear(&self) -> Result<(), GatewayError>;
}
