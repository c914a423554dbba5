//! Property lookup contract

use async_trait::async_trait;

use super::model::Property;
use crate::shared::errors::GatewayError;

#[async_trait]
pub trait PropertyGateway: Send + Sync {
    /// `GET /properties/{id}`
    async fn get_property(&self, id: &str) -> Result<Property, GatewayError>;
}
