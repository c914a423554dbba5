//! Signed-in user

use serde::{Deserialize, Serialize};

use crate::shared::types::wire::{IdFields, WireId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    Host,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Guest
    }
}

/// Identity plus bearer token, as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurrentUserWire")]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

#[derive(Deserialize)]
struct CurrentUserWire {
    id: Option<WireId>,
    #[serde(rename = "_id")]
    mongo_id: Option<WireId>,
    name: String,
    email: String,
    #[serde(default)]
    role: UserRole,
    token: String,
}

impl TryFrom<CurrentUserWire> for CurrentUser {
    type Error = String;

    fn try_from(wire: CurrentUserWire) -> Result<Self, Self::Error> {
        let id = IdFields {
            id: wire.id,
            mongo_id: wire.mongo_id,
        }
        .resolve()?;
        Ok(Self {
            id,
            name: wire.name,
            email: wire.email,
            role: wire.role,
            token: wire.token,
        })
    }
}

impl CurrentUser {
    pub fn is_host(&self) -> bool {
        matches!(self.role, UserRole::Host | UserRole::Admin)
    }
}
