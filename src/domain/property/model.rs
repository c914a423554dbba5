//! Property record as served by the listing backend

use serde::{Deserialize, Serialize};

use crate::shared::types::wire::{whole_amount, IdFields, WireId};

/// The slice of a listing the booking form needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PropertyWire")]
pub struct Property {
    pub id: String,
    pub title: String,
    /// Nightly rate in whole currency units.
    #[serde(rename = "price")]
    pub nightly_rate: i64,
    pub location: Option<String>,
    pub max_guests: Option<u8>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyWire {
    id: Option<WireId>,
    #[serde(rename = "_id")]
    mongo_id: Option<WireId>,
    #[serde(default)]
    title: String,
    #[serde(rename = "price", deserialize_with = "whole_amount")]
    nightly_rate: i64,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    max_guests: Option<u8>,
}

impl TryFrom<PropertyWire> for Property {
    type Error = String;

    fn try_from(wire: PropertyWire) -> Result<Self, Self::Error> {
        let id = IdFields {
            id: wire.id,
            mongo_id: wire.mongo_id,
        }
        .resolve()?;
        Ok(Self {
            id,
            title: wire.title,
            nightly_rate: wire.nightly_rate,
            location: wire.location,
            max_guests: wire.max_guests,
        })
    }
}
