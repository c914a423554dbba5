//! Lenient decoding for backend JSON fields

use serde::{Deserialize, Deserializer};

/// Identifier sent either as a string or as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

/// The `id` / `_id` pair of a backend document.
///
/// Document stores may send either key or both (`_id` plus an `id` virtual),
/// so they are decoded as separate fields rather than aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdFields {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<WireId>,
}

impl IdFields {
    /// `id` wins when both are present.
    pub fn resolve(self) -> Result<String, String> {
        self.id
            .or(self.mongo_id)
            .map(String::from)
            .ok_or_else(|| "missing field `id` or `_id`".to_string())
    }
}

/// Accept a whole currency amount sent as an integer or a float; floats are
/// rounded half away from zero.
pub fn whole_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Int(i64),
        Float(f64),
    }

    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Int(n) => n,
        RawAmount::Float(f) => f.round() as i64,
    })
}
