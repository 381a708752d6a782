//! Contributor identity and its persisted text form.

use serde::{Deserialize, Deserializer, Serialize};

use crate::libs::error::Result;
use crate::libs::identity::{Keypair, LocalKeypair};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor<K = LocalKeypair> {
    pub keypair: K,
    /// Leaf in the round's state tree, `None` until registration.
    pub state_index: Option<u64>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributorData {
    private_key: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "state_index"
    )]
    state_index: Option<u64>,
}

// Older records store -1 for "not registered yet".
fn state_index<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<u64>, D::Error> {
    let raw = Option::<i64>::deserialize(d)?;
    Ok(raw.and_then(|i| u64::try_from(i).ok()))
}

pub fn serialize_contributor_data<K: Keypair>(contributor: &Contributor<K>) -> Result<String> {
    let data = ContributorData {
        private_key: contributor.keypair.serialize_private_key(),
        state_index: contributor.state_index,
    };
    Ok(serde_json::to_string(&data)?)
}

pub fn deserialize_contributor_data<K: Keypair>(data: Option<&str>) -> Result<Option<Contributor<K>>> {
    let Some(raw) = data else {
        return Ok(None);
    };
    let parsed: ContributorData = serde_json::from_str(raw)?;
    let keypair = K::from_private_key(&parsed.private_key)?;
    Ok(Some(Contributor {
        keypair,
        state_index: parsed.state_index,
    }))
}
