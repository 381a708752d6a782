//! Contribution cart and its persisted text form.

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{MAX_CART_SIZE, MAX_CONTRIBUTION_AMOUNT};
use crate::libs::error::{Error, Result};

/// Recipient project as listed by the round. Carried through the cart opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub address: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub index: u64,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_locked: bool,
    /// Listing fields this client does not interpret, kept so a re-save
    /// writes them back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub project: Project,
    /// Decimal amount in token units, e.g. "5" or "12.5".
    pub amount: String,
    /// Set once the item was removed and its amount zeroed.
    pub is_cleared: bool,
}

impl CartItem {
    pub fn new(project: Project, amount: impl Into<String>) -> Self {
        Self {
            project,
            amount: amount.into(),
            is_cleared: false,
        }
    }

    pub fn clear(&mut self) {
        self.amount = "0".to_string();
        self.is_cleared = true;
    }

    /// Amount in the token's base units.
    pub fn amount_units(&self, decimals: u8) -> Result<U256> {
        let parsed = parse_units(self.amount.trim(), decimals).map_err(|e| {
            Error::Policy(format!("amount `{}` is not a valid decimal: {e}", self.amount))
        })?;
        match parsed {
            ParseUnits::U256(units) => Ok(units),
            ParseUnits::I256(_) => Err(Error::Policy(format!(
                "amount `{}` is negative",
                self.amount
            ))),
        }
    }
}

pub fn serialize_cart(cart: &[CartItem]) -> Result<String> {
    Ok(serde_json::to_string(cart)?)
}

/// `None` is an empty cart. Any present text must be a well-formed cart,
/// including the empty string which is rejected.
pub fn deserialize_cart(data: Option<&str>) -> Result<Vec<CartItem>> {
    match data {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(Vec::new()),
    }
}

/// Size and amount bounds the contract will enforce anyway. Callers run this
/// before committing a cart to fail early.
pub fn check_cart_limits(cart: &[CartItem], decimals: u8) -> Result<()> {
    if cart.len() > MAX_CART_SIZE {
        return Err(Error::Policy(format!(
            "cart holds {} items, the limit is {MAX_CART_SIZE}",
            cart.len()
        )));
    }
    let cap = U256::from(MAX_CONTRIBUTION_AMOUNT) * U256::from(10u64).pow(U256::from(decimals));
    for item in cart {
        if item.amount_units(decimals)? > cap {
            return Err(Error::Policy(format!(
                "{}: amount {} exceeds {MAX_CONTRIBUTION_AMOUNT}",
                item.project.name, item.amount
            )));
        }
    }
    Ok(())
}
