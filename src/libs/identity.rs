//! Contributor key material.
//!
//! The round only ever sees a keypair through [`Keypair`]: how the private
//! key is turned into text and back belongs to the identity scheme.

use std::{fmt, str::FromStr};

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::libs::error::{Error, Result};

pub trait Keypair: Sized {
    /// Private key in the scheme's own text form.
    fn serialize_private_key(&self) -> String;

    /// Rebuild the full keypair from [`Keypair::serialize_private_key`] output.
    fn from_private_key(serialized: &str) -> Result<Self>;
}

/// Keypair backed by a local secp256k1 signer.
#[derive(Clone)]
pub struct LocalKeypair {
    signer: PrivateKeySigner,
}

impl LocalKeypair {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl Keypair for LocalKeypair {
    fn serialize_private_key(&self) -> String {
        format!("0x{}", hex::encode(self.signer.to_bytes()))
    }

    fn from_private_key(serialized: &str) -> Result<Self> {
        let signer = PrivateKeySigner::from_str(serialized.trim())
            .map_err(|e| Error::Key(format!("not a hex encoded secp256k1 secret: {e}")))?;
        Ok(Self { signer })
    }
}

// Never print the secret.
impl fmt::Debug for LocalKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

impl PartialEq for LocalKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.signer.to_bytes() == other.signer.to_bytes()
    }
}

impl Eq for LocalKeypair {}
