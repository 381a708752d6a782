use {
    crate::libs::error::{Error, Result},
    dotenv::dotenv,
    std::{fmt::Debug, path::PathBuf, str::FromStr},
    url::Url,
};

pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the chain the rounds live on.
    pub rpc_url: Url,
    /// Hex private key used to sign withdrawals. Only needed for writes.
    pub private_key: Option<String>,
    /// File backing the local key-value store.
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let rpc = std::env::var("RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".to_string());
        let rpc_url =
            Url::parse(&rpc).map_err(|e| Error::Config(format!("Invalid RPC_URL `{rpc}`: {e}")))?;
        let private_key = std::env::var("PRIVATE_KEY").ok().filter(|k| !k.trim().is_empty());
        let store_path = std::env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".cache").join("storage.json"));
        Ok(Self {
            rpc_url,
            private_key,
            store_path,
        })
    }

    pub fn require_private_key(&self) -> Result<&str> {
        self.private_key
            .as_deref()
            .ok_or_else(|| Error::Config("PRIVATE_KEY is not set".to_string()))
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}
