use anyhow::{anyhow, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs cookie values with HMAC-SHA256 over the configured secret key.
///
/// A signed value has the form `<value>.<hex signature>`.
#[derive(Clone)]
pub struct CookieSigner {
    keyed: HmacSha256,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

impl CookieSigner {
    /// Create a signer keyed by `secret_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected by the MAC.
    pub fn new(secret_key: &str) -> Result<Self> {
        let keyed = HmacSha256::new_from_slice(secret_key.as_bytes())
            .map_err(|e| anyhow!("Failed to initialize cookie signer: {e}"))?;
        Ok(Self { keyed })
    }

    fn mac(&self) -> HmacSha256 {
        self.keyed.clone()
    }

    /// Append a signature to `value`.
    #[must_use]
    pub fn sign(&self, value: &str) -> String {
        let mut mac = self.mac();
        mac.update(value.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        format!("{value}.{signature}")
    }

    /// Return the original value if the signature is valid.
    ///
    /// Comparison is constant-time.
    #[must_use]
    pub fn verify<'a>(&self, signed: &'a str) -> Option<&'a str> {
        let (value, signature) = signed.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(value.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(value)
    }
}
