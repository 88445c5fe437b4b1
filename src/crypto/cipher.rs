//! AES-256-GCM encryption of a single string field.
//!
//! The cipher is keyed once at startup from a configured passphrase and
//! salt via scrypt. Each `encrypt` call draws a fresh random nonce from
//! the OS CSPRNG and emits a `<hex-nonce>:<hex-ciphertext>` token; the
//! `:` delimiter cannot occur inside a hex segment, so `decrypt` splits
//! on the first one.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use scrypt::{scrypt, Params};
use thiserror::Error;

/// Byte length of the AES-256 key.
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce.
pub const NONCE_LEN: usize = 12;

/// Delimiter between the hex nonce and hex ciphertext segments.
const TOKEN_DELIMITER: char = ':';

/// scrypt cost parameter, log2(N). N = 16384 matches common defaults.
const SCRYPT_LOG_N: u8 = 14;

/// Errors produced by the field cipher.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("field encryption failed")]
    Encryption,

    #[error("encrypted token is malformed: {0}")]
    MalformedToken(&'static str),

    #[error("ciphertext failed authentication")]
    Decryption,

    #[error("decrypted field is not valid UTF-8")]
    InvalidPlaintext,
}

/// Symmetric cipher for the protected client field.
///
/// Cloning is cheap enough for the request path; the key schedule is
/// computed once in [`FieldCipher::from_passphrase`].
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl FieldCipher {
    /// Derive the encryption key from a passphrase and salt and build
    /// the cipher. Called once at startup; derivation is deliberately
    /// expensive.
    pub fn from_passphrase(passphrase: &str, salt: &str) -> Result<Self, CryptoError> {
        let params = Params::new(SCRYPT_LOG_N, 8, 1, KEY_LEN)
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

        let mut key = [0u8; KEY_LEN];
        scrypt(passphrase.as_bytes(), salt.as_bytes(), &params, &mut key)
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

        Ok(Self { cipher })
    }

    /// Encrypt a plaintext field into a `<hex-nonce>:<hex-ciphertext>`
    /// token. Two calls on the same plaintext yield different tokens
    /// because the nonce is drawn fresh each time.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encryption)?;

        Ok(format!(
            "{}{}{}",
            hex::encode(nonce_bytes),
            TOKEN_DELIMITER,
            hex::encode(&ciphertext)
        ))
    }

    /// Decrypt a token produced by [`FieldCipher::encrypt`].
    ///
    /// Fails with [`CryptoError::MalformedToken`] if the token does not
    /// have the expected shape, and [`CryptoError::Decryption`] if the
    /// GCM authentication check rejects the ciphertext. Failure is
    /// terminal for the request; there is no retry.
    pub fn decrypt(&self, token: &str) -> Result<String, CryptoError> {
        let (nonce_hex, ciphertext_hex) = token
            .split_once(TOKEN_DELIMITER)
            .ok_or(CryptoError::MalformedToken("missing delimiter"))?;

        let nonce_bytes =
            hex::decode(nonce_hex).map_err(|_| CryptoError::MalformedToken("nonce is not hex"))?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CryptoError::MalformedToken("wrong nonce length"));
        }

        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|_| CryptoError::MalformedToken("ciphertext is not hex"))?;

        let nonce = Nonce::from_slice(&nonce_bytes);
        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext.as_ref())
            .map_err(|_| CryptoError::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidPlaintext)
    }
}
