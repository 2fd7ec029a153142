//! Symmetric encryption of stored ticket fields.
//!
//! Every sensitive column (topics, close reasons, usernames, message bodies,
//! feedback comments) is sealed with AES-256-GCM under a key derived from the
//! deployment-wide `ENCRYPTION_KEY`. A sealed field is lowercase hex of:
//!
//! ```text
//! salt (64 bytes) | iv (16 bytes) | tag (16 bytes) | ciphertext
//! ```
//!
//! The key for each field is `PBKDF2-HMAC-SHA512(secret, salt)`, 32 bytes.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use rand::RngCore;
use sha2::Sha512;
use thiserror::Error;

const SALT_LEN: usize = 64;
const IV_LEN: usize = 16;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = SALT_LEN + IV_LEN + TAG_LEN;
const KEY_LEN: usize = 32;

/// AES-256-GCM with a 16-byte nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

#[derive(Debug, Error)]
pub enum DecryptionError {
    #[error("ciphertext is not valid hex: {0}")]
    Encoding(#[from] hex::FromHexError),

    #[error("ciphertext is too short ({0} bytes)")]
    Truncated(usize),

    #[error("ciphertext failed authentication")]
    Authentication,

    #[error("decrypted field is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Reverses the field encryption. Implementations must be deterministic and
/// hold no per-call state so one instance can serve concurrent requests.
pub trait FieldCipher: Send + Sync {
    fn decrypt(&self, ciphertext: &str) -> Result<String, DecryptionError>;
}

/// The cipher stored ticket fields are sealed with.
#[derive(Clone)]
pub struct AesGcmCipher {
    secret: Vec<u8>,
    iterations: u32,
}

impl AesGcmCipher {
    pub const DEFAULT_ITERATIONS: u32 = 100_000;

    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            iterations: Self::DEFAULT_ITERATIONS,
        }
    }

    /// Overrides the PBKDF2 round count. It must match the count used when
    /// the data was sealed.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    fn cipher_for(&self, salt: &[u8]) -> Aes256Gcm16 {
        let mut key = [0u8; KEY_LEN];
        pbkdf2::pbkdf2_hmac::<Sha512>(&self.secret, salt, self.iterations, &mut key);
        Aes256Gcm16::new(GenericArray::from_slice(&key))
    }

    /// Seals a field with a fresh random salt and IV.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut iv);

        let sealed = self
            .cipher_for(&salt)
            .encrypt(GenericArray::from_slice(&iv), plaintext.as_bytes())
            .expect("AES-GCM encryption of an in-memory buffer cannot fail");
        let (body, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        out.extend_from_slice(&salt);
        out.extend_from_slice(&iv);
        out.extend_from_slice(tag);
        out.extend_from_slice(body);
        hex::encode(out)
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<String, DecryptionError> {
        let raw = hex::decode(ciphertext.trim())?;
        if raw.len() < HEADER_LEN {
            return Err(DecryptionError::Truncated(raw.len()));
        }

        let (salt, rest) = raw.split_at(SALT_LEN);
        let (iv, rest) = rest.split_at(IV_LEN);
        let (tag, body) = rest.split_at(TAG_LEN);

        // The AEAD API expects the tag after the ciphertext.
        let mut sealed = Vec::with_capacity(body.len() + TAG_LEN);
        sealed.extend_from_slice(body);
        sealed.extend_from_slice(tag);

        let plaintext = self
            .cipher_for(salt)
            .decrypt(GenericArray::from_slice(iv), sealed.as_slice())
            .map_err(|_| DecryptionError::Authentication)?;

        Ok(String::from_utf8(plaintext)?)
    }
}

impl FieldCipher for AesGcmCipher {
    fn decrypt(&self, ciphertext: &str) -> Result<String, DecryptionError> {
        AesGcmCipher::decrypt(self, ciphertext)
    }
}

impl std::fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmCipher")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}
