// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local key handling for the command-line wallet.
//!
//! Keys are accepted as PEM (SEC1 or PKCS#8) files or as hex strings and
//! turned into alloy signers.

use std::path::Path;

use alloy::signers::local::PrivateKeySigner;
use k256::SecretKey;

/// Errors raised while loading a private key.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// Decode a secp256k1 secret key from PEM, trying SEC1 before PKCS#8.
pub fn secret_key_from_pem(pem_bytes: &[u8]) -> Result<SecretKey, KeyError> {
    use k256::pkcs8::DecodePrivateKey;

    let block = std::str::from_utf8(pem_bytes)
        .map_err(|e| KeyError::InvalidPrivateKey(format!("Invalid UTF-8: {e}")))
        .and_then(|text| {
            pem::parse(text).map_err(|e| KeyError::InvalidPrivateKey(format!("Invalid PEM: {e}")))
        })?;

    match SecretKey::from_sec1_der(block.contents()) {
        Ok(key) => Ok(key),
        Err(_) => SecretKey::from_pkcs8_der(block.contents())
            .map_err(|e| KeyError::InvalidPrivateKey(format!("Invalid key format: {e}"))),
    }
}

/// Create a signer from a hex private key, with or without `0x`.
pub fn signer_from_hex(private_key_hex: &str) -> Result<PrivateKeySigner, KeyError> {
    let trimmed = private_key_hex.trim();
    let key_bytes = alloy::hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
        .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))
}

/// Create a signer from PEM-encoded private key bytes.
pub fn signer_from_pem(pem_bytes: &[u8]) -> Result<PrivateKeySigner, KeyError> {
    let secret = secret_key_from_pem(pem_bytes)?;
    PrivateKeySigner::from_slice(&secret.to_bytes())
        .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))
}

/// Load a signer from a PEM key file.
pub fn signer_from_pem_file(path: &Path) -> Result<PrivateKeySigner, KeyError> {
    let bytes = std::fs::read(path).map_err(|source| KeyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    signer_from_pem(&bytes)
}
