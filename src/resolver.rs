//! Certificate resolution.
//!
//! The extractor owns no certificate state: it asks an
//! [`AuthCertificateResolver`] to turn a secret reference into an
//! [`AuthSslCert`] handle.  Caching, fetching and rotation are the
//! resolver's business.  [`FileCertResolver`] is the built-in
//! implementation for controllers that materialise secrets as PEM files
//! on local disk.
//!
//! # File format
//!
//! Certificate bundles are expected in **PEM format**, the format operator
//! tooling (openssl, cert-manager) emits by default.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use x509_parser::pem::Pem;

/// Error type produced by certificate resolvers.
///
/// Boxed so each implementation keeps its own concrete error; the
/// extractor wraps whatever comes back without flattening the cause.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Certificate handle
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to a resolved trust-anchor certificate bundle.
///
/// Carries the on-disk location the proxy template points its
/// client-verification directive at, plus a fingerprint for change
/// detection.  The certificate bytes themselves stay with the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSslCert {
    /// The secret reference this handle was resolved from.
    pub secret: String,

    /// Path of the PEM bundle on disk.
    pub pem_file_name: String,

    /// Hex-encoded SHA-256 fingerprint of the PEM bytes.
    pub pem_sha: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolver capability
// ─────────────────────────────────────────────────────────────────────────────

/// Capability to resolve a secret reference into a certificate handle.
pub trait AuthCertificateResolver {
    /// Resolve `secret_ref` (a raw `name` or `namespace/name` string) into
    /// a certificate handle.
    ///
    /// # Errors
    ///
    /// Returns the implementation's own error when the reference is
    /// unknown or the stored material is unusable.
    fn auth_certificate(
        &self,
        secret_ref: &str,
    ) -> std::result::Result<AuthSslCert, ResolverError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Local PEM file resolver
// ─────────────────────────────────────────────────────────────────────────────

/// Resolver backed by PEM files on local disk.
///
/// The surrounding controller registers a file path per secret reference
/// as it materialises secrets; resolution reads the file, checks it
/// actually contains parseable X.509 certificates, and fingerprints it.
#[derive(Debug, Clone, Default)]
pub struct FileCertResolver {
    paths: HashMap<String, PathBuf>,
}

impl FileCertResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the PEM bundle backing `secret_ref`.
    ///
    /// Re-registering a reference replaces the previous path.
    pub fn register(&mut self, secret_ref: impl Into<String>, path: impl Into<PathBuf>) {
        self.paths.insert(secret_ref.into(), path.into());
    }
}

impl AuthCertificateResolver for FileCertResolver {
    fn auth_certificate(
        &self,
        secret_ref: &str,
    ) -> std::result::Result<AuthSslCert, ResolverError> {
        let path = self
            .paths
            .get(secret_ref)
            .ok_or_else(|| format!("no certificate registered for '{secret_ref}'"))?;

        let pem_data = fs::read(path)
            .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;

        let cert_count = count_certificates(path, &pem_data)?;
        let pem_sha = hex::encode(Sha256::digest(&pem_data));

        debug!(
            secret = secret_ref,
            path = %path.display(),
            certs = cert_count,
            "auth certificate resolved"
        );

        Ok(AuthSslCert {
            secret: secret_ref.to_owned(),
            pem_file_name: path.display().to_string(),
            pem_sha,
        })
    }
}

/// Count the parseable certificates in a PEM bundle.
///
/// Non-certificate PEM blocks (keys, CRLs) are skipped; a bundle with no
/// certificate at all, or with an unparseable one, is rejected.
fn count_certificates(path: &Path, pem_data: &[u8]) -> std::result::Result<usize, ResolverError> {
    let mut count = 0;
    for pem in Pem::iter_from_buffer(pem_data) {
        let pem = pem.map_err(|e| format!("invalid PEM in '{}': {e}", path.display()))?;
        if pem.label != "CERTIFICATE" {
            continue;
        }
        pem.parse_x509()
            .map_err(|e| format!("invalid certificate in '{}': {e}", path.display()))?;
        count += 1;
    }

    if count == 0 {
        return Err(format!("no certificates found in '{}'", path.display()).into());
    }

    Ok(count)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
