//! Mutual-TLS authentication annotation extraction.
//!
//! Derives a validated client-certificate authentication configuration
//! from one ingress rule: which trust-anchor bundle to verify against, how
//! deep to walk the presented chain, and where to redirect on failure.
//!
//! # Pipeline
//!
//! ```text
//! auth-tls-secret        → must be present, non-empty, name[/namespace] shaped
//! auth-tls-verify-depth  → defaulted to 1 when absent, unparseable or zero
//! resolver               → secret reference → certificate handle
//! auth-tls-error-page    → optional redirect location, may be empty
//! ```
//!
//! Each gate short-circuits the rest; the resolver is never consulted for
//! a reference that failed validation.  No retries, no caching, no
//! mutation of the input resource.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotations::parser::AnnotationReader;
use crate::ingress::Ingress;
use crate::resolver::{AuthCertificateResolver, AuthSslCert};
use crate::secret_ref;
use crate::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Recognised annotation keys
// ─────────────────────────────────────────────────────────────────────────────

/// Annotation naming the secret that holds the trust-anchor certificate.
pub const AUTH_TLS_SECRET: &str = "ingress.kubernetes.io/auth-tls-secret";

/// Annotation setting the maximum accepted client-certificate chain depth.
pub const AUTH_TLS_VERIFY_DEPTH: &str = "ingress.kubernetes.io/auth-tls-verify-depth";

/// Annotation naming the location unauthenticated requests are redirected to.
pub const AUTH_TLS_ERROR_PAGE: &str = "ingress.kubernetes.io/auth-tls-error-page";

/// Chain depth used when the depth annotation is absent, unparseable or zero.
pub const DEFAULT_AUTH_TLS_DEPTH: i32 = 1;

const EMPTY_SECRET_REASON: &str = "an empty string is not a valid secret name";

// ─────────────────────────────────────────────────────────────────────────────
// Extracted configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Client-certificate authentication settings extracted from one rule.
///
/// Only ever constructed as the terminal step of a successful extraction;
/// on any error path the caller sees the error, never a partial value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthTlsConfig {
    /// Trust anchor(s) client certificates are verified against.
    pub cert: AuthSslCert,

    /// Maximum accepted certificate chain length.  Never zero.
    pub validation_depth: i32,

    /// Location unauthenticated requests are redirected to.  May be empty.
    pub error_page: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Extractor
// ─────────────────────────────────────────────────────────────────────────────

/// Extracts [`AuthTlsConfig`] from a rule's annotations.
///
/// Both collaborators are injected: the [`AnnotationReader`] supplies typed
/// access to the untrusted annotation strings, the
/// [`AuthCertificateResolver`] owns certificate state.  The extractor
/// itself is stateless and reentrant.
pub struct AuthTls<R, C> {
    reader: R,
    resolver: C,
}

impl<R, C> AuthTls<R, C>
where
    R: AnnotationReader,
    C: AuthCertificateResolver,
{
    /// Create an extractor from its two collaborators.
    pub fn new(reader: R, resolver: C) -> Self {
        Self { reader, resolver }
    }

    /// Extract the auth-TLS configuration from `ing`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingAnnotation`] / [`Error::InvalidAnnotation`] when
    ///   the secret annotation cannot be read, or the error-page annotation
    ///   fails for a reason other than being absent — reader errors pass
    ///   through unchanged.
    /// - [`Error::InvalidConfiguration`] when the secret reference is empty
    ///   or not `name` / `namespace/name` shaped.
    /// - [`Error::CertificateResolution`] when the resolver fails; the
    ///   resolver's error stays on the cause chain.
    pub fn parse(&self, ing: &Ingress) -> Result<AuthTlsConfig> {
        let secret = self.reader.string(AUTH_TLS_SECRET, ing)?;
        if secret.is_empty() {
            return Err(Error::InvalidConfiguration(EMPTY_SECRET_REASON.to_owned()));
        }

        // Shape check only; the parsed parts are discarded and the raw
        // reference is what the resolver receives.
        if secret_ref::parse_name_namespace(&secret).is_err() {
            return Err(Error::InvalidConfiguration(EMPTY_SECRET_REASON.to_owned()));
        }

        let depth = self
            .reader
            .int(AUTH_TLS_VERIFY_DEPTH, ing)
            .unwrap_or(DEFAULT_AUTH_TLS_DEPTH);
        // Zero means "not specified", never a usable depth.
        let depth = if depth == 0 { DEFAULT_AUTH_TLS_DEPTH } else { depth };

        let cert = self
            .resolver
            .auth_certificate(&secret)
            .map_err(Error::CertificateResolution)?;

        let error_page = match self.reader.string(AUTH_TLS_ERROR_PAGE, ing) {
            Ok(page) => page,
            Err(err) if err.is_missing_annotation() => String::new(),
            Err(err) => return Err(err),
        };

        debug!(secret = %secret, depth, "auth-TLS configuration extracted");

        Ok(AuthTlsConfig {
            cert,
            validation_depth: depth,
            error_page,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
