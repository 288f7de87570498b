//! Mutual-TLS authentication annotation extraction for ingress rules.
//!
//! Given a routing rule's annotations and a pluggable certificate
//! resolver, derives a validated client-certificate authentication
//! configuration: which trust-anchor bundle to verify against, how deep to
//! walk the presented chain, and where to redirect on failure.
//!
//! # Features
//!
//! - **Typed annotation reading**: absent and malformed values are
//!   distinct, explicit errors — no best-effort coercion
//! - **Injected collaborators**: annotation reader and certificate
//!   resolver are capability traits, substitutable with test doubles
//! - **Deterministic pipeline**: five sequential validation gates, each
//!   short-circuiting the rest; no retries, no caching, no shared state
//!
//! # Example
//!
//! ```no_run
//! use ingress_authtls::{AuthTls, FileCertResolver, MetadataReader};
//! use ingress_authtls::ingress::Ingress;
//!
//! let mut resolver = FileCertResolver::new();
//! resolver.register("prod/client-ca", "/etc/certs/client-ca.pem");
//!
//! let extractor = AuthTls::new(MetadataReader, resolver);
//! let ing: Ingress = serde_yaml::from_str(r#"
//! metadata:
//!   name: web
//!   namespace: prod
//!   annotations:
//!     ingress.kubernetes.io/auth-tls-secret: "prod/client-ca"
//! "#).unwrap();
//!
//! let config = extractor.parse(&ing).unwrap();
//! assert_eq!(config.validation_depth, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod annotations;
pub mod error;
pub mod ingress;
pub mod resolver;
pub mod secret_ref;

pub use annotations::auth_tls::{AuthTls, AuthTlsConfig};
pub use annotations::parser::{AnnotationReader, MetadataReader};
pub use error::{Error, Result};
pub use resolver::{AuthCertificateResolver, AuthSslCert, FileCertResolver};
