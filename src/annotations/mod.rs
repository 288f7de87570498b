//! Annotation extraction for ingress rules.
//!
//! Rules carry extended configuration as string-keyed annotation metadata.
//! This module turns that untrusted metadata into validated, typed
//! configuration values.
//!
//! # Architecture
//!
//! ```text
//! Ingress rule (annotations map)
//!   → AnnotationReader   (typed per-key lookup: string / int)
//!   → AuthTls::parse     (validation gates, defaulting)
//!   → AuthCertificateResolver  (secret reference → certificate handle)
//!   → AuthTlsConfig      (consumed by the proxy-configuration pipeline)
//! ```
//!
//! # Modules
//!
//! - [`parser`] — generic typed annotation reading (`AnnotationReader`)
//! - [`auth_tls`] — mutual-TLS authentication extraction (`AuthTls`)

pub mod auth_tls;
pub mod parser;

pub use auth_tls::{
    AUTH_TLS_ERROR_PAGE, AUTH_TLS_SECRET, AUTH_TLS_VERIFY_DEPTH, AuthTls, AuthTlsConfig,
    DEFAULT_AUTH_TLS_DEPTH,
};
pub use parser::{ANNOTATION_PREFIX, AnnotationReader, MetadataReader};
