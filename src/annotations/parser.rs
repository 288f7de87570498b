//! Generic, typed annotation reading.
//!
//! Annotation values arrive as untrusted strings on the resource's
//! metadata.  [`AnnotationReader`] turns "look up key X as type T" into an
//! explicit result-or-error per key, so callers never re-implement
//! best-effort coercion.  The production implementation is
//! [`MetadataReader`]; tests substitute doubles through the trait.

use crate::ingress::Ingress;
use crate::{Error, Result};

/// Prefix shared by every annotation key this crate recognises.
pub const ANNOTATION_PREFIX: &str = "ingress.kubernetes.io";

// ─────────────────────────────────────────────────────────────────────────────
// Reader capability
// ─────────────────────────────────────────────────────────────────────────────

/// Typed, per-key access to a resource's annotation metadata.
pub trait AnnotationReader {
    /// Read the annotation `key` as a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAnnotation`] when the key is absent.
    fn string(&self, key: &str, ing: &Ingress) -> Result<String>;

    /// Read the annotation `key` as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAnnotation`] when the key is absent and
    /// [`Error::InvalidAnnotation`] when the value does not parse.
    fn int(&self, key: &str, ing: &Ingress) -> Result<i32>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Production reader
// ─────────────────────────────────────────────────────────────────────────────

/// Annotation reader backed directly by the resource's metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataReader;

impl AnnotationReader for MetadataReader {
    fn string(&self, key: &str, ing: &Ingress) -> Result<String> {
        ing.annotation(key)
            .map(str::to_owned)
            .ok_or_else(|| Error::missing_annotation(key))
    }

    fn int(&self, key: &str, ing: &Ingress) -> Result<i32> {
        let raw = self.string(key, ing)?;
        raw.parse()
            .map_err(|_| Error::invalid_annotation(key, format!("'{raw}' is not a valid integer")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
