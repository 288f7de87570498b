//! End-to-end auth-TLS extraction tests
//!
//! Exercises the full pipeline against real PEM bundles on disk:
//! - Complete annotation sets and minimal ones (defaulting rules)
//! - The error taxonomy: missing/empty/malformed secret references,
//!   resolver failures with preserved cause chains
//! - The guarantee that the resolver is never consulted for a reference
//!   that failed validation

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use ingress_authtls::annotations::{
    AUTH_TLS_ERROR_PAGE, AUTH_TLS_SECRET, AUTH_TLS_VERIFY_DEPTH,
};
use ingress_authtls::ingress::Ingress;
use ingress_authtls::resolver::ResolverError;
use ingress_authtls::{
    AuthCertificateResolver, AuthSslCert, AuthTls, Error, FileCertResolver, MetadataReader,
};

/// Generate a self-signed certificate PEM for test fixtures.
fn make_cert_pem(cn: &str) -> String {
    use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};

    let mut params = CertificateParams::default();
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, cn);
    params.distinguished_name = dn;

    let key_pair = KeyPair::generate().expect("key generation failed");
    params
        .self_signed(&key_pair)
        .expect("cert generation failed")
        .pem()
}

/// Build an ingress rule from a list of annotation key/value pairs.
fn ingress(annotations: &[(&str, &str)]) -> Ingress {
    let mut ing = Ingress::default();
    for (k, v) in annotations {
        ing.metadata
            .annotations
            .insert((*k).to_owned(), (*v).to_owned());
    }
    ing
}

/// A resolver double that counts invocations and always fails.
struct CountingResolver {
    calls: Rc<Cell<usize>>,
}

impl AuthCertificateResolver for CountingResolver {
    fn auth_certificate(&self, _secret_ref: &str) -> Result<AuthSslCert, ResolverError> {
        self.calls.set(self.calls.get() + 1);
        Err("resolver should not have been reached".into())
    }
}

/// Full annotation set against a real PEM file: every field lands in the
/// extracted configuration.
#[test]
fn extracts_complete_configuration_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let pem_path = dir.path().join("client-ca.pem");
    std::fs::write(&pem_path, make_cert_pem("client-ca")).unwrap();

    let mut resolver = FileCertResolver::new();
    resolver.register("ns1/mycert", &pem_path);

    let extractor = AuthTls::new(MetadataReader, resolver);
    let ing = ingress(&[
        (AUTH_TLS_SECRET, "ns1/mycert"),
        (AUTH_TLS_VERIFY_DEPTH, "3"),
        (AUTH_TLS_ERROR_PAGE, "/403.html"),
    ]);

    let config = extractor.parse(&ing).unwrap();

    assert_eq!(config.cert.secret, "ns1/mycert");
    assert_eq!(config.cert.pem_file_name, pem_path.display().to_string());
    assert_eq!(config.cert.pem_sha.len(), 64, "hex SHA-256 fingerprint");
    assert_eq!(config.validation_depth, 3);
    assert_eq!(config.error_page, "/403.html");
}

/// Secret-only rule: depth defaults to 1, error page to the empty string.
#[test]
fn minimal_rule_gets_documented_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let pem_path = dir.path().join("ca.pem");
    std::fs::write(&pem_path, make_cert_pem("ca")).unwrap();

    let mut resolver = FileCertResolver::new();
    resolver.register("mycert", &pem_path);

    let extractor = AuthTls::new(MetadataReader, resolver);
    let config = extractor
        .parse(&ingress(&[(AUTH_TLS_SECRET, "mycert")]))
        .unwrap();

    assert_eq!(config.validation_depth, 1);
    assert_eq!(config.error_page, "");
}

/// The rule can arrive as a YAML manifest, the natural wire format.
#[test]
fn extracts_from_yaml_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let pem_path = dir.path().join("ca.pem");
    std::fs::write(&pem_path, make_cert_pem("ca")).unwrap();

    let mut resolver = FileCertResolver::new();
    resolver.register("prod/client-ca", &pem_path);

    let ing: Ingress = serde_yaml::from_str(
        r#"
metadata:
  name: web
  namespace: prod
  annotations:
    ingress.kubernetes.io/auth-tls-secret: "prod/client-ca"
    ingress.kubernetes.io/auth-tls-verify-depth: "2"
"#,
    )
    .unwrap();

    let config = AuthTls::new(MetadataReader, resolver).parse(&ing).unwrap();
    assert_eq!(config.validation_depth, 2);
    assert_eq!(config.cert.secret, "prod/client-ca");
}

/// A rule without the secret annotation fails with the reader's missing-key
/// error, untouched.
#[test]
fn missing_secret_annotation_fails_before_resolution() {
    let calls = Rc::new(Cell::new(0));
    let extractor = AuthTls::new(
        MetadataReader,
        CountingResolver {
            calls: Rc::clone(&calls),
        },
    );

    let err = extractor.parse(&ingress(&[])).unwrap_err();

    assert!(err.is_missing_annotation());
    assert_eq!(calls.get(), 0);
}

/// Empty and malformed secret references fail identically, and the
/// resolver is never invoked for either.
#[test]
fn invalid_secret_references_never_reach_the_resolver() {
    for bad in ["", "a/b/c", "Upper/cert", "ns//cert"] {
        let calls = Rc::new(Cell::new(0));
        let extractor = AuthTls::new(
            MetadataReader,
            CountingResolver {
                calls: Rc::clone(&calls),
            },
        );

        let err = extractor
            .parse(&ingress(&[(AUTH_TLS_SECRET, bad)]))
            .unwrap_err();

        assert!(
            matches!(err, Error::InvalidConfiguration(_)),
            "reference {bad:?}"
        );
        assert_eq!(
            err.to_string(),
            "an empty string is not a valid secret name",
            "reference {bad:?}"
        );
        assert_eq!(calls.get(), 0, "resolver invoked for {bad:?}");
    }
}

/// Depth annotation edge cases: absent, unparseable and zero all collapse
/// to the default; any other integer, negative included, passes through.
#[test]
fn verify_depth_defaulting_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let pem_path = dir.path().join("ca.pem");
    std::fs::write(&pem_path, make_cert_pem("ca")).unwrap();

    let cases = [
        (None, 1),
        (Some("0"), 1),
        (Some("not-a-number"), 1),
        (Some("3"), 3),
        (Some("-2"), -2),
    ];

    for (raw, expected) in cases {
        let mut resolver = FileCertResolver::new();
        resolver.register("cert", &pem_path);

        let mut annotations = vec![(AUTH_TLS_SECRET, "cert")];
        if let Some(raw) = raw {
            annotations.push((AUTH_TLS_VERIFY_DEPTH, raw));
        }

        let config = AuthTls::new(MetadataReader, resolver)
            .parse(&ingress(&annotations))
            .unwrap();

        assert_eq!(config.validation_depth, expected, "depth {raw:?}");
    }
}

/// A resolver failure for a well-formed reference surfaces as a wrapped
/// error with the original cause still on the chain.
#[test]
fn resolver_failure_keeps_cause_inspectable() {
    // Nothing registered, so resolution fails for a valid reference.
    let resolver = FileCertResolver::new();
    let extractor = AuthTls::new(MetadataReader, resolver);

    let err = extractor
        .parse(&ingress(&[(AUTH_TLS_SECRET, "ns/unknown")]))
        .unwrap_err();

    assert!(matches!(err, Error::CertificateResolution(_)));
    assert_eq!(err.to_string(), "error obtaining certificate");

    let source = std::error::Error::source(&err).expect("cause must be preserved");
    assert!(source.to_string().contains("no certificate registered"));
}

/// The extracted configuration serialises with the downstream pipeline's
/// camelCase field names.
#[test]
fn configuration_serialises_for_the_proxy_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let pem_path = dir.path().join("ca.pem");
    std::fs::write(&pem_path, make_cert_pem("ca")).unwrap();

    let mut resolver = FileCertResolver::new();
    resolver.register("ns/ca", &pem_path);

    let config = AuthTls::new(MetadataReader, resolver)
        .parse(&ingress(&[
            (AUTH_TLS_SECRET, "ns/ca"),
            (AUTH_TLS_VERIFY_DEPTH, "2"),
        ]))
        .unwrap();

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["validationDepth"], 2);
    assert_eq!(json["errorPage"], "");
    assert_eq!(json["cert"]["secret"], "ns/ca");
    assert_eq!(json["cert"]["pemSha"].as_str().unwrap().len(), 64);
}
