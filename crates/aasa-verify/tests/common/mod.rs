//! Shared fixtures for integration tests.

#![allow(dead_code)]

use aasa_verify::{EnvelopeError, EnvelopeVerifier};
use async_trait::async_trait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MANIFEST_ARRAY: &str = r#"{
  "applinks": {
    "apps": [],
    "details": [
      { "appID": "TEAMID.com.foo.App", "paths": ["*"] }
    ]
  }
}"#;

pub const MANIFEST_MAP: &str = r#"{
  "applinks": {
    "apps": [],
    "details": {
      "TEAMID.com.foo.App": { "paths": ["/buy/*", "NOT /buy/old/*"] }
    }
  }
}"#;

/// Verifier that unwraps a fake envelope: `SIGNED:` followed by the payload.
#[derive(Debug, Default)]
pub struct PrefixVerifier;

pub const FAKE_ENVELOPE_PREFIX: &[u8] = b"SIGNED:";

pub fn fake_envelope(payload: &[u8]) -> Vec<u8> {
    let mut out = FAKE_ENVELOPE_PREFIX.to_vec();
    out.extend_from_slice(payload);
    out
}

#[async_trait]
impl EnvelopeVerifier for PrefixVerifier {
    async fn verify_envelope(&self, envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        envelope
            .strip_prefix(FAKE_ENVELOPE_PREFIX)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| EnvelopeError::Verification("not a signed envelope".to_string()))
    }
}

/// Serve `body` with `content_type` at the manifest path.
pub async fn serve_manifest(server: &MockServer, status: u16, body: Vec<u8>, content_type: &str) {
    Mock::given(method("GET"))
        .and(path("/apple-app-site-association"))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

#[cfg(feature = "openssl")]
pub fn signed_envelope(payload: &[u8]) -> Vec<u8> {
    use openssl::asn1::Asn1Time;
    use openssl::bn::BigNum;
    use openssl::hash::MessageDigest;
    use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
    use openssl::pkey::PKey;
    use openssl::rsa::Rsa;
    use openssl::stack::Stack;
    use openssl::x509::{X509Builder, X509NameBuilder, X509};

    let pkey = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "app-site-association.test")
        .unwrap();
    let name = name.build();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(7).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&pkey).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(1).unwrap())
        .unwrap();
    builder.sign(&pkey, MessageDigest::sha256()).unwrap();
    let cert = builder.build();

    let chain = Stack::<X509>::new().unwrap();
    Pkcs7::sign(&cert, &pkey, &chain, payload, Pkcs7Flags::BINARY)
        .unwrap()
        .to_der()
        .unwrap()
}
