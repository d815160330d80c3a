// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.


use std::collections::{BTreeMap, HashSet};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use x509_parser::pem::Pem;

use crate::{hash::sha256, CertificateToken, TokenId};

/// The set of certificates that terminate chain building.
///
/// Trust is granted either to a trust anchor (typically a root CA) or to an
/// individually pinned end-entity certificate, identified by the base64
/// encoding of the SHA-256 hash of its DER encoding.
#[derive(Clone, Debug, Default)]
pub struct TrustAnchors {
    anchors: BTreeMap<TokenId, CertificateToken>,
    end_entity_cert_set: HashSet<String>,
}

impl TrustAnchors {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add trust anchors from a PEM bundle.
    ///
    /// JSON-escaped line breaks (`\n`) are accepted.
    pub fn add_trust_anchors(&mut self, trust_anchor_pems: &[u8]) -> Result<(), TrustAnchorError> {
        let trust_anchor_pems = String::from_utf8_lossy(trust_anchor_pems)
            .replace("\\n", "\n")
            .into_bytes();

        for maybe_pem in Pem::iter_from_buffer(&trust_anchor_pems) {
            // `contents` holds the decoded DER.
            let pem = maybe_pem.map_err(|e| TrustAnchorError::InvalidPem(e.to_string()))?;
            self.add_trust_anchor_der(&pem.contents)?;
        }

        Ok(())
    }

    /// Add a single DER-encoded trust anchor.
    pub fn add_trust_anchor_der(&mut self, der: &[u8]) -> Result<(), TrustAnchorError> {
        let anchor = CertificateToken::from_der(der)
            .map_err(|e| TrustAnchorError::InvalidCertificate(e.to_string()))?;
        self.add_trust_anchor(anchor);
        Ok(())
    }

    /// Add a decoded trust anchor.
    pub fn add_trust_anchor(&mut self, anchor: CertificateToken) {
        self.anchors.insert(anchor.id(), anchor);
    }

    /// Pin end-entity certificates.
    ///
    /// Accepts a PEM bundle and/or lines holding the base64 encoding of the
    /// SHA-256 hash of a certificate's DER encoding.
    pub fn add_end_entity_credentials(
        &mut self,
        end_entity_cert_pems: &[u8],
    ) -> Result<(), TrustAnchorError> {
        let mut inside_cert_block = false;

        for line in String::from_utf8_lossy(end_entity_cert_pems).lines() {
            let line = line.trim();
            if line.contains("-----BEGIN") {
                inside_cert_block = true;
            }
            if line.contains("-----END") {
                inside_cert_block = false;
                continue;
            }

            if !inside_cert_block && line.len() == 44 && STANDARD.decode(line).is_ok() {
                self.end_entity_cert_set.insert(line.to_string());
            }
        }

        for maybe_pem in Pem::iter_from_buffer(end_entity_cert_pems) {
            let pem = maybe_pem.map_err(|e| TrustAnchorError::InvalidPem(e.to_string()))?;
            self.end_entity_cert_set
                .insert(base64_sha256_cert_der(&pem.contents));
        }

        Ok(())
    }

    /// Returns `true` if no anchor and no pinned certificate is configured.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.end_entity_cert_set.is_empty()
    }

    /// Number of trust anchors (pinned end-entity certificates excluded).
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Iterate the trust anchors in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &CertificateToken> {
        self.anchors.values()
    }

    /// Returns `true` if `cert` terminates chain building.
    ///
    /// That is the case when it is one of the anchors, certifies the same key
    /// for the same subject as one of them, or is a pinned end-entity
    /// certificate.
    pub fn is_trusted(&self, cert: &CertificateToken) -> bool {
        self.anchors.contains_key(&cert.id())
            || self
                .anchors
                .values()
                .any(|anchor| anchor.has_same_subject_and_key(cert))
            || self
                .end_entity_cert_set
                .contains(&base64_sha256_cert_der(cert.der()))
    }

    /// Returns the anchor that issued `cert`, if any.
    pub fn issuer_of(&self, cert: &CertificateToken) -> Option<&CertificateToken> {
        self.anchors
            .values()
            .find(|anchor| anchor.id() != cert.id() && cert.is_issued_by(anchor))
    }
}

fn base64_sha256_cert_der(cert_der: &[u8]) -> String {
    STANDARD.encode(sha256(cert_der))
}

/// Describes errors that can occur when loading trust anchors.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum TrustAnchorError {
    /// The PEM bundle could not be parsed.
    #[error("invalid PEM data: {0}")]
    InvalidPem(String),

    /// A certificate in the bundle could not be decoded.
    #[error("invalid trust anchor certificate: {0}")]
    InvalidCertificate(String),
}
