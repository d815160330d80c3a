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

use cades_crypto::{CertificateToken, RevocationToken, TokenId, TrustAnchors};

use crate::{verifier::CertificateVerifier, Error, Result};

// chains longer than this are treated as loops
const MAX_CHAIN_LENGTH: usize = 16;

/// A [`CertificateVerifier`] answering from material known in advance.
///
/// Chains are built from a pool of certificates plus the trust anchors,
/// following issuer names and key identifiers. Revocation proofs are looked
/// up in a pool of CRLs and OCSP responses.
#[derive(Clone, Debug, Default)]
pub struct OfflineCertificateVerifier {
    trust_anchors: TrustAnchors,
    certificates: BTreeMap<TokenId, CertificateToken>,
    revocations: BTreeMap<TokenId, RevocationToken>,
}

impl OfflineCertificateVerifier {
    pub fn new(trust_anchors: TrustAnchors) -> Self {
        Self {
            trust_anchors,
            ..Default::default()
        }
    }

    pub fn add_certificate(&mut self, cert: CertificateToken) {
        self.certificates.insert(cert.id(), cert);
    }

    /// Add a DER-encoded certificate to the pool.
    pub fn add_certificate_der(&mut self, der: &[u8]) -> Result<()> {
        self.add_certificate(CertificateToken::from_der(der)?);
        Ok(())
    }

    pub fn add_revocation(&mut self, token: RevocationToken) {
        self.revocations.insert(token.id(), token);
    }

    /// Add a DER-encoded CRL to the pool.
    pub fn add_crl_der(&mut self, der: &[u8]) -> Result<()> {
        self.add_revocation(RevocationToken::from_crl_der(der)?);
        Ok(())
    }

    /// Add a DER-encoded OCSP response (full or basic) to the pool.
    pub fn add_ocsp_der(&mut self, der: &[u8]) -> Result<()> {
        self.add_revocation(RevocationToken::from_ocsp_der(der)?);
        Ok(())
    }

    fn issuer_of(&self, cert: &CertificateToken) -> Option<&CertificateToken> {
        self.trust_anchors.issuer_of(cert).or_else(|| {
            self.certificates
                .values()
                .find(|candidate| candidate.id() != cert.id() && cert.is_issued_by(candidate))
        })
    }
}

impl CertificateVerifier for OfflineCertificateVerifier {
    fn build_chain(&self, cert: &CertificateToken) -> Result<Vec<CertificateToken>> {
        let mut chain = vec![cert.clone()];
        let mut seen = HashSet::from([cert.id()]);
        let mut current = cert.clone();

        while !self.trust_anchors.is_trusted(&current) {
            if chain.len() >= MAX_CHAIN_LENGTH {
                return Err(Error::ChainBuild(format!(
                    "chain of {} is too long",
                    cert.subject_string()
                )));
            }

            let Some(issuer) = self.issuer_of(&current) else {
                // The caller decides whether an incomplete chain is acceptable.
                break;
            };

            if !seen.insert(issuer.id()) {
                break;
            }

            chain.push(issuer.clone());
            current = issuer.clone();
        }

        Ok(chain)
    }

    fn revocation_for(
        &self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Result<Vec<RevocationToken>> {
        Ok(self
            .revocations
            .values()
            .filter(|token| token.covers(cert, issuer))
            .cloned()
            .collect())
    }
}
