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


//! Computes the certificates and revocation proofs a signature needs.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use cades_crypto::{
    asn1::rfc5652::ContentInfo, time_stamp::signed_data_from_token, CertificateToken,
    RevocationToken, TokenId, TrustAnchors,
};
use cades_status_tracker::{
    extension_codes::{CHAIN_TRUSTED, CHAIN_UNTRUSTED, REVOCATION_NOT_REQUIRED, REVOCATION_UNAVAILABLE},
    log_item, StatusTracker,
};

use crate::{
    envelope::{identifies, SignedEnvelope, SignerInformation},
    verifier::CertificateVerifier,
    Error, Result,
};

/// A revocation proof tagged with the certificate whose status it states.
#[derive(Clone, Debug)]
pub struct RevocationProof {
    token: RevocationToken,
    certificate: TokenId,
}

impl RevocationProof {
    /// A proof of the status of `certificate`.
    pub fn new(token: RevocationToken, certificate: &CertificateToken) -> Self {
        Self {
            token,
            certificate: certificate.id(),
        }
    }

    pub fn token(&self) -> &RevocationToken {
        &self.token
    }

    /// Identifier of the certificate this proof is about.
    pub fn certificate(&self) -> TokenId {
        self.certificate
    }
}

/// The certificates and revocation proofs required to validate the targeted
/// signatures up to a trust anchor.
///
/// A context is computed for a single extension call and discarded
/// afterwards. Answers of the [`CertificateVerifier`] are memoized for the
/// lifetime of the context only.
#[derive(Clone, Debug, Default)]
pub struct ValidationContext {
    certificates: BTreeMap<TokenId, CertificateToken>,
    revocations: BTreeMap<TokenId, RevocationProof>,
}

impl ValidationContext {
    /// Build the context for `signers` of `envelope`.
    ///
    /// Fails with [`Error::ChainBuild`] if a certificate does not chain to
    /// one of `trust_anchors`, and with [`Error::RevocationUnavailable`] if no
    /// revocation proof can be found for a certificate that needs one.
    pub fn build(
        envelope: &SignedEnvelope,
        signers: &[SignerInformation],
        verifier: &dyn CertificateVerifier,
        trust_anchors: &TrustAnchors,
        include_timestamp_validation_data: bool,
        tracker: &mut StatusTracker,
    ) -> Result<Self> {
        if trust_anchors.is_empty() {
            return Err(Error::Configuration("no trust anchors configured".into()));
        }

        let mut builder = ContextBuilder {
            verifier,
            trust_anchors,
            embedded_revocations: envelope.revocation_tokens(),
            selected: HashMap::new(),
            visited: HashSet::new(),
            queue: VecDeque::new(),
            context: ValidationContext::default(),
            tracker,
        };

        for signer in signers {
            let cert = envelope.certificate_for(signer).ok_or_else(|| {
                Error::ChainBuild(format!(
                    "signing certificate of {} is not embedded",
                    signer.label()
                ))
            })?;
            builder.queue.push_back(cert);

            if include_timestamp_validation_data {
                builder
                    .queue
                    .extend(timestamp_signer_certificates(envelope, signer)?);
            }
        }

        builder.run()?;
        Ok(builder.context)
    }

    pub fn certificates(&self) -> impl Iterator<Item = &CertificateToken> {
        self.certificates.values()
    }

    pub fn revocations(&self) -> impl Iterator<Item = &RevocationProof> {
        self.revocations.values()
    }

    pub fn contains_certificate(&self, id: &TokenId) -> bool {
        self.certificates.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty() && self.revocations.is_empty()
    }
}

struct ContextBuilder<'a> {
    verifier: &'a dyn CertificateVerifier,
    trust_anchors: &'a TrustAnchors,
    embedded_revocations: Vec<RevocationToken>,

    // proof chosen for each certificate, per call
    selected: HashMap<TokenId, RevocationToken>,
    visited: HashSet<TokenId>,
    queue: VecDeque<CertificateToken>,

    context: ValidationContext,
    tracker: &'a mut StatusTracker,
}

impl ContextBuilder<'_> {
    fn run(&mut self) -> Result<()> {
        while let Some(cert) = self.queue.pop_front() {
            if !self.visited.insert(cert.id()) {
                continue;
            }

            let chain = self.chain_for(&cert)?;

            for (index, link) in chain.iter().enumerate() {
                let first_seen = self
                    .context
                    .certificates
                    .insert(link.id(), link.clone())
                    .is_none();

                let Some(issuer) = chain.get(index + 1) else {
                    if first_seen {
                        log_item!(link.subject_string(), "trust anchor", "ValidationContext::build")
                            .extension_status(REVOCATION_NOT_REQUIRED)
                            .informational(self.tracker);
                    }
                    break;
                };

                if link.has_ocsp_no_check() {
                    if first_seen {
                        log_item!(
                            link.subject_string(),
                            "OCSP responder certificate with id-pkix-ocsp-nocheck",
                            "ValidationContext::build"
                        )
                        .extension_status(REVOCATION_NOT_REQUIRED)
                        .informational(self.tracker);
                    }
                    continue;
                }

                let proof = self.revocation_for(link, issuer)?;

                // The responder that signed the proof must be verifiable too.
                for responder in proof.embedded_certificates() {
                    self.queue.push_back(responder);
                }

                self.context
                    .revocations
                    .insert(proof.id(), RevocationProof::new(proof, link));
            }
        }

        Ok(())
    }

    /// Chain of `cert`, cut right after the first trusted certificate.
    fn chain_for(&mut self, cert: &CertificateToken) -> Result<Vec<CertificateToken>> {
        let mut chain = self.verifier.build_chain(cert)?;

        if chain.first().map(CertificateToken::id) != Some(cert.id()) {
            chain.insert(0, cert.clone());
        }

        match chain
            .iter()
            .position(|link| self.trust_anchors.is_trusted(link))
        {
            Some(anchor) => chain.truncate(anchor + 1),
            None => {
                let anchor = chain
                    .last()
                    .and_then(|last| self.trust_anchors.issuer_of(last))
                    .cloned();

                match anchor {
                    Some(anchor) => chain.push(anchor),
                    None => {
                        let err = Error::ChainBuild(format!(
                            "{} does not chain to a trust anchor",
                            cert.subject_string()
                        ));
                        return Err(log_item!(
                            cert.subject_string(),
                            "no path to a trust anchor",
                            "ValidationContext::build"
                        )
                        .extension_status(CHAIN_UNTRUSTED)
                        .failure_as_err(self.tracker, err));
                    }
                }
            }
        }

        if let Some(broken) = chain
            .windows(2)
            .find(|pair| !pair[0].is_issued_by(&pair[1]))
        {
            return Err(Error::ChainBuild(format!(
                "{} is not issued by {}",
                broken[0].subject_string(),
                broken[1].subject_string()
            )));
        }

        log_item!(
            cert.subject_string(),
            format!("chain of {} certificate(s) ends at a trust anchor", chain.len()),
            "ValidationContext::build"
        )
        .extension_status(CHAIN_TRUSTED)
        .success(self.tracker);

        Ok(chain)
    }

    /// The proof to embed for `cert`.
    ///
    /// An embedded proof is preferred. Otherwise the verifier is asked once
    /// per certificate and the freshest proof it returns is selected.
    fn revocation_for(
        &mut self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Result<RevocationToken> {
        if let Some(proof) = self.selected.get(&cert.id()) {
            return Ok(proof.clone());
        }

        let proof = match freshest(
            self.embedded_revocations
                .iter()
                .filter(|token| token.covers(cert, issuer)),
        ) {
            Some(embedded) => Some(embedded.clone()),
            None => {
                log::debug!("fetching revocation data for {}", cert.subject_string());
                let fetched = self.verifier.revocation_for(cert, issuer)?;
                freshest(fetched.iter().filter(|token| token.covers(cert, issuer))).cloned()
            }
        };

        let Some(proof) = proof else {
            let err = Error::RevocationUnavailable {
                certificate: cert.subject_string(),
            };
            return Err(log_item!(
                cert.subject_string(),
                "no revocation data could be obtained",
                "ValidationContext::build"
            )
            .extension_status(REVOCATION_UNAVAILABLE)
            .failure_as_err(self.tracker, err));
        };

        self.selected.insert(cert.id(), proof.clone());
        Ok(proof)
    }
}

// latest issue time wins, ties go to the smallest identifier
fn freshest<'a>(tokens: impl Iterator<Item = &'a RevocationToken>) -> Option<&'a RevocationToken> {
    tokens.max_by(|a, b| {
        a.issued_at()
            .cmp(&b.issued_at())
            .then_with(|| b.id().cmp(&a.id()))
    })
}

/// Signing certificates of the signature time-stamp tokens of `signer`.
fn timestamp_signer_certificates(
    envelope: &SignedEnvelope,
    signer: &SignerInformation,
) -> Result<Vec<CertificateToken>> {
    let mut certs = vec![];

    for token_der in signer.signature_timestamp_tokens() {
        let content_info = rasn::der::decode::<ContentInfo>(&token_der)?;
        let token = SignedEnvelope::from_signed_data(signed_data_from_token(&content_info)?)?;

        let pool: Vec<CertificateToken> = token
            .certificates()
            .into_iter()
            .chain(envelope.certificates())
            .collect();

        for tsa_signer in token.signers() {
            let cert = pool
                .iter()
                .find(|cert| identifies(&tsa_signer.info().sid, cert))
                .ok_or_else(|| {
                    Error::ChainBuild("time-stamp signing certificate is not embedded".into())
                })?;
            certs.push(cert.clone());
        }
    }

    Ok(certs)
}
