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


use cades_status_tracker::{extension_codes, StatusTracker};

use crate::{
    extension::{regenerate, RevocationProof, RevocationStore},
    tests::fixtures::{
        cert, envelope, timestamped_envelope, trust_anchors, verifier, OCSP_RESPONDER, ROOT,
        ROOT_CRL, SIGNED, SIGNER, SIGNER_OCSP_RESPONDER, SIGNER_OCSP_ROOT, TSA, TSA_OCSP_ROOT,
        UNTRUSTED_ROOT,
    },
    CertificateToken, Error, RevocationKind, RevocationToken, SignedEnvelope, TrustAnchors,
    ValidationContext,
};

fn build(
    envelope: &SignedEnvelope,
    ocsp: &[&[u8]],
    crls: &[&[u8]],
    include_timestamp_validation_data: bool,
    tracker: &mut StatusTracker,
) -> crate::Result<ValidationContext> {
    let signers = envelope.signers();
    let verifier = verifier(&[], ocsp, crls);

    ValidationContext::build(
        envelope,
        &signers,
        &verifier,
        &trust_anchors(),
        include_timestamp_validation_data,
        tracker,
    )
}

fn ids(certs: &[&[u8]]) -> Vec<crate::TokenId> {
    let mut ids: Vec<_> = certs.iter().map(|der| cert(der).id()).collect();
    ids.sort();
    ids
}

fn context_ids(context: &ValidationContext) -> Vec<crate::TokenId> {
    context.certificates().map(CertificateToken::id).collect()
}

#[test]
fn signer_chain_and_proof() {
    let mut tracker = StatusTracker::default();
    let context = build(
        &timestamped_envelope(),
        &[SIGNER_OCSP_ROOT],
        &[],
        false,
        &mut tracker,
    )
    .unwrap();

    assert_eq!(context_ids(&context), ids(&[SIGNER, ROOT]));

    let proofs: Vec<&RevocationProof> = context.revocations().collect();
    assert_eq!(proofs.len(), 1);
    assert_eq!(proofs[0].certificate(), cert(SIGNER).id());
    assert_eq!(proofs[0].token().kind(), RevocationKind::Ocsp);

    assert!(tracker.has_status(extension_codes::CHAIN_TRUSTED));
    // the root needs no proof
    assert_eq!(
        tracker.count_status(extension_codes::REVOCATION_NOT_REQUIRED),
        1
    );
}

#[test]
fn freshest_proof_wins() {
    let context = build(
        &timestamped_envelope(),
        &[SIGNER_OCSP_ROOT],
        &[ROOT_CRL],
        false,
        &mut StatusTracker::default(),
    )
    .unwrap();

    let proofs: Vec<&RevocationProof> = context.revocations().collect();
    assert_eq!(proofs.len(), 1);
    assert_eq!(proofs[0].token().kind(), RevocationKind::Ocsp);
}

#[test]
fn responder_certificate_is_included() {
    let mut tracker = StatusTracker::default();
    let context = build(
        &timestamped_envelope(),
        &[SIGNER_OCSP_RESPONDER],
        &[],
        false,
        &mut tracker,
    )
    .unwrap();

    assert_eq!(context_ids(&context), ids(&[SIGNER, ROOT, OCSP_RESPONDER]));
    // the responder carries id-pkix-ocsp-nocheck
    assert_eq!(context.revocations().count(), 1);
    assert_eq!(
        tracker.count_status(extension_codes::REVOCATION_NOT_REQUIRED),
        2
    );
}

#[test]
fn embedded_proof_is_reused() {
    let timestamped = timestamped_envelope();
    let signed_data = timestamped.signed_data();

    let mut store = RevocationStore::default();
    store
        .merge(
            &[RevocationProof::new(
                RevocationToken::from_ocsp_der(SIGNER_OCSP_ROOT).unwrap(),
                &cert(SIGNER),
            )],
            &mut StatusTracker::default(),
        )
        .unwrap();
    let with_proof = regenerate(
        &timestamped,
        &[],
        signed_data.certificates.clone(),
        store.into_set(),
        &mut StatusTracker::default(),
    )
    .unwrap();

    // nothing to fetch: the verifier pool is empty
    let context = build(&with_proof, &[], &[], false, &mut StatusTracker::default()).unwrap();

    assert_eq!(context.revocations().count(), 1);
    assert!(context.contains_certificate(&cert(SIGNER).id()));
}

#[test]
fn missing_revocation_fails() {
    let mut tracker = StatusTracker::default();
    let result = build(&timestamped_envelope(), &[], &[], false, &mut tracker);

    assert!(matches!(
        result,
        Err(Error::RevocationUnavailable { certificate }) if certificate.contains("CAdES Test Signer")
    ));
    assert!(tracker.has_status(extension_codes::REVOCATION_UNAVAILABLE));
}

#[test]
fn untrusted_chain_fails() {
    let mut anchors = TrustAnchors::new();
    anchors.add_trust_anchor_der(UNTRUSTED_ROOT).unwrap();

    let envelope = timestamped_envelope();
    let mut tracker = StatusTracker::default();

    let result = ValidationContext::build(
        &envelope,
        &envelope.signers(),
        &verifier(&[], &[SIGNER_OCSP_ROOT], &[]),
        &anchors,
        false,
        &mut tracker,
    );

    assert!(matches!(result, Err(Error::ChainBuild(_))));
    assert!(tracker.has_status(extension_codes::CHAIN_UNTRUSTED));
}

#[test]
fn requires_trust_anchors() {
    let envelope = envelope(SIGNED);

    let result = ValidationContext::build(
        &envelope,
        &envelope.signers(),
        &verifier(&[], &[], &[]),
        &TrustAnchors::new(),
        false,
        &mut StatusTracker::default(),
    );

    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn time_stamp_validation_data() {
    let envelope = timestamped_envelope();

    let without = build(
        &envelope,
        &[SIGNER_OCSP_ROOT, TSA_OCSP_ROOT],
        &[],
        false,
        &mut StatusTracker::default(),
    )
    .unwrap();
    assert!(!without.contains_certificate(&cert(TSA).id()));

    let with = build(
        &envelope,
        &[SIGNER_OCSP_ROOT, TSA_OCSP_ROOT],
        &[],
        true,
        &mut StatusTracker::default(),
    )
    .unwrap();
    assert_eq!(context_ids(&with), ids(&[SIGNER, ROOT, TSA]));
    assert_eq!(with.revocations().count(), 2);
}
