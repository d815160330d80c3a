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


use cades_crypto::asn1::{
    rfc3161::ID_AA_SIGNATURE_TIME_STAMP_TOKEN,
    rfc5652::{RevocationChoiceKind, RevocationInfoChoices},
};
use cades_status_tracker::{extension_codes, StatusTracker};
use rasn::types::{Any, Integer, OctetString, SetOf};

use crate::{
    extension::{
        regenerate, CertificateStore, RevocationProof, RevocationStore, SignerReplacement,
    },
    tests::fixtures::{
        cert, envelope, ROOT_CRL, SIGNED, SIGNED_TWO_SIGNERS, SIGNER, SIGNER_OCSP_ROOT,
    },
    Error, RevocationToken, SignedEnvelope, SignerInformation,
};

fn stamped(signer: &SignerInformation) -> SignerInformation {
    signer.with_unsigned_attribute(ID_AA_SIGNATURE_TIME_STAMP_TOKEN, vec![0x05, 0x00])
}

fn crls_with(token: RevocationToken) -> Option<RevocationInfoChoices> {
    let mut store = RevocationStore::default();
    store
        .merge(
            &[RevocationProof::new(token, &cert(SIGNER))],
            &mut StatusTracker::default(),
        )
        .unwrap();
    store.into_set()
}

#[test]
fn replaces_signer_and_keeps_the_rest() {
    let original = envelope(SIGNED_TWO_SIGNERS);
    let signers = original.signers();
    let last = signers.last().unwrap();

    let mut tracker = StatusTracker::default();
    let regenerated = regenerate(
        &original,
        &[SignerReplacement {
            original: last.clone(),
            updated: stamped(last),
        }],
        original.signed_data().certificates.clone(),
        None,
        &mut tracker,
    )
    .unwrap();

    let updated = regenerated.signers();
    assert_eq!(updated.len(), 2);

    let first = updated
        .iter()
        .find(|s| s.signature_value() == signers[0].signature_value())
        .unwrap();
    assert_eq!(first.to_der().unwrap(), signers[0].to_der().unwrap());

    let replaced = updated
        .iter()
        .find(|s| s.signature_value() == last.signature_value())
        .unwrap();
    assert!(replaced.has_signature_timestamp());

    assert_eq!(
        regenerated.signed_data().encap_content_info,
        original.signed_data().encap_content_info
    );
    assert_eq!(
        regenerated.signed_data().digest_algorithms,
        original.signed_data().digest_algorithms
    );
    assert!(tracker.has_status(extension_codes::ENVELOPE_REGENERATED));
}

#[test]
fn rejects_modified_signature() {
    let original = envelope(SIGNED);
    let signer = original.signers().pop().unwrap();

    let mut info = signer.info().clone();
    info.signature = OctetString::from(vec![0u8; 8]);

    let mut tracker = StatusTracker::default();
    let result = regenerate(
        &original,
        &[SignerReplacement {
            original: signer,
            updated: SignerInformation::new(info),
        }],
        None,
        None,
        &mut tracker,
    );

    assert!(matches!(result, Err(Error::SignatureModified)));
    assert!(tracker.has_status(extension_codes::SIGNATURE_MODIFIED));
}

#[test]
fn rejects_foreign_signer() {
    let original = envelope(SIGNED);
    let foreign = envelope(SIGNED_TWO_SIGNERS).signers().pop().unwrap();

    let result = regenerate(
        &original,
        &[SignerReplacement {
            original: foreign.clone(),
            updated: stamped(&foreign),
        }],
        None,
        None,
        &mut StatusTracker::default(),
    );

    assert!(matches!(result, Err(Error::Encoding(_))));
}

#[test]
fn version_follows_stores() {
    let original = envelope(SIGNED);
    let certificates = original.signed_data().certificates.clone();

    let version = |crls| {
        regenerate(
            &original,
            &[],
            certificates.clone(),
            crls,
            &mut StatusTracker::default(),
        )
        .unwrap()
        .signed_data()
        .version
        .clone()
    };

    assert_eq!(version(None), Integer::from(1i64));

    let crl = crls_with(RevocationToken::from_crl_der(ROOT_CRL).unwrap());
    assert_eq!(version(crl), Integer::from(1i64));

    // OCSP responses live in `OtherRevocationInfoFormat` entries
    let ocsp = crls_with(RevocationToken::from_ocsp_der(SIGNER_OCSP_ROOT).unwrap());
    assert!(ocsp
        .iter()
        .flat_map(SetOf::to_vec)
        .all(|entry| RevocationChoiceKind::of(entry) == RevocationChoiceKind::Other));
    assert_eq!(version(ocsp), Integer::from(5i64));
}

#[test]
fn embedded_crl_without_entries_is_carried_over() {
    let mut crls = SetOf::new();
    crls.insert(Any::new(ROOT_CRL.to_vec()));

    let mut signed_data = envelope(SIGNED).into_signed_data();
    signed_data.crls = Some(crls);
    let original = SignedEnvelope::from_signed_data(signed_data).unwrap();
    let original = SignedEnvelope::from_der(&original.to_der().unwrap()).unwrap();

    let regenerated = regenerate(
        &original,
        &[],
        CertificateStore::from_signed_data(original.signed_data()).into_set(),
        RevocationStore::from_signed_data(original.signed_data()).into_set(),
        &mut StatusTracker::default(),
    )
    .unwrap();

    let crls: Vec<Vec<u8>> = regenerated
        .revocation_tokens()
        .iter()
        .map(|token| token.der().to_vec())
        .collect();
    assert_eq!(crls, vec![ROOT_CRL.to_vec()]);
    assert_eq!(
        regenerated.to_der().unwrap(),
        original.to_der().unwrap()
    );
}
