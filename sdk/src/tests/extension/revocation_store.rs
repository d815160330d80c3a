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
    rfc5652::{
        decode_other_revocation_info, encode_other_revocation_info, RevocationChoiceKind,
        SignedData,
    },
    rfc5940::ID_RI_OCSP_RESPONSE,
    rfc6960::ID_PKIX_OCSP_BASIC,
};
use cades_status_tracker::{extension_codes, StatusTracker};
use rasn::types::{Any, ObjectIdentifier, Oid, SetOf};

use crate::{
    extension::{RevocationProof, RevocationStore},
    tests::fixtures::{
        cert, envelope, ICA_CRL, ROOT_CRL, SIGNED, SIGNER, SIGNER_OCSP_ROOT, TSA_OCSP_ROOT,
    },
    RevocationToken,
};

const UNKNOWN_FORMAT: &Oid = Oid::const_new(&[1, 3, 6, 1, 4, 1, 55555, 9]);

fn proof(token: RevocationToken) -> RevocationProof {
    RevocationProof::new(token, &cert(SIGNER))
}

fn with_entries(entries: Vec<Any>) -> SignedData {
    let mut crls = SetOf::new();
    for entry in entries {
        crls.insert(entry);
    }

    let mut signed_data = envelope(SIGNED).into_signed_data();
    signed_data.crls = Some(crls);
    signed_data
}

fn with_wrapped_response(der: &[u8]) -> SignedData {
    with_entries(vec![
        encode_other_revocation_info(ID_RI_OCSP_RESPONSE, der).unwrap()
    ])
}

#[test]
fn empty_without_crls() {
    let store = RevocationStore::from_signed_data(envelope(SIGNED).signed_data());

    assert!(store.is_empty());
    assert!(store.into_set().is_none());
}

#[test]
fn merge_sorts_by_kind() {
    let mut store = RevocationStore::default();
    let mut tracker = StatusTracker::default();

    let required = [
        proof(RevocationToken::from_crl_der(ROOT_CRL).unwrap()),
        proof(RevocationToken::from_ocsp_der(SIGNER_OCSP_ROOT).unwrap()),
    ];

    assert_eq!(store.merge(&required, &mut tracker).unwrap(), 2);
    assert_eq!(store.crl_count(), 1);
    assert_eq!(store.basic_ocsp_count(), 1);
    assert_eq!(tracker.count_status(extension_codes::REVOCATION_ADDED), 2);

    assert_eq!(store.merge(&required, &mut tracker).unwrap(), 0);
    assert_eq!(tracker.count_status(extension_codes::REVOCATION_EMBEDDED), 2);

    let set = store.into_set().unwrap();
    let formats: Vec<_> = set
        .to_vec()
        .into_iter()
        .filter_map(decode_other_revocation_info)
        .map(|other| other.other_rev_info_format)
        .collect();
    assert_eq!(formats, vec![ObjectIdentifier::from(ID_PKIX_OCSP_BASIC)]);

    let crls: Vec<_> = set
        .to_vec()
        .into_iter()
        .filter(|entry| RevocationChoiceKind::of(entry) == RevocationChoiceKind::Crl)
        .collect();
    assert_eq!(crls, vec![&Any::new(ROOT_CRL.to_vec())]);
}

#[test]
fn reads_crls_without_revoked_certificates() {
    let signed_data = with_entries(vec![
        Any::new(ROOT_CRL.to_vec()),
        Any::new(ICA_CRL.to_vec()),
    ]);

    let mut store = RevocationStore::from_signed_data(&signed_data);
    assert_eq!(store.crl_count(), 2);

    let root_crl = RevocationToken::from_crl_der(ROOT_CRL).unwrap();
    assert!(store.contains(&root_crl.id()));

    let mut tracker = StatusTracker::default();
    assert_eq!(store.merge(&[proof(root_crl)], &mut tracker).unwrap(), 0);

    let set = store.into_set().unwrap();
    assert!(set.contains(&Any::new(ROOT_CRL.to_vec())));
    assert!(set.contains(&Any::new(ICA_CRL.to_vec())));
}

#[test]
fn keeps_wrapped_ocsp_response() {
    let mut store = RevocationStore::from_signed_data(&with_wrapped_response(SIGNER_OCSP_ROOT));
    assert_eq!(store.ocsp_response_count(), 1);

    let wrapped = RevocationToken::from_ocsp_der(SIGNER_OCSP_ROOT).unwrap();
    assert!(store.contains(&wrapped.id()));

    // the same response is not stored a second time as a basic response
    let mut tracker = StatusTracker::default();
    assert_eq!(store.merge(&[proof(wrapped)], &mut tracker).unwrap(), 0);
    assert_eq!(store.basic_ocsp_count(), 0);

    let other = RevocationToken::from_ocsp_der(TSA_OCSP_ROOT).unwrap();
    assert_eq!(store.merge(&[proof(other)], &mut tracker).unwrap(), 1);

    let set = store.into_set().unwrap();
    assert_eq!(set.len(), 2);
    assert!(set
        .to_vec()
        .into_iter()
        .filter_map(decode_other_revocation_info)
        .any(|other| other.other_rev_info_format == ID_RI_OCSP_RESPONSE
            && other.other_rev_info.as_bytes() == SIGNER_OCSP_ROOT));
}

#[test]
fn keeps_unknown_entries() {
    let signed_data = with_entries(vec![
        encode_other_revocation_info(ID_RI_OCSP_RESPONSE, SIGNER_OCSP_ROOT).unwrap(),
        encode_other_revocation_info(UNKNOWN_FORMAT, &[0x05, 0x00]).unwrap(),
    ]);

    let store = RevocationStore::from_signed_data(&signed_data);
    assert_eq!(store.into_set().unwrap().len(), 2);
}
