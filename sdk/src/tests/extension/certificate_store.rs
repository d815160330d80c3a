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
use rasn::types::Any;

use crate::{
    extension::CertificateStore,
    tests::fixtures::{cert, envelope, ROOT, SIGNED, SIGNER, TSA},
};

#[test]
fn reads_embedded_certificates() {
    let store = CertificateStore::from_signed_data(envelope(SIGNED).signed_data());

    assert_eq!(store.len(), 1);
    assert!(store.contains(&cert(SIGNER).id()));
    assert!(store.others().is_empty());
}

#[test]
fn merge_adds_only_missing() {
    let mut store = CertificateStore::from_signed_data(envelope(SIGNED).signed_data());
    let mut tracker = StatusTracker::default();

    let required = [cert(SIGNER), cert(ROOT), cert(ROOT)];
    assert_eq!(store.merge(&required, &mut tracker), 1);
    assert_eq!(store.len(), 2);

    assert_eq!(tracker.count_status(extension_codes::CERTIFICATE_ADDED), 1);
    assert_eq!(tracker.count_status(extension_codes::CERTIFICATE_EMBEDDED), 2);

    // merging again is a no-op
    assert_eq!(store.merge(&required, &mut tracker), 0);
    assert_eq!(store.len(), 2);
}

#[test]
fn set_holds_union() {
    let mut store = CertificateStore::from_signed_data(envelope(SIGNED).signed_data());
    store.merge(&[cert(ROOT), cert(TSA)], &mut StatusTracker::default());

    let set = store.into_set().unwrap();
    assert_eq!(set.len(), 3);
}

#[test]
fn empty_store_has_no_set() {
    let store = CertificateStore::default();

    assert!(store.is_empty());
    assert!(store.into_set().is_none());
}

#[test]
fn other_formats_are_carried_as_read() {
    // `[3] OtherCertificateFormat` with an arbitrary OID and a NULL value
    let other = Any::new(vec![0xa3, 0x07, 0x06, 0x03, 0x2a, 0x03, 0x04, 0x05, 0x00]);

    let mut signed_data = envelope(SIGNED).into_signed_data();
    if let Some(certificates) = signed_data.certificates.as_mut() {
        certificates.insert(other.clone());
    }

    let store = CertificateStore::from_signed_data(&signed_data);
    assert_eq!(store.len(), 1);
    assert_eq!(store.others(), &[other.clone()]);

    let set = store.into_set().unwrap();
    assert!(set.contains(&other));
    assert!(set.contains(&Any::new(SIGNER.to_vec())));
}
