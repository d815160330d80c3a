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


use std::collections::BTreeMap;

use cades_crypto::{
    asn1::rfc5652::{CertificateChoiceKind, CertificateSet, SignedData},
    CertificateToken, TokenId,
};
use cades_status_tracker::{
    extension_codes::{CERTIFICATE_ADDED, CERTIFICATE_EMBEDDED},
    log_item, StatusTracker,
};
use rasn::types::{Any, SetOf};

/// The certificate store of an envelope, keyed by content.
///
/// X.509 certificates are deduplicated by [`TokenId`]. Attribute
/// certificates, other certificate formats and certificates that do not
/// decode are carried along byte for byte.
#[derive(Clone, Debug, Default)]
pub struct CertificateStore {
    certificates: BTreeMap<TokenId, CertificateToken>,
    others: Vec<Any>,
}

impl CertificateStore {
    /// Read the certificate store of `signed_data`.
    pub fn from_signed_data(signed_data: &SignedData) -> Self {
        let mut store = Self::default();

        for entry in signed_data.certificates.iter().flat_map(|set| set.to_vec()) {
            let token = match CertificateChoiceKind::of(entry) {
                CertificateChoiceKind::Certificate => {
                    CertificateToken::from_der(entry.as_bytes()).ok()
                }
                _ => None,
            };

            match token {
                Some(token) => {
                    store.certificates.insert(token.id(), token);
                }
                None => store.others.push(entry.clone()),
            }
        }

        store
    }

    pub fn contains(&self, id: &TokenId) -> bool {
        self.certificates.contains_key(id)
    }

    /// Number of X.509 certificates.
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty() && self.others.is_empty()
    }

    pub fn certificates(&self) -> impl Iterator<Item = &CertificateToken> {
        self.certificates.values()
    }

    /// Entries that are not decodable X.509 certificates.
    pub fn others(&self) -> &[Any] {
        &self.others
    }

    /// Add every certificate of `required` that is not present yet.
    ///
    /// Existing entries are never removed. Returns the number of certificates
    /// added.
    pub fn merge<'a>(
        &mut self,
        required: impl IntoIterator<Item = &'a CertificateToken>,
        tracker: &mut StatusTracker,
    ) -> usize {
        let mut added = 0;

        for cert in required {
            if self.contains(&cert.id()) {
                log_item!(
                    cert.subject_string(),
                    "certificate already embedded",
                    "CertificateStore::merge"
                )
                .extension_status(CERTIFICATE_EMBEDDED)
                .informational(tracker);
                continue;
            }

            log_item!(
                cert.subject_string(),
                "certificate added",
                "CertificateStore::merge"
            )
            .extension_status(CERTIFICATE_ADDED)
            .success(tracker);

            self.certificates.insert(cert.id(), cert.clone());
            added += 1;
        }

        added
    }

    /// The store as a CMS `CertificateSet`, or `None` if it is empty.
    pub fn into_set(self) -> Option<CertificateSet> {
        if self.is_empty() {
            return None;
        }

        let mut set = SetOf::new();
        for other in self.others {
            set.insert(other);
        }
        for cert in self.certificates.into_values() {
            set.insert(Any::new(cert.der().to_vec()));
        }

        Some(set)
    }
}
