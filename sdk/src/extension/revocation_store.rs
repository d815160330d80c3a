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

use cades_crypto::{
    asn1::{
        rfc5652::{
            decode_other_revocation_info, encode_other_revocation_info, RevocationChoiceKind,
            RevocationInfoChoices, SignedData,
        },
        rfc5940::ID_RI_OCSP_RESPONSE,
        rfc6960::ID_PKIX_OCSP_BASIC,
    },
    crl::CrlToken,
    ocsp::OcspToken,
    RevocationToken, TokenId,
};
use cades_status_tracker::{
    extension_codes::{REVOCATION_ADDED, REVOCATION_EMBEDDED},
    log_item, StatusTracker,
};
use rasn::types::{Any, SetOf};

use crate::{extension::RevocationProof, Result};

/// The revocation stores of an envelope, keyed by content.
///
/// Every entry is held as the complete `RevocationInfoChoice` encoding it was
/// read or created with. CRLs and `id-pkix-ocsp-basic` entries are
/// deduplicated by [`TokenId`]. `id-ri-ocsp-response` entries and unknown
/// formats are kept as they are. The basic responses inside
/// `id-ri-ocsp-response` entries still count as present when deduplicating.
#[derive(Clone, Debug, Default)]
pub struct RevocationStore {
    crls: BTreeMap<TokenId, Any>,
    basic_ocsp: BTreeMap<TokenId, Any>,
    ocsp_responses: Vec<Any>,
    wrapped_ocsp: HashSet<TokenId>,
    others: Vec<Any>,
}

impl RevocationStore {
    /// Read the CRL and other-revocation-info stores of `signed_data`.
    pub fn from_signed_data(signed_data: &SignedData) -> Self {
        let mut store = Self::default();

        for entry in signed_data.crls.iter().flat_map(|set| set.to_vec()) {
            match RevocationChoiceKind::of(entry) {
                RevocationChoiceKind::Crl => match CrlToken::from_der(entry.as_bytes()) {
                    Ok(token) => {
                        store.crls.insert(token.id(), entry.clone());
                    }
                    Err(_) => store.others.push(entry.clone()),
                },

                RevocationChoiceKind::Other => store.read_other(entry),

                RevocationChoiceKind::Unknown => store.others.push(entry.clone()),
            }
        }

        store
    }

    fn read_other(&mut self, entry: &Any) {
        let Some(other) = decode_other_revocation_info(entry) else {
            self.others.push(entry.clone());
            return;
        };

        let format = &other.other_rev_info_format;
        let token = OcspToken::from_der(other.other_rev_info.as_bytes());

        if *format == ID_PKIX_OCSP_BASIC {
            match token {
                Ok(token) => {
                    self.basic_ocsp.insert(token.id(), entry.clone());
                }
                Err(_) => self.others.push(entry.clone()),
            }
        } else if *format == ID_RI_OCSP_RESPONSE {
            if let Ok(token) = token {
                self.wrapped_ocsp.insert(token.id());
            }
            self.ocsp_responses.push(entry.clone());
        } else {
            self.others.push(entry.clone());
        }
    }

    pub fn contains(&self, id: &TokenId) -> bool {
        self.crls.contains_key(id) || self.basic_ocsp.contains_key(id) || self.wrapped_ocsp.contains(id)
    }

    /// Number of CRL entries.
    pub fn crl_count(&self) -> usize {
        self.crls.len()
    }

    /// Number of `id-pkix-ocsp-basic` entries.
    pub fn basic_ocsp_count(&self) -> usize {
        self.basic_ocsp.len()
    }

    /// Number of `id-ri-ocsp-response` entries.
    pub fn ocsp_response_count(&self) -> usize {
        self.ocsp_responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crls.is_empty()
            && self.basic_ocsp.is_empty()
            && self.ocsp_responses.is_empty()
            && self.others.is_empty()
    }

    /// Add every proof of `required` that is not present yet.
    ///
    /// New OCSP responses are stored as `id-pkix-ocsp-basic` entries. Existing
    /// entries are never removed. Returns the number of proofs added.
    pub fn merge<'a>(
        &mut self,
        required: impl IntoIterator<Item = &'a RevocationProof>,
        tracker: &mut StatusTracker,
    ) -> Result<usize> {
        let mut added = 0;

        for proof in required {
            let token = proof.token();
            let label = token.id().to_string();

            if self.contains(&token.id()) {
                log_item!(
                    label,
                    format!("{} already embedded", token.kind()),
                    "RevocationStore::merge"
                )
                .extension_status(REVOCATION_EMBEDDED)
                .informational(tracker);
                continue;
            }

            match token {
                RevocationToken::Crl(crl) => {
                    self.crls.insert(crl.id(), Any::new(crl.der().to_vec()));
                }
                RevocationToken::Ocsp(ocsp) => {
                    let entry = encode_other_revocation_info(ID_PKIX_OCSP_BASIC, ocsp.der())?;
                    self.basic_ocsp.insert(ocsp.id(), entry);
                }
            }

            log_item!(
                label,
                format!("{} added for certificate {}", token.kind(), proof.certificate()),
                "RevocationStore::merge"
            )
            .extension_status(REVOCATION_ADDED)
            .success(tracker);

            added += 1;
        }

        Ok(added)
    }

    /// The stores as CMS `RevocationInfoChoices`, or `None` if empty.
    pub fn into_set(self) -> Option<RevocationInfoChoices> {
        if self.is_empty() {
            return None;
        }

        let mut set = SetOf::new();
        for entry in self
            .others
            .into_iter()
            .chain(self.crls.into_values())
            .chain(self.basic_ocsp.into_values())
            .chain(self.ocsp_responses)
        {
            set.insert(entry);
        }

        Some(set)
    }
}
