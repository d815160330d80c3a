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


use cades_crypto::asn1::rfc5652::{
    CertificateChoiceKind, CertificateSet, RevocationChoiceKind, RevocationInfoChoices,
    SignedData, ID_DATA,
};
use cades_status_tracker::{
    extension_codes::{ENVELOPE_REGENERATED, SIGNATURE_MODIFIED},
    log_item, StatusTracker,
};
use rasn::types::{Integer, SetOf};
use rasn_cms::SignerInfo;

use crate::{
    envelope::{SignedEnvelope, SignerInformation},
    Error, Result,
};

/// A targeted signer record and the record that replaces it.
pub struct SignerReplacement {
    pub original: SignerInformation,
    pub updated: SignerInformation,
}

/// Build a new envelope from `original` with the merged stores and the
/// updated signer records.
///
/// The merged stores must already be supersets of the original stores.
/// Everything else (digest algorithms, encapsulated content, untouched
/// signers) is copied. The `SignedData` version is recomputed from the new
/// content. Fails with [`Error::SignatureModified`] if a replacement does not
/// carry the signature octets of the record it replaces.
pub fn regenerate(
    original: &SignedEnvelope,
    replacements: &[SignerReplacement],
    certificates: Option<CertificateSet>,
    crls: Option<RevocationInfoChoices>,
    tracker: &mut StatusTracker,
) -> Result<SignedEnvelope> {
    let source = original.signed_data();

    let mut pending: Vec<(Vec<u8>, &SignerReplacement)> = Vec::with_capacity(replacements.len());
    for replacement in replacements {
        if replacement.updated.signature_value() != replacement.original.signature_value() {
            return Err(log_item!(
                replacement.original.label(),
                "signature value changed",
                "regenerate"
            )
            .extension_status(SIGNATURE_MODIFIED)
            .failure_as_err(tracker, Error::SignatureModified));
        }
        pending.push((replacement.original.to_der()?, replacement));
    }

    let mut signer_infos = SetOf::new();
    for info in source.signer_infos.to_vec() {
        let der = rasn::der::encode(info)?;
        match pending.iter().position(|(original, _)| *original == der) {
            Some(index) => {
                let (_, replacement) = pending.swap_remove(index);
                signer_infos.insert(replacement.updated.info().clone());
            }
            None => signer_infos.insert(info.clone()),
        }
    }

    if let Some((_, missing)) = pending.first() {
        return Err(Error::Encoding(format!(
            "{} is not part of the envelope",
            missing.original.label()
        )));
    }

    let signer_list = signer_infos.to_vec();
    let version = signed_data_version(source, certificates.as_ref(), crls.as_ref(), &signer_list);

    let signed_data = SignedData {
        version,
        digest_algorithms: source.digest_algorithms.clone(),
        encap_content_info: source.encap_content_info.clone(),
        certificates,
        crls,
        signer_infos,
    };

    // must survive an encode/decode cycle
    let der = SignedEnvelope::from_signed_data(signed_data)?.to_der()?;
    let envelope = SignedEnvelope::from_der(&der)?;

    log_item!(
        format!("{} signer(s)", replacements.len()),
        "envelope rebuilt with merged stores",
        "regenerate"
    )
    .extension_status(ENVELOPE_REGENERATED)
    .success(tracker);

    Ok(envelope)
}

/// `SignedData` version as required by RFC 5652, section 5.1.
fn signed_data_version(
    source: &SignedData,
    certificates: Option<&CertificateSet>,
    crls: Option<&RevocationInfoChoices>,
    signer_infos: &[&SignerInfo],
) -> Integer {
    let certs: Vec<CertificateChoiceKind> = certificates
        .map(|set| set.to_vec())
        .unwrap_or_default()
        .into_iter()
        .map(CertificateChoiceKind::of)
        .collect();
    let has_cert = |kind: CertificateChoiceKind| certs.contains(&kind);

    let other_crl = crls
        .map(|set| set.to_vec())
        .unwrap_or_default()
        .into_iter()
        .any(|entry| RevocationChoiceKind::of(entry) == RevocationChoiceKind::Other);

    let version: i64 = if has_cert(CertificateChoiceKind::Other) || other_crl {
        5
    } else if has_cert(CertificateChoiceKind::V2AttributeCertificate) {
        4
    } else if has_cert(CertificateChoiceKind::V1AttributeCertificate)
        || source.encap_content_info.content_type != ID_DATA
        || signer_infos
            .iter()
            .any(|info| info.version == Integer::from(3i64))
    {
        3
    } else {
        1
    };

    Integer::from(version)
}
