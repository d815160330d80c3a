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


//! The CMS `SignedData` container and its signer records.

mod level;
pub use level::SignatureLevel;

mod signer;
pub use signer::SignerInformation;

use cades_crypto::{
    asn1::{
        rfc5652::{
            decode_other_revocation_info, CertificateChoiceKind, ContentInfo,
            RevocationChoiceKind, SignedData, ID_SIGNED_DATA,
        },
        rfc5940::ID_RI_OCSP_RESPONSE,
        rfc6960::ID_PKIX_OCSP_BASIC,
    },
    crl::CrlToken,
    ocsp::OcspToken,
    CertificateToken, RevocationToken,
};
use rasn::types::{Any, ObjectIdentifier};
use rasn_cms::SignerIdentifier;

use crate::{Error, Result};

/// A signed envelope: a `ContentInfo` carrying CMS `SignedData`.
///
/// The envelope is treated as an immutable value. Extension produces a new
/// envelope rather than modifying this one. Certificate and revocation
/// entries keep the encoding they were read with.
#[derive(Clone, Debug)]
pub struct SignedEnvelope {
    signed_data: SignedData,
    signers: Vec<SignerInformation>,
}

impl SignedEnvelope {
    /// Decode a DER-encoded `ContentInfo` holding `SignedData`.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let content_info = rasn::der::decode::<ContentInfo>(der)?;

        if content_info.content_type != ID_SIGNED_DATA {
            return Err(Error::Encoding(
                "content type is not id-signedData".to_string(),
            ));
        }

        let signed_data = rasn::der::decode::<SignedData>(content_info.content.as_bytes())?;
        Self::from_signed_data(signed_data)
    }

    /// Wrap already decoded `SignedData`.
    ///
    /// Fails if a signer record cannot be encoded, since signers are ordered
    /// by their encoding.
    pub fn from_signed_data(signed_data: SignedData) -> Result<Self> {
        let mut signers = signed_data
            .signer_infos
            .to_vec()
            .into_iter()
            .map(|info| {
                let signer = SignerInformation::new(info.clone());
                Ok((signer.to_der()?, signer))
            })
            .collect::<Result<Vec<_>>>()?;

        signers.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            signed_data,
            signers: signers.into_iter().map(|(_, signer)| signer).collect(),
        })
    }

    /// Encode as a DER `ContentInfo`.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let content_info = ContentInfo {
            content_type: ObjectIdentifier::from(ID_SIGNED_DATA),
            content: Any::new(rasn::der::encode(&self.signed_data)?),
        };

        Ok(rasn::der::encode(&content_info)?)
    }

    pub fn signed_data(&self) -> &SignedData {
        &self.signed_data
    }

    pub fn into_signed_data(self) -> SignedData {
        self.signed_data
    }

    /// Returns `true` if the signed content is not encapsulated.
    pub fn is_detached(&self) -> bool {
        self.signed_data.encap_content_info.content.is_none()
    }

    /// The signer records in DER `SET OF` order.
    ///
    /// This is the order a DER encoder writes them in, so the last entry is
    /// the "last signer" whatever order the input used.
    pub fn signers(&self) -> Vec<SignerInformation> {
        self.signers.clone()
    }

    /// The X.509 certificates embedded in the certificate store.
    ///
    /// Attribute certificates and other formats are skipped, as are
    /// certificates that do not decode.
    pub fn certificates(&self) -> Vec<CertificateToken> {
        self.signed_data
            .certificates
            .iter()
            .flat_map(|set| set.to_vec())
            .filter(|entry| CertificateChoiceKind::of(entry) == CertificateChoiceKind::Certificate)
            .filter_map(|entry| CertificateToken::from_der(entry.as_bytes()).ok())
            .collect()
    }

    /// Every revocation proof embedded in the envelope.
    ///
    /// That is the CRLs plus the OCSP responses stored as either
    /// `id-pkix-ocsp-basic` or `id-ri-ocsp-response` entries.
    pub fn revocation_tokens(&self) -> Vec<RevocationToken> {
        self.signed_data
            .crls
            .iter()
            .flat_map(|set| set.to_vec())
            .filter_map(revocation_token)
            .collect()
    }

    /// Returns `true` if the revocation store holds any entry at all.
    pub fn has_revocation_data(&self) -> bool {
        self.signed_data
            .crls
            .as_ref()
            .is_some_and(|crls| !crls.is_empty())
    }

    /// Locate the certificate identified by a signer's `sid`.
    pub fn certificate_for(&self, signer: &SignerInformation) -> Option<CertificateToken> {
        self.certificates()
            .into_iter()
            .find(|cert| identifies(&signer.info().sid, cert))
    }

    /// Current baseline level of `signer` within this envelope.
    pub fn level(&self, signer: &SignerInformation) -> SignatureLevel {
        SignatureLevel::detect(self, signer)
    }
}

pub(crate) fn identifies(sid: &SignerIdentifier, cert: &CertificateToken) -> bool {
    match sid {
        SignerIdentifier::IssuerAndSerialNumber(isn) => {
            &isn.issuer == cert.issuer() && &isn.serial_number == cert.serial_number()
        }
        SignerIdentifier::SubjectKeyIdentifier(ski) => cert
            .subject_key_identifier()
            .is_some_and(|id| id[..] == ski[..]),
    }
}

/// Decode an encoded `RevocationInfoChoice` entry into a proof, if it is a
/// CRL or an OCSP response.
pub(crate) fn revocation_token(entry: &Any) -> Option<RevocationToken> {
    match RevocationChoiceKind::of(entry) {
        RevocationChoiceKind::Crl => CrlToken::from_der(entry.as_bytes()).ok().map(Into::into),
        RevocationChoiceKind::Other => {
            let other = decode_other_revocation_info(entry)?;
            let format = &other.other_rev_info_format;
            if *format == ID_PKIX_OCSP_BASIC || *format == ID_RI_OCSP_RESPONSE {
                // `OcspToken` accepts both a full and a basic response.
                OcspToken::from_der(other.other_rev_info.as_bytes())
                    .ok()
                    .map(Into::into)
            } else {
                None
            }
        }
        RevocationChoiceKind::Unknown => None,
    }
}
