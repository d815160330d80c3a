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


use std::fmt;

use rasn::types::{Integer, OctetString};
use rasn_pkix::{AuthorityKeyIdentifier, Certificate, Name};

use crate::{
    asn1::{
        rfc5280::{ID_CE_AUTHORITY_KEY_IDENTIFIER, ID_CE_SUBJECT_KEY_IDENTIFIER},
        rfc6960::ID_PKIX_OCSP_NOCHECK,
    },
    hash::sha1,
    TokenError, TokenId,
};

/// An X.509 certificate together with its DER encoding.
///
/// A certificate read with [`CertificateToken::from_der`] keeps the exact
/// bytes it was read from, which are also what ends up in a CMS certificate
/// set. Two tokens compare equal when their [`TokenId`]s do.
#[derive(Clone)]
pub struct CertificateToken {
    der: Vec<u8>,
    certificate: Certificate,
    id: TokenId,
}

impl CertificateToken {
    /// Decode a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, TokenError> {
        let certificate = rasn::der::decode::<Certificate>(der)
            .map_err(|e| TokenError::InvalidCertificate(e.to_string()))?;

        Ok(Self {
            der: der.to_vec(),
            certificate,
            id: TokenId::of_der(der),
        })
    }

    /// Wrap an already decoded certificate, re-encoding it as DER.
    pub fn from_certificate(certificate: Certificate) -> Result<Self, TokenError> {
        let der = rasn::der::encode(&certificate)
            .map_err(|e| TokenError::EncodingError(e.to_string()))?;
        let id = TokenId::of_der(&der);

        Ok(Self {
            der,
            certificate,
            id,
        })
    }

    /// DER encoding of this certificate.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// The decoded certificate.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Content identifier of this certificate.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Subject distinguished name.
    pub fn subject(&self) -> &Name {
        &self.certificate.tbs_certificate.subject
    }

    /// Issuer distinguished name.
    pub fn issuer(&self) -> &Name {
        &self.certificate.tbs_certificate.issuer
    }

    /// Serial number assigned by the issuer.
    pub fn serial_number(&self) -> &Integer {
        &self.certificate.tbs_certificate.serial_number
    }

    /// Returns `true` if subject and issuer names are the same.
    pub fn is_self_issued(&self) -> bool {
        self.subject() == self.issuer()
    }

    /// Raw bits of the subject public key.
    pub fn public_key_bits(&self) -> &[u8] {
        self.certificate
            .tbs_certificate
            .subject_public_key_info
            .subject_public_key
            .as_raw_slice()
    }

    /// SHA-1 hash of the subject public key, as used by OCSP `ResponderID`
    /// and `CertID`.
    pub fn public_key_sha1(&self) -> Vec<u8> {
        sha1(self.public_key_bits())
    }

    /// Returns `true` if both certificates certify the same key for the same
    /// subject. Re-issued and cross-certified CA certificates match this way.
    pub fn has_same_subject_and_key(&self, other: &CertificateToken) -> bool {
        self.subject() == other.subject()
            && self.certificate.tbs_certificate.subject_public_key_info
                == other.certificate.tbs_certificate.subject_public_key_info
    }

    /// Value of the subject key identifier extension, if present.
    pub fn subject_key_identifier(&self) -> Option<Vec<u8>> {
        let value = self.extension_value(ID_CE_SUBJECT_KEY_IDENTIFIER)?;
        rasn::der::decode::<OctetString>(value)
            .ok()
            .map(|ski| ski.to_vec())
    }

    /// Key identifier from the authority key identifier extension, if present.
    pub fn authority_key_identifier(&self) -> Option<Vec<u8>> {
        let value = self.extension_value(ID_CE_AUTHORITY_KEY_IDENTIFIER)?;
        rasn::der::decode::<AuthorityKeyIdentifier>(value)
            .ok()?
            .key_identifier
            .map(|kid| kid.to_vec())
    }

    /// Returns `true` if `issuer` plausibly issued this certificate.
    ///
    /// The issuer name must match the candidate's subject. When both key
    /// identifiers are available they must match too. Signatures are not
    /// verified.
    pub fn is_issued_by(&self, issuer: &CertificateToken) -> bool {
        if self.issuer() != issuer.subject() {
            return false;
        }

        match (
            self.authority_key_identifier(),
            issuer.subject_key_identifier(),
        ) {
            (Some(aki), Some(ski)) => aki == ski,
            _ => true,
        }
    }

    /// Returns `true` if the certificate carries the `id-pkix-ocsp-nocheck`
    /// extension.
    pub fn has_ocsp_no_check(&self) -> bool {
        self.extension_value(ID_PKIX_OCSP_NOCHECK).is_some()
    }

    /// Human-readable subject name.
    pub fn subject_string(&self) -> String {
        match x509_parser::parse_x509_certificate(&self.der) {
            Ok((_, cert)) => cert.subject().to_string(),
            Err(_) => self.id.to_string(),
        }
    }

    fn extension_value(&self, oid: &rasn::types::Oid) -> Option<&[u8]> {
        self.certificate
            .tbs_certificate
            .extensions
            .as_ref()?
            .iter()
            .find(|e| e.extn_id == oid)
            .map(|e| e.extn_value.as_ref())
    }
}

impl PartialEq for CertificateToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CertificateToken {}

impl fmt::Debug for CertificateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateToken")
            .field("id", &self.id.to_string())
            .field("subject", &self.subject_string())
            .finish()
    }
}
