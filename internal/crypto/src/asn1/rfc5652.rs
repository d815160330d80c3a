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


//! Cryptographic Message Syntax, [RFC 5652].
//!
//! [RFC 5652]: https://datatracker.ietf.org/doc/html/rfc5652

use rasn::prelude::*;
use rasn_cms::{
    EncapsulatedContentInfo, OtherRevocationInfoFormat, RevocationInfoChoice, SignerInfo,
};
use rasn_pkix::AlgorithmIdentifier;

/// `id-data`: arbitrary octet string content.
pub const ID_DATA: &Oid = Oid::const_new(&[1, 2, 840, 113549, 1, 7, 1]);

/// `id-signedData`: signed-data content type.
pub const ID_SIGNED_DATA: &Oid = Oid::const_new(&[1, 2, 840, 113549, 1, 7, 2]);

/// `id-contentType`: signed attribute naming the type of the signed content.
pub const ID_CONTENT_TYPE: &Oid = Oid::const_new(&[1, 2, 840, 113549, 1, 9, 3]);

/// `id-messageDigest`: signed attribute holding the digest of the signed
/// content.
pub const ID_MESSAGE_DIGEST: &Oid = Oid::const_new(&[1, 2, 840, 113549, 1, 9, 4]);

/// `ContentInfo` wrapper around any CMS content type.
///
/// ```ASN.1
/// ContentInfo ::= SEQUENCE {
///   contentType ContentType,
///   content [0] EXPLICIT ANY DEFINED BY contentType }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentInfo {
    /// Type of the enclosed content.
    pub content_type: ObjectIdentifier,

    /// DER encoding of the enclosed content.
    #[rasn(tag(explicit(0)))]
    pub content: Any,
}

/// Entries of a `CertificateSet`, each kept as the complete encoding it was
/// read from.
pub type CertificateSet = SetOf<Any>;

/// Entries of a `RevocationInfoChoices`, each kept as the complete encoding
/// it was read from.
pub type RevocationInfoChoices = SetOf<Any>;

/// CMS `SignedData`.
///
/// Unlike `rasn_cms::SignedData`, the certificate and revocation stores are
/// not decoded. Entries that a strict decoder would reject (a CRL without
/// `revokedCertificates`, an unknown certificate format) are carried through
/// byte for byte.
///
/// ```ASN.1
/// SignedData ::= SEQUENCE {
///   version CMSVersion,
///   digestAlgorithms DigestAlgorithmIdentifiers,
///   encapContentInfo EncapsulatedContentInfo,
///   certificates [0] IMPLICIT CertificateSet OPTIONAL,
///   crls [1] IMPLICIT RevocationInfoChoices OPTIONAL,
///   signerInfos SignerInfos }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct SignedData {
    /// Syntax version, see [RFC 5652, section 5.1].
    ///
    /// [RFC 5652, section 5.1]: https://datatracker.ietf.org/doc/html/rfc5652#section-5.1
    pub version: Integer,

    /// Digest algorithms used by the signers.
    pub digest_algorithms: SetOf<AlgorithmIdentifier>,

    /// The signed content, or only its type when detached.
    pub encap_content_info: EncapsulatedContentInfo,

    /// Certificate store.
    #[rasn(tag(0))]
    pub certificates: Option<CertificateSet>,

    /// Revocation store.
    #[rasn(tag(1))]
    pub crls: Option<RevocationInfoChoices>,

    /// Signer records.
    pub signer_infos: SetOf<SignerInfo>,
}

/// Alternative of a `CertificateChoices` entry, read from its tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CertificateChoiceKind {
    /// X.509 certificate.
    Certificate,

    /// PKCS #6 extended certificate (obsolete).
    ExtendedCertificate,

    /// Version 1 attribute certificate (obsolete).
    V1AttributeCertificate,

    /// Version 2 attribute certificate.
    V2AttributeCertificate,

    /// `OtherCertificateFormat`.
    Other,

    /// Not a valid `CertificateChoices` tag.
    Unknown,
}

impl CertificateChoiceKind {
    /// Classify an encoded `CertificateChoices` entry.
    pub fn of(entry: &Any) -> Self {
        match entry.as_bytes().first() {
            Some(0x30) => Self::Certificate,
            Some(0xa0) => Self::ExtendedCertificate,
            Some(0xa1) => Self::V1AttributeCertificate,
            Some(0xa2) => Self::V2AttributeCertificate,
            Some(0xa3) => Self::Other,
            _ => Self::Unknown,
        }
    }
}

/// Alternative of a `RevocationInfoChoice` entry, read from its tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevocationChoiceKind {
    /// X.509 CRL.
    Crl,

    /// `OtherRevocationInfoFormat`.
    Other,

    /// Not a valid `RevocationInfoChoice` tag.
    Unknown,
}

impl RevocationChoiceKind {
    /// Classify an encoded `RevocationInfoChoice` entry.
    pub fn of(entry: &Any) -> Self {
        match entry.as_bytes().first() {
            Some(0x30) => Self::Crl,
            Some(0xa1) => Self::Other,
            _ => Self::Unknown,
        }
    }
}

/// Decode an `other` revocation entry.
///
/// Returns `None` for CRLs and for entries that do not decode.
pub fn decode_other_revocation_info(entry: &Any) -> Option<OtherRevocationInfoFormat> {
    if RevocationChoiceKind::of(entry) != RevocationChoiceKind::Other {
        return None;
    }

    match rasn::der::decode::<RevocationInfoChoice>(entry.as_bytes()).ok()? {
        RevocationInfoChoice::Other(other) => Some(other),
        RevocationInfoChoice::Crl(_) => None,
    }
}

/// Encode `value` as an `other` revocation entry of type `format`.
pub fn encode_other_revocation_info(
    format: &Oid,
    value: &[u8],
) -> Result<Any, rasn::error::EncodeError> {
    let choice = RevocationInfoChoice::Other(OtherRevocationInfoFormat {
        other_rev_info_format: ObjectIdentifier::from(format),
        other_rev_info: Any::new(value.to_vec()),
    });

    Ok(Any::new(rasn::der::encode(&choice)?))
}
