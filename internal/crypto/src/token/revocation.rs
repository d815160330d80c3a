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

use chrono::{DateTime, Utc};

use crate::{crl::CrlToken, internal::time, ocsp::OcspToken, CertificateToken, TokenError, TokenId};

/// Kind of a [`RevocationToken`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RevocationKind {
    /// Certificate revocation list.
    Crl,

    /// Basic OCSP response.
    Ocsp,
}

impl fmt::Display for RevocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crl => f.write_str("CRL"),
            Self::Ocsp => f.write_str("OCSP"),
        }
    }
}

/// A revocation proof: either a CRL or a basic OCSP response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RevocationToken {
    /// Certificate revocation list.
    Crl(CrlToken),

    /// Basic OCSP response.
    Ocsp(OcspToken),
}

impl RevocationToken {
    /// Decode a DER-encoded CRL.
    pub fn from_crl_der(der: &[u8]) -> Result<Self, TokenError> {
        Ok(Self::Crl(CrlToken::from_der(der)?))
    }

    /// Decode a DER-encoded `OCSPResponse` or `BasicOCSPResponse`.
    pub fn from_ocsp_der(der: &[u8]) -> Result<Self, TokenError> {
        Ok(Self::Ocsp(OcspToken::from_der(der)?))
    }

    /// Content identifier of this proof.
    pub fn id(&self) -> TokenId {
        match self {
            Self::Crl(crl) => crl.id(),
            Self::Ocsp(ocsp) => ocsp.id(),
        }
    }

    /// DER encoding of this proof as it is embedded in signed data.
    pub fn der(&self) -> &[u8] {
        match self {
            Self::Crl(crl) => crl.der(),
            Self::Ocsp(ocsp) => ocsp.der(),
        }
    }

    /// Kind of this proof.
    pub fn kind(&self) -> RevocationKind {
        match self {
            Self::Crl(_) => RevocationKind::Crl,
            Self::Ocsp(_) => RevocationKind::Ocsp,
        }
    }

    /// Time at which this proof was issued: `thisUpdate` of a CRL or
    /// `producedAt` of an OCSP response.
    pub fn issued_at(&self) -> DateTime<Utc> {
        match self {
            Self::Crl(crl) => crl.this_update(),
            Self::Ocsp(ocsp) => ocsp.produced_at(),
        }
    }

    /// Time after which newer information is expected, if stated.
    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Crl(crl) => crl.next_update(),
            Self::Ocsp(ocsp) => ocsp.next_update(),
        }
    }

    /// Returns `true` if no newer information is expected yet.
    pub fn is_current(&self) -> bool {
        !matches!(self.next_update(), Some(next_update) if next_update <= time::utc_now())
    }

    /// Returns `true` if this proof states the revocation status of `cert`,
    /// which was issued by `issuer`.
    pub fn covers(&self, cert: &CertificateToken, issuer: &CertificateToken) -> bool {
        match self {
            Self::Crl(crl) => crl.covers(cert, issuer),
            Self::Ocsp(ocsp) => ocsp.covers(cert, issuer),
        }
    }

    /// Certificates shipped inside the proof to validate its signature.
    ///
    /// Only OCSP responses carry certificates.
    pub fn embedded_certificates(&self) -> Vec<CertificateToken> {
        match self {
            Self::Crl(_) => vec![],
            Self::Ocsp(ocsp) => ocsp.responder_certificates(),
        }
    }
}

impl From<CrlToken> for RevocationToken {
    fn from(crl: CrlToken) -> Self {
        Self::Crl(crl)
    }
}

impl From<OcspToken> for RevocationToken {
    fn from(ocsp: OcspToken) -> Self {
        Self::Ocsp(ocsp)
    }
}
