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


//! Certificate revocation lists.

use std::fmt;

use chrono::{DateTime, Utc};
use rasn_pkix::Name;

use crate::{internal::time, CertificateToken, TokenError, TokenId};

/// An X.509 CRL together with the DER encoding it was read from.
///
/// Only the fields needed to match a CRL to certificates and to judge its
/// freshness are decoded. The encoding itself is never rewritten, so a CRL
/// with no `revokedCertificates` is embedded exactly as issued.
#[derive(Clone)]
pub struct CrlToken {
    der: Vec<u8>,
    issuer: Name,
    this_update: DateTime<Utc>,
    next_update: Option<DateTime<Utc>>,
    id: TokenId,
}

impl CrlToken {
    /// Decode a DER-encoded CRL.
    pub fn from_der(der: &[u8]) -> Result<Self, TokenError> {
        let (rest, crl) = x509_parser::parse_x509_crl(der)
            .map_err(|e| TokenError::InvalidCrl(e.to_string()))?;
        if !rest.is_empty() {
            return Err(TokenError::InvalidCrl(format!(
                "{} trailing bytes",
                rest.len()
            )));
        }

        let issuer = rasn::der::decode::<Name>(crl.issuer().as_raw())
            .map_err(|e| TokenError::InvalidCrl(e.to_string()))?;
        let this_update = time::asn1_time_to_utc(crl.last_update())
            .ok_or_else(|| TokenError::InvalidCrl("thisUpdate out of range".to_string()))?;
        let next_update = match crl.next_update() {
            Some(next) => Some(
                time::asn1_time_to_utc(next)
                    .ok_or_else(|| TokenError::InvalidCrl("nextUpdate out of range".to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            der: der.to_vec(),
            issuer,
            this_update,
            next_update,
            id: TokenId::of_der(der),
        })
    }

    /// DER encoding of this CRL.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Content identifier of this CRL.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Name of the CRL issuer.
    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    /// `thisUpdate` of the CRL.
    pub fn this_update(&self) -> DateTime<Utc> {
        self.this_update
    }

    /// `nextUpdate` of the CRL, if present.
    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        self.next_update
    }

    /// Returns `true` if this CRL was issued by the issuer of `cert`.
    ///
    /// A CRL covers every certificate of its issuer, whether listed or not.
    pub fn covers(&self, cert: &CertificateToken, issuer: &CertificateToken) -> bool {
        cert.issuer() == self.issuer() && issuer.subject() == self.issuer()
    }
}

impl PartialEq for CrlToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CrlToken {}

impl fmt::Debug for CrlToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrlToken")
            .field("id", &self.id.to_string())
            .field("this_update", &self.this_update)
            .finish()
    }
}
