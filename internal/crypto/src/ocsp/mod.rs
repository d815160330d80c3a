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


//! Tools for working with OCSP responses.

use std::fmt;

use chrono::{DateTime, Utc};
use rasn_ocsp::{BasicOcspResponse, CertId, CertStatus, OcspResponseStatus, ResponderId, SingleResponse};

use crate::{
    hash::hash_by_oid,
    internal::time::generalized_time_to_utc,
    CertificateToken, TokenError, TokenId,
};

/// A basic OCSP response together with its DER encoding.
///
/// Whatever wrapper the response arrived in, the token holds the
/// `BasicOCSPResponse`, which is the form embedded in CMS signed data under
/// `id-pkix-ocsp-basic`. The encoding is the one the responder produced.
#[derive(Clone)]
pub struct OcspToken {
    der: Vec<u8>,
    response: BasicOcspResponse,
    id: TokenId,
}

impl OcspToken {
    /// Decode either a complete `OCSPResponse` or a bare `BasicOCSPResponse`.
    ///
    /// An `OCSPResponse` must have a successful status and carry response
    /// bytes.
    pub fn from_der(der: &[u8]) -> Result<Self, TokenError> {
        if let Ok(ocsp_response) = rasn::der::decode::<rasn_ocsp::OcspResponse>(der) {
            if ocsp_response.status != OcspResponseStatus::Successful {
                return Err(TokenError::InvalidOcspResponse(format!(
                    "response status is {:?}",
                    ocsp_response.status
                )));
            }

            let Some(response_bytes) = ocsp_response.bytes else {
                return Err(TokenError::InvalidOcspResponse(
                    "response carries no response bytes".to_string(),
                ));
            };

            return Self::from_basic_der(&response_bytes.response);
        }

        Self::from_basic_der(der)
    }

    /// Decode a bare `BasicOCSPResponse`, keeping `der` as its encoding.
    fn from_basic_der(der: &[u8]) -> Result<Self, TokenError> {
        let response = rasn::der::decode::<BasicOcspResponse>(der)
            .map_err(|e| TokenError::InvalidOcspResponse(e.to_string()))?;

        Ok(Self {
            der: der.to_vec(),
            response,
            id: TokenId::of_der(der),
        })
    }

    /// DER encoding of the `BasicOCSPResponse`.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// The decoded basic response.
    pub fn response(&self) -> &BasicOcspResponse {
        &self.response
    }

    /// Content identifier of this response.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Time at which the response was signed.
    pub fn produced_at(&self) -> DateTime<Utc> {
        generalized_time_to_utc(&self.response.tbs_response_data.produced_at)
    }

    /// Earliest `nextUpdate` among the single responses, if any states one.
    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        self.response
            .tbs_response_data
            .responses
            .iter()
            .filter_map(|single| single.next_update.as_ref())
            .map(generalized_time_to_utc)
            .min()
    }

    /// Returns the single response about `cert`, which was issued by `issuer`.
    pub fn single_response_for(
        &self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Option<&SingleResponse> {
        self.response
            .tbs_response_data
            .responses
            .iter()
            .find(|single| cert_id_matches(&single.cert_id, cert, issuer))
    }

    /// Returns `true` if this response states the status of `cert`.
    pub fn covers(&self, cert: &CertificateToken, issuer: &CertificateToken) -> bool {
        self.single_response_for(cert, issuer).is_some()
    }

    /// Returns the certificate status of `cert`, if this response covers it.
    pub fn status_for(
        &self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Option<&CertStatus> {
        self.single_response_for(cert, issuer)
            .map(|single| &single.cert_status)
    }

    /// Certificates included in the response's `certs` field.
    ///
    /// Entries that cannot be re-encoded are skipped.
    pub fn responder_certificates(&self) -> Vec<CertificateToken> {
        self.response
            .certs
            .iter()
            .flatten()
            .filter_map(|cert| CertificateToken::from_certificate(cert.clone()).ok())
            .collect()
    }

    /// Returns `true` if `cert` is the one named by the response's
    /// `ResponderID`.
    pub fn is_signed_by(&self, cert: &CertificateToken) -> bool {
        match &self.response.tbs_response_data.responder_id {
            ResponderId::ByName(name) => name == cert.subject(),
            ResponderId::ByKey(key_hash) => key_hash[..] == cert.public_key_sha1()[..],
        }
    }
}

// The hash algorithm is taken from the CertID itself so responses using
// SHA-1 and SHA-2 CertIDs both match.
fn cert_id_matches(cert_id: &CertId, cert: &CertificateToken, issuer: &CertificateToken) -> bool {
    if &cert_id.serial_number != cert.serial_number() {
        return false;
    }

    let Ok(issuer_name_der) = rasn::der::encode(issuer.subject()) else {
        return false;
    };

    let alg = &cert_id.hash_algorithm.algorithm;
    match (
        hash_by_oid(alg, &issuer_name_der),
        hash_by_oid(alg, issuer.public_key_bits()),
    ) {
        (Some(name_hash), Some(key_hash)) => {
            cert_id.issuer_name_hash[..] == name_hash[..]
                && cert_id.issuer_key_hash[..] == key_hash[..]
        }
        _ => false,
    }
}

impl PartialEq for OcspToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OcspToken {}

impl fmt::Debug for OcspToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcspToken")
            .field("id", &self.id.to_string())
            .field("produced_at", &self.produced_at())
            .finish()
    }
}
