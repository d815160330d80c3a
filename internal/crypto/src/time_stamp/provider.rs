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


use rand::{thread_rng, Rng};
use rasn::types::{Integer, ObjectIdentifier, OctetString};
use rasn_pkix::AlgorithmIdentifier;

use crate::{
    asn1::rfc3161::{MessageImprint, TimeStampReq},
    hash::{sha256, SHA256_OID},
    time_stamp::{response::time_stamp_token_from_response, TimeStampError},
};

/// A `TimeStampProvider` implementation can contact a [RFC 3161] time stamp
/// service and generate a corresponding time stamp for a specific piece of
/// data.
///
/// Implementations only need to move bytes: [`Self::exchange_time_stamp_request`]
/// receives a DER-encoded `TimeStampReq` and returns the service's
/// DER-encoded `TimeStampResp`. Building the request and checking the
/// response are handled here.
///
/// [RFC 3161]: https://datatracker.ietf.org/doc/html/rfc3161
pub trait TimeStampProvider {
    /// Generate the request body for the time stamp service.
    fn time_stamp_request_body(&self, message: &[u8]) -> Result<Vec<u8>, TimeStampError> {
        default_rfc3161_message(message)
    }

    /// Send a DER-encoded `TimeStampReq` to the service and return the
    /// DER-encoded `TimeStampResp`.
    ///
    /// Returns `None` if this provider has no service to talk to.
    fn exchange_time_stamp_request(
        &self,
        request_body: &[u8],
    ) -> Option<Result<Vec<u8>, TimeStampError>>;

    /// Request a [RFC 3161] time stamp over an arbitrary data packet.
    ///
    /// On success, returns the DER encoding of the time stamp token (a CMS
    /// `ContentInfo`), after checking that it covers `message` and echoes the
    /// request nonce.
    ///
    /// [RFC 3161]: https://datatracker.ietf.org/doc/html/rfc3161
    fn send_time_stamp_request(&self, message: &[u8]) -> Option<Result<Vec<u8>, TimeStampError>> {
        let body = match self.time_stamp_request_body(message) {
            Ok(body) => body,
            Err(err) => return Some(Err(err)),
        };

        let response = self.exchange_time_stamp_request(&body)?;
        Some(response.and_then(|response| time_stamp_token_from_response(&response, &body)))
    }
}

/// Build a DER-encoded SHA-256 `TimeStampReq` over `data` with a random
/// nonce, asking the service to include its certificate.
pub fn default_rfc3161_message(data: &[u8]) -> Result<Vec<u8>, TimeStampError> {
    let nonce = thread_rng().gen_range(1..i64::MAX);
    rfc3161_message(data, Some(nonce))
}

/// Build a DER-encoded SHA-256 `TimeStampReq` over `data`.
pub fn rfc3161_message(data: &[u8], nonce: Option<i64>) -> Result<Vec<u8>, TimeStampError> {
    let request = TimeStampReq {
        version: Integer::from(1i64),
        message_imprint: MessageImprint {
            hash_algorithm: AlgorithmIdentifier {
                algorithm: ObjectIdentifier::from(SHA256_OID),
                parameters: None,
            },
            hashed_message: OctetString::from(sha256(data)),
        },
        req_policy: None,
        nonce: nonce.map(Integer::from),
        cert_req: true,
        extensions: None,
    };

    rasn::der::encode(&request).map_err(|e| TimeStampError::EncodeError(e.to_string()))
}
