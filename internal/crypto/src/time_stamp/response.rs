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


use rasn::types::Integer;

use crate::{
    asn1::{
        rfc3161::{TimeStampReq, TimeStampResp, TstInfo, ID_CT_TST_INFO},
        rfc5652::{ContentInfo, SignedData, ID_SIGNED_DATA},
    },
    hash::hash_by_oid,
    time_stamp::TimeStampError,
};

/// A decoded RFC 3161 `TimeStampResp`.
pub struct TimeStampResponse(pub TimeStampResp);

impl std::ops::Deref for TimeStampResponse {
    type Target = TimeStampResp;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TimeStampResponse {
    /// Decode a DER-encoded `TimeStampResp`.
    pub fn from_der(der: &[u8]) -> Result<Self, TimeStampError> {
        rasn::der::decode::<TimeStampResp>(der)
            .map(Self)
            .map_err(|e| TimeStampError::DecodeError(e.to_string()))
    }

    /// Return `true` if the request was granted, with or without
    /// modifications.
    pub fn is_success(&self) -> bool {
        let status = &self.0.status.status;
        *status == Integer::from(0i64) || *status == Integer::from(1i64)
    }

    /// Returns the status text joined into one string.
    pub fn status_message(&self) -> String {
        self.0
            .status
            .status_string
            .as_ref()
            .map(|text| text.join("; "))
            .unwrap_or_default()
    }
}

/// Extract the time stamp token from a `TimeStampResp` after checking it
/// against the `TimeStampReq` it answers.
///
/// Returns the DER encoding of the token's `ContentInfo`.
pub fn time_stamp_token_from_response(
    response_der: &[u8],
    request_der: &[u8],
) -> Result<Vec<u8>, TimeStampError> {
    let response = TimeStampResponse::from_der(response_der)?;

    if !response.is_success() {
        return Err(TimeStampError::Rejected {
            status: format!("{:?}", response.status.status),
            message: response.status_message(),
        });
    }

    let Some(token) = &response.time_stamp_token else {
        return Err(TimeStampError::InvalidData);
    };

    let request = rasn::der::decode::<TimeStampReq>(request_der)
        .map_err(|e| TimeStampError::DecodeError(e.to_string()))?;

    let tst_info = tst_info_from_signed_data(&signed_data_from_token(token)?)?;

    // Parameters of the digest algorithm may be echoed as absent or NULL.
    let (granted, requested) = (&tst_info.message_imprint, &request.message_imprint);
    if granted.hash_algorithm.algorithm != requested.hash_algorithm.algorithm
        || granted.hashed_message != requested.hashed_message
    {
        return Err(TimeStampError::MessageImprintMismatch);
    }

    if request.nonce.is_some() && tst_info.nonce != request.nonce {
        return Err(TimeStampError::NonceMismatch);
    }

    rasn::der::encode(token).map_err(|e| TimeStampError::EncodeError(e.to_string()))
}

/// Decode the signed data inside a time stamp token.
pub fn signed_data_from_token(token: &ContentInfo) -> Result<SignedData, TimeStampError> {
    if token.content_type != ID_SIGNED_DATA {
        return Err(TimeStampError::DecodeError(
            "time stamp has invalid OID".to_string(),
        ));
    }

    rasn::der::decode::<SignedData>(token.content.as_bytes())
        .map_err(|e| TimeStampError::DecodeError(e.to_string()))
}

/// Decode the `TSTInfo` encapsulated in a time stamp token's signed data.
pub fn tst_info_from_signed_data(signed_data: &SignedData) -> Result<TstInfo, TimeStampError> {
    let encap = &signed_data.encap_content_info;

    if encap.content_type != ID_CT_TST_INFO {
        return Err(TimeStampError::DecodeError(
            "time stamp does not encapsulate TSTInfo".to_string(),
        ));
    }

    let Some(content) = &encap.content else {
        return Err(TimeStampError::InvalidData);
    };

    rasn::der::decode::<TstInfo>(content).map_err(|e| TimeStampError::DecodeError(e.to_string()))
}

/// Decode the `TSTInfo` of a DER-encoded time stamp token.
pub fn tst_info_from_token_der(token_der: &[u8]) -> Result<TstInfo, TimeStampError> {
    let token = rasn::der::decode::<ContentInfo>(token_der)
        .map_err(|e| TimeStampError::DecodeError(e.to_string()))?;
    tst_info_from_signed_data(&signed_data_from_token(&token)?)
}

/// Check that a `TSTInfo` message imprint is the hash of `message`.
pub fn verify_message_imprint(tst_info: &TstInfo, message: &[u8]) -> Result<(), TimeStampError> {
    let imprint = &tst_info.message_imprint;

    let digest = hash_by_oid(&imprint.hash_algorithm.algorithm, message)
        .ok_or(TimeStampError::UnsupportedAlgorithm)?;

    if imprint.hashed_message[..] == digest[..] {
        Ok(())
    } else {
        Err(TimeStampError::MessageImprintMismatch)
    }
}
