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


//! The capability that upgrades a signer record to the time-stamped level.

use cades_crypto::{
    asn1::rfc3161::ID_AA_SIGNATURE_TIME_STAMP_TOKEN,
    time_stamp::{tst_info_from_token_der, verify_message_imprint, TimeStampError, TimeStampProvider},
};

use crate::{
    envelope::{SignedEnvelope, SignerInformation},
    extension::ExtensionParameters,
};

/// Extends a signer record to CAdES-BASELINE-T.
pub trait SignatureTimestamper: Send + Sync {
    /// Return `signer` with a signature time-stamp token attached.
    ///
    /// The returned record must carry the same signature value as `signer`.
    fn extend_to_timestamped(
        &self,
        envelope: &SignedEnvelope,
        signer: &SignerInformation,
        params: &ExtensionParameters,
    ) -> Result<SignerInformation, TimeStampError>;
}

/// A [`SignatureTimestamper`] that asks a [`TimeStampProvider`] for an
/// RFC 3161 token over the signature value and attaches it as an
/// `id-aa-signatureTimeStampToken` unsigned attribute.
pub struct TimeStampTokenExtender<P> {
    provider: P,
}

impl<P: TimeStampProvider> TimeStampTokenExtender<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: TimeStampProvider + Send + Sync> SignatureTimestamper for TimeStampTokenExtender<P> {
    fn extend_to_timestamped(
        &self,
        _envelope: &SignedEnvelope,
        signer: &SignerInformation,
        _params: &ExtensionParameters,
    ) -> Result<SignerInformation, TimeStampError> {
        let message = signer.signature_value();

        let token = self
            .provider
            .send_time_stamp_request(message)
            .ok_or(TimeStampError::ServiceUnavailable)??;

        verify_message_imprint(&tst_info_from_token_der(&token)?, message)?;

        log::debug!("obtained signature time-stamp token ({} bytes)", token.len());

        Ok(signer.with_unsigned_attribute(ID_AA_SIGNATURE_TIME_STAMP_TOKEN, token))
    }
}
