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


use cades_crypto::time_stamp::TimeStampError;
use cades_status_tracker::{
    extension_codes::{SIGNATURE_MODIFIED, TIMESTAMP_ADDED, TIMESTAMP_PRESENT},
    log_item, StatusTracker,
};

use crate::{
    envelope::{SignedEnvelope, SignerInformation},
    extension::ExtensionParameters,
    time_stamp::SignatureTimestamper,
    Error, Result,
};

/// Make sure `signer` carries a signature time-stamp token.
///
/// A signer that already has one is returned unchanged. Otherwise the
/// time-stamp capability produces the upgraded record, and any error it
/// reports is returned as is.
pub(crate) fn ensure_timestamped(
    envelope: &SignedEnvelope,
    signer: &SignerInformation,
    params: &ExtensionParameters,
    timestamper: Option<&dyn SignatureTimestamper>,
    tracker: &mut StatusTracker,
) -> Result<SignerInformation> {
    let label = signer.label();

    if signer.has_signature_timestamp() {
        log_item!(
            label,
            "signature time-stamp already present",
            "ensure_timestamped"
        )
        .extension_status(TIMESTAMP_PRESENT)
        .success(tracker);

        return Ok(signer.clone());
    }

    let Some(timestamper) = timestamper else {
        return Err(Error::Configuration(
            "signature has no time-stamp and no time-stamp capability is configured".into(),
        ));
    };

    let upgraded = timestamper.extend_to_timestamped(envelope, signer, params)?;

    if upgraded.signature_value() != signer.signature_value() {
        return Err(log_item!(
            label,
            "time-stamp capability altered the signature",
            "ensure_timestamped"
        )
        .extension_status(SIGNATURE_MODIFIED)
        .failure_as_err(tracker, Error::SignatureModified));
    }

    if !upgraded.has_signature_timestamp() {
        return Err(TimeStampError::InvalidData.into());
    }

    log_item!(label, "signature time-stamp added", "ensure_timestamped")
        .extension_status(TIMESTAMP_ADDED)
        .success(tracker);

    Ok(upgraded)
}
