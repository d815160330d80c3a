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
use cades_status_tracker::{extension_codes, StatusTracker};
use rasn::types::OctetString;

use crate::{
    extension::timestamp_stage::ensure_timestamped,
    tests::fixtures::{envelope, timestamped_envelope, RecordedTsa, SIGNED},
    Error, ExtensionParameters, SignatureTimestamper, SignedEnvelope, SignerInformation,
    TimeStampTokenExtender,
};

/// Returns the signer it is given, unchanged.
struct Forgetful;

impl SignatureTimestamper for Forgetful {
    fn extend_to_timestamped(
        &self,
        _envelope: &SignedEnvelope,
        signer: &SignerInformation,
        _params: &ExtensionParameters,
    ) -> Result<SignerInformation, TimeStampError> {
        Ok(signer.clone())
    }
}

/// Re-signs instead of time-stamping.
struct Tampering;

impl SignatureTimestamper for Tampering {
    fn extend_to_timestamped(
        &self,
        _envelope: &SignedEnvelope,
        signer: &SignerInformation,
        _params: &ExtensionParameters,
    ) -> Result<SignerInformation, TimeStampError> {
        let mut info = signer.info().clone();
        info.signature = OctetString::from(vec![1u8; 64]);
        Ok(SignerInformation::new(info))
    }
}

#[test]
fn adds_missing_time_stamp() {
    let envelope = envelope(SIGNED);
    let signer = envelope.signers().pop().unwrap();
    let extender = TimeStampTokenExtender::new(RecordedTsa);

    let mut tracker = StatusTracker::default();
    let updated = ensure_timestamped(
        &envelope,
        &signer,
        &ExtensionParameters::new(),
        Some(&extender),
        &mut tracker,
    )
    .unwrap();

    assert!(updated.has_signature_timestamp());
    assert!(tracker.has_status(extension_codes::TIMESTAMP_ADDED));
}

#[test]
fn keeps_existing_time_stamp() {
    let envelope = timestamped_envelope();
    let signer = envelope.signers().pop().unwrap();

    // no time-stamp capability is needed
    let mut tracker = StatusTracker::default();
    let updated = ensure_timestamped(
        &envelope,
        &signer,
        &ExtensionParameters::new(),
        None,
        &mut tracker,
    )
    .unwrap();

    assert_eq!(updated.to_der().unwrap(), signer.to_der().unwrap());
    assert!(tracker.has_status(extension_codes::TIMESTAMP_PRESENT));
    assert!(!tracker.has_status(extension_codes::TIMESTAMP_ADDED));
}

#[test]
fn requires_time_stamp_capability() {
    let envelope = envelope(SIGNED);
    let signer = envelope.signers().pop().unwrap();

    let result = ensure_timestamped(
        &envelope,
        &signer,
        &ExtensionParameters::new(),
        None,
        &mut StatusTracker::default(),
    );

    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn detects_missing_token() {
    let envelope = envelope(SIGNED);
    let signer = envelope.signers().pop().unwrap();

    let result = ensure_timestamped(
        &envelope,
        &signer,
        &ExtensionParameters::new(),
        Some(&Forgetful),
        &mut StatusTracker::default(),
    );

    assert!(matches!(
        result,
        Err(Error::TimeStamp(TimeStampError::InvalidData))
    ));
}

#[test]
fn detects_signature_change() {
    let envelope = envelope(SIGNED);
    let signer = envelope.signers().pop().unwrap();

    let mut tracker = StatusTracker::default();
    let result = ensure_timestamped(
        &envelope,
        &signer,
        &ExtensionParameters::new(),
        Some(&Tampering),
        &mut tracker,
    );

    assert!(matches!(result, Err(Error::SignatureModified)));
    assert!(tracker.has_status(extension_codes::SIGNATURE_MODIFIED));
}
