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

use crate::envelope::{SignedEnvelope, SignerInformation};

/// CAdES baseline level of a signature.
///
/// Levels are ordered, so `SignatureLevel::T < SignatureLevel::Lt` holds.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SignatureLevel {
    /// Basic signature.
    B,

    /// A signature time-stamp token is present.
    T,

    /// Level T plus embedded revocation data.
    Lt,

    /// An archive time-stamp is present.
    Lta,
}

impl SignatureLevel {
    /// Derive the level of `signer` from its attributes and from the
    /// stores of `envelope`.
    ///
    /// `Lt` is a marker only: it is reported as soon as the revocation store
    /// holds any entry, whether or not that material covers this signer's
    /// chain. Completeness is established by [`ValidationContext`], not here.
    ///
    /// [`ValidationContext`]: crate::ValidationContext
    pub fn detect(envelope: &SignedEnvelope, signer: &SignerInformation) -> Self {
        if signer.has_archive_timestamp() {
            Self::Lta
        } else if !signer.has_signature_timestamp() {
            Self::B
        } else if envelope.has_revocation_data() {
            Self::Lt
        } else {
            Self::T
        }
    }
}

impl fmt::Display for SignatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::B => "CAdES-BASELINE-B",
            Self::T => "CAdES-BASELINE-T",
            Self::Lt => "CAdES-BASELINE-LT",
            Self::Lta => "CAdES-BASELINE-LTA",
        })
    }
}
