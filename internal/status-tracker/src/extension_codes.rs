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


//! Status codes reported while a signature is extended to the long-term
//! validation level.
//!
//! Each code describes one decision the extension pipeline made about a
//! signature, a certificate or a revocation proof. The label of the
//! corresponding [`LogItem`](crate::LogItem) is the hex-encoded content
//! identifier of the token involved, when there is one.

use crate::LogKind;

// -- success codes --

/// The targeted signature already carried a signature time-stamp token.
pub const TIMESTAMP_PRESENT: &str = "timestamp.present";

/// A signature time-stamp token was obtained and attached to the signature.
pub const TIMESTAMP_ADDED: &str = "timestamp.added";

/// A certificate required for validation was added to the certificate store.
pub const CERTIFICATE_ADDED: &str = "certificate.added";

/// A revocation proof required for validation was added to the envelope.
pub const REVOCATION_ADDED: &str = "revocation.added";

/// The certificate chain terminates at a configured trust anchor.
pub const CHAIN_TRUSTED: &str = "chain.trusted";

/// The envelope was rebuilt with the merged stores.
pub const ENVELOPE_REGENERATED: &str = "envelope.regenerated";

// -- informational codes --

/// A required certificate was already present in the certificate store.
pub const CERTIFICATE_EMBEDDED: &str = "certificate.embedded";

/// A required revocation proof was already present in the envelope.
pub const REVOCATION_EMBEDDED: &str = "revocation.embedded";

/// No revocation proof is needed for this certificate: it is a trust anchor
/// or an OCSP responder certificate carrying `id-pkix-ocsp-nocheck`.
pub const REVOCATION_NOT_REQUIRED: &str = "revocation.notRequired";

// -- failure codes --

/// No revocation proof could be obtained for a certificate in the chain.
pub const REVOCATION_UNAVAILABLE: &str = "revocation.unavailable";

/// No path from a certificate to a configured trust anchor was found.
pub const CHAIN_UNTRUSTED: &str = "chain.untrusted";

/// The signature already carries an archive time-stamp and may not be
/// modified at the long-term level.
pub const LEVEL_ARCHIVAL: &str = "level.archival";

/// The signature value changed while the envelope was rebuilt.
pub const SIGNATURE_MODIFIED: &str = "signature.modified";

/// Returns `true` if the status code is a known success status code.
///
/// Returns `false` if the status code is a known failure status code _or_
/// if the status code is unrecognized.
pub fn is_success(status_code: &str) -> bool {
    matches!(log_kind(status_code), LogKind::Success)
}

/// Returns the [`LogKind`] for a given status code.
pub fn log_kind(status_code: &str) -> LogKind {
    match status_code {
        TIMESTAMP_PRESENT | TIMESTAMP_ADDED | CERTIFICATE_ADDED | REVOCATION_ADDED
        | CHAIN_TRUSTED | ENVELOPE_REGENERATED => LogKind::Success,
        CERTIFICATE_EMBEDDED | REVOCATION_EMBEDDED | REVOCATION_NOT_REQUIRED => {
            LogKind::Informational
        }
        _ => LogKind::Failure,
    }
}
