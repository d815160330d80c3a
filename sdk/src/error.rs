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


use cades_crypto::{time_stamp::TimeStampError, TokenError, TrustAnchorError};
use thiserror::Error;

use crate::envelope::SignatureLevel;

/// `Error` enumerates errors returned by signature extension operations.
///
/// An extension call either returns a complete envelope or one of these
/// errors; no partially extended envelope is ever produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The certificate verifier or the trust configuration is missing or
    /// unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No path from a certificate to a trust anchor could be built.
    #[error("could not build a certificate chain: {0}")]
    ChainBuild(String),

    /// No revocation proof could be obtained for a certificate that needs one.
    #[error("revocation data unavailable for certificate: {certificate}")]
    RevocationUnavailable { certificate: String },

    /// The signature is already at or beyond a level that must not be
    /// modified by an LT extension.
    #[error("signature is already extended to level {level}")]
    LevelConflict { level: SignatureLevel },

    /// The input container is malformed or the output could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The regenerated signer information no longer carries the original
    /// signature octets.
    #[error("signature value was modified during regeneration")]
    SignatureModified,

    /// Detached content was supplied but does not match the signed
    /// message digest.
    #[error("detached content does not match the signed message digest")]
    DetachedContentMismatch,

    /// The certificate verifier failed to answer.
    #[error("certificate verifier failed: {0}")]
    Verifier(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TimeStamp(#[from] TimeStampError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    TrustAnchor(#[from] TrustAnchorError),
}

/// A specialized `Result` type for signature extension operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<rasn::error::DecodeError> for Error {
    fn from(err: rasn::error::DecodeError) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<rasn::error::EncodeError> for Error {
    fn from(err: rasn::error::EncodeError) -> Self {
        Self::Encoding(err.to_string())
    }
}
