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


//! Content-addressed certificate and revocation tokens.
//!
//! Every token keeps the DER encoding it will be written back as. Two tokens
//! are the same token if and only if those encodings are byte-identical, which
//! is what [`TokenId`] captures.

use std::fmt;

use thiserror::Error;

mod certificate;
pub use certificate::CertificateToken;

mod revocation;
pub use revocation::{RevocationKind, RevocationToken};

/// SHA-256 digest of a token's DER encoding.
///
/// Used as the deduplication key for every certificate and revocation store.
/// Ordering is byte-wise, which gives stores a stable iteration order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TokenId([u8; 32]);

impl TokenId {
    /// Compute the identifier of a DER encoding.
    pub fn of_der(der: &[u8]) -> Self {
        let mut id = [0u8; 32];
        id.copy_from_slice(&crate::hash::sha256(der));
        Self(id)
    }

    /// Returns the raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Describes errors that can occur when decoding or encoding tokens.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum TokenError {
    /// The certificate could not be decoded.
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),

    /// The CRL could not be decoded.
    #[error("invalid CRL: {0}")]
    InvalidCrl(String),

    /// The OCSP response could not be decoded or was not successful.
    #[error("invalid OCSP response: {0}")]
    InvalidOcspResponse(String),

    /// A decoded structure could not be re-encoded as DER.
    #[error("encoding error: {0}")]
    EncodingError(String),
}
