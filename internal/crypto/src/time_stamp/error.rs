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


use thiserror::Error;

/// Describes errors that can occur when requesting or parsing time stamps.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum TimeStampError {
    /// No time stamp service is available to this provider.
    #[error("no time stamp service is available")]
    ServiceUnavailable,

    /// The time stamp service refused the request.
    #[error("time stamp request was rejected (status {status}): {message}")]
    Rejected {
        /// `PKIStatus` value returned by the service.
        status: String,

        /// Free text returned by the service, if any.
        message: String,
    },

    /// The time stamp does not cover the data it was requested for.
    #[error("time stamp message imprint does not match the time-stamped data")]
    MessageImprintMismatch,

    /// The nonce in the response does not match the one sent.
    #[error("nonce in time stamp response does not match request")]
    NonceMismatch,

    /// The time stamp uses an unsupported hash algorithm.
    #[error("time stamp uses an unsupported digest algorithm")]
    UnsupportedAlgorithm,

    /// The time stamp response or token is not structured as expected.
    #[error("time stamp data is invalid")]
    InvalidData,

    /// An ASN.1 structure could not be decoded.
    #[error("unable to decode time stamp ({0})")]
    DecodeError(String),

    /// An ASN.1 structure could not be encoded.
    #[error("unable to encode time stamp request ({0})")]
    EncodeError(String),

    /// The transport used by the provider failed.
    #[error("time stamp service connection error ({0})")]
    HttpConnectionError(String),

    /// An unexpected internal error occured while requesting the time stamp
    /// response.
    #[error("internal error ({0})")]
    InternalError(String),
}
