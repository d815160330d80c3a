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


//! Time-Stamp Protocol, [RFC 3161].
//!
//! [RFC 3161]: https://datatracker.ietf.org/doc/html/rfc3161

use rasn::prelude::*;
use rasn_pkix::{AlgorithmIdentifier, Extensions, GeneralName};

use crate::asn1::rfc5652::ContentInfo;

/// `id-ct-TSTInfo`: encapsulated content type of a time-stamp token.
pub const ID_CT_TST_INFO: &Oid = Oid::const_new(&[1, 2, 840, 113549, 1, 9, 16, 1, 4]);

/// `id-aa-signatureTimeStampToken`: unsigned attribute carrying a time-stamp
/// token computed over a signer's signature value.
pub const ID_AA_SIGNATURE_TIME_STAMP_TOKEN: &Oid =
    Oid::const_new(&[1, 2, 840, 113549, 1, 9, 16, 2, 14]);

/// Hash of the data to be time-stamped.
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct MessageImprint {
    /// Hash algorithm used to compute `hashed_message`.
    pub hash_algorithm: AlgorithmIdentifier,

    /// Hash of the time-stamped data.
    pub hashed_message: OctetString,
}

/// Time-stamp request.
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct TimeStampReq {
    /// Always `1`.
    pub version: Integer,

    /// Hash of the data to be time-stamped.
    pub message_imprint: MessageImprint,

    /// Requested TSA policy.
    pub req_policy: Option<ObjectIdentifier>,

    /// Nonce echoed back in the response.
    pub nonce: Option<Integer>,

    /// Whether the TSA should include its signing certificate.
    #[rasn(default)]
    pub cert_req: bool,

    /// Request extensions.
    #[rasn(tag(0))]
    pub extensions: Option<Extensions>,
}

/// Status of a time-stamp response.
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct PkiStatusInfo {
    /// `PKIStatus`: `0` (granted) and `1` (granted with mods) are successes.
    pub status: Integer,

    /// Free text describing the status.
    pub status_string: Option<SequenceOf<Utf8String>>,

    /// Reason for a rejection.
    pub fail_info: Option<BitString>,
}

/// Time-stamp response.
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct TimeStampResp {
    /// Response status.
    pub status: PkiStatusInfo,

    /// The token itself, a `ContentInfo` wrapping signed data.
    pub time_stamp_token: Option<ContentInfo>,
}

/// Accuracy of the time in a [`TstInfo`].
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct Accuracy {
    /// Seconds.
    pub seconds: Option<Integer>,

    /// Milliseconds.
    #[rasn(tag(0))]
    pub millis: Option<Integer>,

    /// Microseconds.
    #[rasn(tag(1))]
    pub micros: Option<Integer>,
}

/// Content of a time-stamp token.
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq)]
pub struct TstInfo {
    /// Always `1`.
    pub version: Integer,

    /// TSA policy under which the token was issued.
    pub policy: ObjectIdentifier,

    /// Hash of the time-stamped data.
    pub message_imprint: MessageImprint,

    /// Serial number assigned by the TSA.
    pub serial_number: Integer,

    /// Time at which the token was created.
    pub gen_time: GeneralizedTime,

    /// Accuracy of `gen_time`.
    pub accuracy: Option<Accuracy>,

    /// Ordering flag.
    #[rasn(default)]
    pub ordering: bool,

    /// Nonce from the request, if one was sent.
    pub nonce: Option<Integer>,

    /// Name of the TSA.
    #[rasn(tag(explicit(0)))]
    pub tsa: Option<GeneralName>,

    /// Extensions.
    #[rasn(tag(1))]
    pub extensions: Option<Extensions>,
}
