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


#![deny(warnings)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! This library extends CMS signed envelopes (CAdES signatures) to the
//! baseline long-term (LT) level.
//!
//! An LT signature embeds every certificate and every revocation proof (CRLs
//! and OCSP responses) needed to validate the signer's certificate chain up to
//! a trust anchor. It also carries a signature time-stamp. Such a signature
//! stays verifiable after the certification authorities stop answering.
//!
//! Extension is a pipeline of pure steps over a [`SignedEnvelope`]:
//!
//! 1. a signature time-stamp is added if the signer lacks one,
//! 2. a [`ValidationContext`] computes the certificates and proofs required,
//!    asking a [`CertificateVerifier`] for chains and revocation data,
//! 3. the certificate and revocation stores of the envelope are merged with
//!    that material, deduplicated by content,
//! 4. a new envelope is built around the merged stores; the signature value
//!    is left untouched.
//!
//! See [`CadesLevelBaselineLt`] for the entry point.

/// The internal name of this crate.
pub const NAME: &str = "cades-lt";

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod envelope;
pub use envelope::{SignatureLevel, SignedEnvelope, SignerInformation};

mod error;
pub use error::{Error, Result};

pub mod extension;
pub use extension::{
    CadesLevelBaselineLt, ExtendedEnvelope, ExtensionParameters, RevocationProof,
    ValidationContext,
};

pub mod settings;

pub mod time_stamp;
pub use time_stamp::{SignatureTimestamper, TimeStampTokenExtender};

pub mod verifier;
pub use verifier::{CachingCertificateVerifier, CertificateVerifier, OfflineCertificateVerifier};

pub use cades_crypto::{
    time_stamp::{TimeStampError, TimeStampProvider},
    CertificateToken, RevocationKind, RevocationToken, TokenId, TrustAnchors,
};
pub use cades_status_tracker::{extension_codes, LogItem, LogKind, StatusTracker};

#[cfg(test)]
pub(crate) mod tests;
