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


#![allow(dead_code)]

use std::{
    collections::BTreeSet,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use cades_crypto::{asn1::rfc3161::TimeStampReq, hash::sha256};
use cades_lt::{
    settings::Settings, CadesLevelBaselineLt, CertificateToken, CertificateVerifier,
    OfflineCertificateVerifier, Result, RevocationToken, SignedEnvelope, TimeStampError,
    TimeStampProvider, TimeStampTokenExtender, TokenId,
};

#[allow(unused_macros)]
macro_rules! assert_err {
    ($expression:expr, $($pattern:tt)+) => {
        match $expression {
            $($pattern)+ => (),
            ref e => panic!("expected `{}` but got `{:?}`", stringify!($($pattern)+), e),
        }
    }
}
#[allow(unused_imports)]
pub(super) use assert_err;

pub const CONTENT: &[u8] = b"Content to be signed\n";

pub fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/pki")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

pub fn cert(name: &str) -> CertificateToken {
    CertificateToken::from_der(&fixture(name)).unwrap()
}

pub fn envelope(name: &str) -> SignedEnvelope {
    SignedEnvelope::from_der(&fixture(name)).unwrap()
}

/// Default settings trusting the test root.
pub fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.trust.trust_anchors = Some(String::from_utf8(fixture("trust_anchors.pem")).unwrap());
    settings
}

/// An offline verifier trusting the test root, over the named fixtures.
pub fn pool(certs: &[&str], ocsp: &[&str], crls: &[&str]) -> OfflineCertificateVerifier {
    let anchors = settings().trust.trust_anchors().unwrap();
    let mut verifier = OfflineCertificateVerifier::new(anchors);

    for name in certs {
        verifier.add_certificate_der(&fixture(name)).unwrap();
    }
    for name in ocsp {
        verifier.add_ocsp_der(&fixture(name)).unwrap();
    }
    for name in crls {
        verifier.add_crl_der(&fixture(name)).unwrap();
    }

    verifier
}

/// An extension using `verifier` and the recorded time stamps.
pub fn extension(settings: &Settings, verifier: Arc<dyn CertificateVerifier>) -> CadesLevelBaselineLt {
    CadesLevelBaselineLt::new(settings)
        .unwrap()
        .with_verifier(verifier)
        .with_timestamper(Box::new(TimeStampTokenExtender::new(RecordedTsa::new())))
}

pub fn certificate_ids(envelope: &SignedEnvelope) -> BTreeSet<TokenId> {
    envelope.certificates().iter().map(CertificateToken::id).collect()
}

pub fn revocation_ids(envelope: &SignedEnvelope) -> BTreeSet<TokenId> {
    envelope
        .revocation_tokens()
        .iter()
        .map(RevocationToken::id)
        .collect()
}

pub fn ids(names: &[&str]) -> BTreeSet<TokenId> {
    names.iter().map(|name| cert(name).id()).collect()
}

/// Replays the time stamp exchanges recorded for the test envelopes.
///
/// A request is answered only if a recording exists for its message
/// imprint, so the tokens are the same on every run.
pub struct RecordedTsa {
    exchanges: Vec<(Vec<u8>, Vec<u8>)>,
    requests: AtomicUsize,
}

impl RecordedTsa {
    pub fn new() -> Self {
        let exchanges = [
            "ts_signed_0",
            "ts_signed_ica_0",
            "ts_signed_two_signers_0",
            "ts_signed_two_signers_1",
            "ts_signed_untrusted_0",
        ]
        .iter()
        .map(|name| (fixture(&format!("{name}.tsq")), fixture(&format!("{name}.tsr"))))
        .collect();

        Self {
            exchanges,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl TimeStampProvider for RecordedTsa {
    fn time_stamp_request_body(&self, message: &[u8]) -> std::result::Result<Vec<u8>, TimeStampError> {
        let digest = sha256(message);

        self.exchanges
            .iter()
            .map(|(tsq, _)| tsq)
            .find(|tsq| {
                rasn::der::decode::<TimeStampReq>(tsq)
                    .is_ok_and(|req| req.message_imprint.hashed_message[..] == digest[..])
            })
            .cloned()
            .ok_or_else(|| TimeStampError::InternalError("no recorded time stamp".into()))
    }

    fn exchange_time_stamp_request(
        &self,
        request_body: &[u8],
    ) -> Option<std::result::Result<Vec<u8>, TimeStampError>> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        self.exchanges
            .iter()
            .find(|(tsq, _)| tsq == request_body)
            .map(|(_, tsr)| Ok(tsr.clone()))
    }
}

/// Counts the questions reaching the wrapped verifier.
pub struct Counting<V> {
    pub inner: V,
    pub chains: AtomicUsize,
    pub revocations: AtomicUsize,
}

impl<V> Counting<V> {
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            chains: AtomicUsize::new(0),
            revocations: AtomicUsize::new(0),
        }
    }

    pub fn revocation_requests(&self) -> usize {
        self.revocations.load(Ordering::SeqCst)
    }

    pub fn chain_requests(&self) -> usize {
        self.chains.load(Ordering::SeqCst)
    }
}

impl<V: CertificateVerifier> CertificateVerifier for Counting<V> {
    fn build_chain(&self, cert: &CertificateToken) -> Result<Vec<CertificateToken>> {
        self.chains.fetch_add(1, Ordering::SeqCst);
        self.inner.build_chain(cert)
    }

    fn revocation_for(
        &self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Result<Vec<RevocationToken>> {
        self.revocations.fetch_add(1, Ordering::SeqCst);
        self.inner.revocation_for(cert, issuer)
    }
}
