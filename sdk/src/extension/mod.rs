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


//! Extension of CAdES signatures to the baseline-LT level.

mod certificate_store;
pub use certificate_store::CertificateStore;

mod regenerator;
pub use regenerator::{regenerate, SignerReplacement};

mod revocation_store;
pub use revocation_store::RevocationStore;

pub(crate) mod timestamp_stage;

mod validation_context;
pub use validation_context::{RevocationProof, ValidationContext};

use std::sync::Arc;

use cades_crypto::{hash::hash_by_oid, TrustAnchors};
use cades_status_tracker::{
    extension_codes::LEVEL_ARCHIVAL, log_item, ErrorBehavior, StatusTracker,
};

use crate::{
    envelope::{SignatureLevel, SignedEnvelope, SignerInformation},
    settings::{Extension, Settings, SignerSelection},
    time_stamp::SignatureTimestamper,
    verifier::CertificateVerifier,
    Error, Result,
};

/// Per-call parameters of an extension.
#[derive(Clone, Debug, Default)]
pub struct ExtensionParameters {
    detached_content: Option<Vec<u8>>,
    signer_selection: Option<SignerSelection>,
}

impl ExtensionParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a detached signature.
    ///
    /// When present it is checked against the signed `message-digest`
    /// attribute of every targeted signer.
    pub fn with_detached_content(mut self, content: Vec<u8>) -> Self {
        self.detached_content = Some(content);
        self
    }

    /// Override the configured signer selection for this call.
    pub fn with_signer_selection(mut self, selection: SignerSelection) -> Self {
        self.signer_selection = Some(selection);
        self
    }

    pub fn detached_content(&self) -> Option<&[u8]> {
        self.detached_content.as_deref()
    }

    pub fn signer_selection(&self) -> Option<SignerSelection> {
        self.signer_selection
    }
}

/// The result of a successful extension.
#[derive(Debug)]
pub struct ExtendedEnvelope {
    envelope: SignedEnvelope,
    report: StatusTracker,
}

impl ExtendedEnvelope {
    pub fn envelope(&self) -> &SignedEnvelope {
        &self.envelope
    }

    pub fn into_envelope(self) -> SignedEnvelope {
        self.envelope
    }

    /// What was found, fetched and embedded along the way.
    pub fn report(&self) -> &StatusTracker {
        &self.report
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.envelope.to_der()
    }
}

/// Extends CMS signatures to CAdES-BASELINE-LT.
///
/// An extension is a pure transformation: the input envelope is never
/// modified and a new envelope is returned. A single instance can serve
/// concurrent calls.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
///
/// use cades_lt::{
///     settings::Settings, CadesLevelBaselineLt, ExtensionParameters,
///     OfflineCertificateVerifier, SignedEnvelope,
/// };
///
/// # fn main() -> cades_lt::Result<()> {
/// let settings = Settings::from_toml(&std::fs::read_to_string("settings.toml").unwrap())?;
/// let verifier = OfflineCertificateVerifier::new(settings.trust.trust_anchors()?);
///
/// let extension = CadesLevelBaselineLt::new(&settings)?.with_verifier(Arc::new(verifier));
///
/// let envelope = SignedEnvelope::from_der(&std::fs::read("signed.p7s").unwrap())?;
/// let extended = extension.extend(&envelope, &ExtensionParameters::default())?;
/// std::fs::write("signed-lt.p7s", extended.to_der()?).unwrap();
/// # Ok(())
/// # }
/// ```
pub struct CadesLevelBaselineLt {
    verifier: Option<Arc<dyn CertificateVerifier>>,
    timestamper: Option<Box<dyn SignatureTimestamper>>,
    trust_anchors: TrustAnchors,
    settings: Extension,
}

impl CadesLevelBaselineLt {
    /// Create an extension configured by `settings`.
    ///
    /// A [`CertificateVerifier`] must be attached with
    /// [`with_verifier`](Self::with_verifier) before extending. A
    /// [`SignatureTimestamper`] is only needed for signatures that are not
    /// time-stamped yet.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            verifier: None,
            timestamper: None,
            trust_anchors: settings.trust.trust_anchors()?,
            settings: settings.extension.clone(),
        })
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn CertificateVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn with_timestamper(mut self, timestamper: Box<dyn SignatureTimestamper>) -> Self {
        self.timestamper = Some(timestamper);
        self
    }

    /// Replace the trust anchors loaded from the settings.
    pub fn with_trust_anchors(mut self, trust_anchors: TrustAnchors) -> Self {
        self.trust_anchors = trust_anchors;
        self
    }

    pub fn trust_anchors(&self) -> &TrustAnchors {
        &self.trust_anchors
    }

    /// Extend `envelope` to CAdES-BASELINE-LT.
    ///
    /// The targeted signers get a signature time-stamp if they lack one.
    /// Then every certificate and revocation proof needed to validate them
    /// up to a trust anchor is embedded. Material that is already present is
    /// kept and never duplicated. Extending an LT envelope again only adds
    /// what is missing.
    pub fn extend(
        &self,
        envelope: &SignedEnvelope,
        params: &ExtensionParameters,
    ) -> Result<ExtendedEnvelope> {
        let verifier = self
            .verifier
            .as_deref()
            .ok_or_else(|| Error::Configuration("no certificate verifier configured".into()))?;

        if self.trust_anchors.is_empty() {
            return Err(Error::Configuration("no trust anchors configured".into()));
        }

        let mut tracker = StatusTracker::with_error_behavior(ErrorBehavior::StopOnFirstError);

        let targets = self.targets(envelope, params)?;
        for signer in &targets {
            self.check_extendable(envelope, signer, params, &mut tracker)?;
        }

        let mut replacements = Vec::with_capacity(targets.len());
        for signer in targets {
            let updated = timestamp_stage::ensure_timestamped(
                envelope,
                &signer,
                params,
                self.timestamper.as_deref(),
                &mut tracker,
            )?;

            replacements.push(SignerReplacement {
                original: signer,
                updated,
            });
        }

        let upgraded: Vec<SignerInformation> = replacements
            .iter()
            .map(|replacement| replacement.updated.clone())
            .collect();

        let context = ValidationContext::build(
            envelope,
            &upgraded,
            verifier,
            &self.trust_anchors,
            self.settings.include_timestamp_validation_data,
            &mut tracker,
        )?;

        let mut certificates = CertificateStore::from_signed_data(envelope.signed_data());
        let added_certificates = certificates.merge(context.certificates(), &mut tracker);

        let mut revocations = RevocationStore::from_signed_data(envelope.signed_data());
        let added_revocations = revocations.merge(context.revocations(), &mut tracker)?;

        log::info!(
            "{} signer(s) extended: {added_certificates} certificate(s) and {added_revocations} revocation proof(s) added",
            replacements.len()
        );

        let extended = regenerate(
            envelope,
            &replacements,
            certificates.into_set(),
            revocations.into_set(),
            &mut tracker,
        )?;

        Ok(ExtendedEnvelope {
            envelope: extended,
            report: tracker,
        })
    }

    /// Decode, extend and re-encode a DER `ContentInfo`.
    pub fn extend_der(&self, der: &[u8], params: &ExtensionParameters) -> Result<Vec<u8>> {
        let envelope = SignedEnvelope::from_der(der)?;
        self.extend(&envelope, params)?.to_der()
    }

    fn targets(
        &self,
        envelope: &SignedEnvelope,
        params: &ExtensionParameters,
    ) -> Result<Vec<SignerInformation>> {
        let mut signers = envelope.signers();

        if signers.is_empty() {
            return Err(Error::Encoding("envelope has no signer".into()));
        }

        match params
            .signer_selection()
            .unwrap_or(self.settings.signer_selection)
        {
            SignerSelection::All => Ok(signers),
            SignerSelection::Last => Ok(signers.pop().into_iter().collect()),
        }
    }

    fn check_extendable(
        &self,
        envelope: &SignedEnvelope,
        signer: &SignerInformation,
        params: &ExtensionParameters,
        tracker: &mut StatusTracker,
    ) -> Result<()> {
        let level = envelope.level(signer);

        if level == SignatureLevel::Lta {
            if self.settings.reject_archived {
                return Err(log_item!(
                    signer.label(),
                    "signature carries an archive time-stamp",
                    "CadesLevelBaselineLt::extend"
                )
                .extension_status(LEVEL_ARCHIVAL)
                .failure_as_err(tracker, Error::LevelConflict { level }));
            }

            log::warn!(
                "{} is already {level}; adding long-term data anyway",
                signer.label()
            );
        }

        if let Some(content) = params.detached_content() {
            if let Some(expected) = signer.message_digest() {
                let digest = hash_by_oid(&signer.info().digest_algorithm.algorithm, content)
                    .ok_or_else(|| {
                        Error::Encoding(format!(
                            "unsupported digest algorithm {:?}",
                            signer.info().digest_algorithm.algorithm
                        ))
                    })?;

                if digest != expected {
                    return Err(Error::DetachedContentMismatch);
                }
            }
        }

        Ok(())
    }
}
