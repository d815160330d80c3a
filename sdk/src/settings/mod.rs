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


//! Settings for configuring signature extension.
//!
//! Settings are plain values. They are loaded from TOML or JSON, overlaid on
//! the defaults, and handed to [`CadesLevelBaselineLt::new`]. Nothing is
//! stored in thread-local or process-wide state.
//!
//! [`CadesLevelBaselineLt::new`]: crate::CadesLevelBaselineLt::new

use cades_crypto::TrustAnchors;
use config::{Config, FileFormat};
use serde_derive::{Deserialize, Serialize};

use crate::{Error, Result};

const VERSION: u32 = 1;

// validates user supplied configuration
pub(crate) trait SettingsValidate {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Settings to configure the trust list.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Trust {
    /// Trust anchor root certificates as a PEM bundle.
    pub trust_anchors: Option<String>,

    /// Explicitly allowed end-entity certificates, either as a PEM bundle or
    /// as lines holding the base64 encoding of the SHA-256 hash of a
    /// certificate's DER encoding.
    pub allowed_list: Option<String>,
}

impl Trust {
    /// Build the [`TrustAnchors`] described by these settings.
    pub fn trust_anchors(&self) -> Result<TrustAnchors> {
        let mut anchors = TrustAnchors::new();

        if let Some(pems) = &self.trust_anchors {
            anchors.add_trust_anchors(pems.as_bytes())?;
        }

        if let Some(allowed) = &self.allowed_list {
            anchors.add_end_entity_credentials(allowed.as_bytes())?;
        }

        Ok(anchors)
    }
}

impl SettingsValidate for Trust {
    fn validate(&self) -> Result<()> {
        let anchors = self.trust_anchors()?;

        if self.trust_anchors.is_some() && anchors.iter().next().is_none() {
            return Err(Error::Configuration(
                "trust_anchors holds no certificate".to_string(),
            ));
        }

        Ok(())
    }
}

/// Which signer records an extension call targets.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerSelection {
    /// Only the last signer in DER order.
    #[default]
    Last,

    /// Every signer.
    All,
}

/// Settings to configure the extension pipeline.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Extension {
    /// Refuse to touch a signature that already carries an archive
    /// time-stamp.
    ///
    /// The default value is true.
    pub reject_archived: bool,

    /// Signer records to extend.
    ///
    /// The default value is [`SignerSelection::Last`].
    pub signer_selection: SignerSelection,

    /// Also embed the certificates and revocation data needed to validate
    /// the signature time-stamp tokens.
    ///
    /// The default value is false. With the default, only the chains of the
    /// targeted signers are embedded, so an extended envelope holds exactly
    /// the signer chain and its proofs. The TSA certificate then travels only
    /// inside the time-stamp token and its revocation status is not
    /// captured. Turn this on to make the time-stamp verifiable long-term as
    /// well.
    pub include_timestamp_validation_data: bool,
}

impl Default for Extension {
    fn default() -> Self {
        Self {
            reject_archived: true,
            signer_selection: SignerSelection::Last,
            include_timestamp_validation_data: false,
        }
    }
}

impl SettingsValidate for Extension {}

/// Settings for configuring all aspects of signature extension.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Settings {
    /// Version of the configuration.
    pub version: u32,

    /// Settings for configuring the trust list.
    pub trust: Trust,

    /// Settings for configuring the extension pipeline.
    pub extension: Extension,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: VERSION,
            trust: Trust::default(),
            extension: Extension::default(),
        }
    }
}

impl Settings {
    /// Load settings from a string, overlaid on the defaults.
    ///
    /// `format` is either `"json"` or `"toml"`.
    pub fn from_string(settings_str: &str, format: &str) -> Result<Self> {
        let mut settings = Self::default();
        settings.update_from_str(settings_str, format)?;
        Ok(settings)
    }

    /// Load settings from TOML, overlaid on the defaults.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::from_string(toml, "toml")
    }

    /// Update this `Settings` instance from a string representation.
    ///
    /// Only the values present in `settings_str` change. The result is
    /// validated before it replaces the current settings.
    ///
    /// # Example
    /// ```
    /// use cades_lt::settings::{Settings, SignerSelection};
    ///
    /// let mut settings = Settings::default();
    /// settings
    ///     .update_from_str(
    ///         r#"
    ///     [extension]
    ///     signer_selection = "all"
    /// "#,
    ///         "toml",
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(settings.extension.signer_selection, SignerSelection::All);
    /// assert!(settings.extension.reject_archived);
    /// ```
    pub fn update_from_str(&mut self, settings_str: &str, format: &str) -> Result<()> {
        let file_format = match format.to_lowercase().as_str() {
            "json" => FileFormat::Json,
            "toml" => FileFormat::Toml,
            _ => {
                return Err(Error::Configuration(format!(
                    "unsupported settings format: {format}"
                )))
            }
        };

        let current_config = Config::try_from(&*self)
            .map_err(|e| Error::Configuration(format!("could not convert settings: {e}")))?;

        let merged_config = Config::builder()
            .add_source(current_config)
            .add_source(config::File::from_str(settings_str, file_format))
            .build()
            .map_err(|e| Error::Configuration(format!("could not merge configuration: {e}")))?;

        let updated_settings = merged_config
            .try_deserialize::<Settings>()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        updated_settings.validate()?;

        *self = updated_settings;
        Ok(())
    }
}

impl SettingsValidate for Settings {
    fn validate(&self) -> Result<()> {
        if self.version > VERSION {
            return Err(Error::Configuration("settings version too new".into()));
        }

        self.trust.validate()?;
        self.extension.validate()
    }
}
