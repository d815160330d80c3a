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

use cades_crypto::asn1::{
    rfc3161::ID_AA_SIGNATURE_TIME_STAMP_TOKEN, rfc5126::ARCHIVE_TIMESTAMP_ATTRIBUTES,
    rfc5652::ID_MESSAGE_DIGEST,
};
use rasn::types::{Any, ObjectIdentifier, OctetString, Oid, SetOf};
use rasn_cms::SignerInfo;
use rasn_pkix::Attribute;

use crate::Result;

/// A single signer record of a signed envelope.
#[derive(Clone)]
pub struct SignerInformation {
    info: SignerInfo,
}

impl SignerInformation {
    pub fn new(info: SignerInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &SignerInfo {
        &self.info
    }

    pub fn into_info(self) -> SignerInfo {
        self.info
    }

    /// The raw signature octets.
    pub fn signature_value(&self) -> &[u8] {
        &self.info.signature
    }

    /// Short label identifying this signer in reports.
    pub fn label(&self) -> String {
        let hex = hex::encode(self.signature_value());
        format!("signature:{}", &hex[..hex.len().min(16)])
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(rasn::der::encode(&self.info)?)
    }

    /// Values of every signed attribute of type `oid`.
    pub fn signed_attribute_values(&self, oid: &Oid) -> Vec<&Any> {
        attribute_values(self.info.signed_attrs.as_ref(), oid)
    }

    /// Values of every unsigned attribute of type `oid`.
    pub fn unsigned_attribute_values(&self, oid: &Oid) -> Vec<&Any> {
        attribute_values(self.info.unsigned_attrs.as_ref(), oid)
    }

    /// DER encodings of the embedded signature time-stamp tokens.
    pub fn signature_timestamp_tokens(&self) -> Vec<Vec<u8>> {
        self.unsigned_attribute_values(ID_AA_SIGNATURE_TIME_STAMP_TOKEN)
            .into_iter()
            .map(|value| value.as_bytes().to_vec())
            .collect()
    }

    pub fn has_signature_timestamp(&self) -> bool {
        !self
            .unsigned_attribute_values(ID_AA_SIGNATURE_TIME_STAMP_TOKEN)
            .is_empty()
    }

    pub fn has_archive_timestamp(&self) -> bool {
        ARCHIVE_TIMESTAMP_ATTRIBUTES
            .iter()
            .any(|oid| !self.unsigned_attribute_values(oid).is_empty())
    }

    /// The signed `message-digest` attribute, if present and well formed.
    pub fn message_digest(&self) -> Option<Vec<u8>> {
        self.signed_attribute_values(ID_MESSAGE_DIGEST)
            .first()
            .and_then(|value| rasn::der::decode::<OctetString>(value.as_bytes()).ok())
            .map(|digest| digest.to_vec())
    }

    /// Returns a copy of this signer with an additional unsigned attribute.
    ///
    /// `value_der` is the DER encoding of the single attribute value.
    /// Existing attributes of the same type are kept.
    pub fn with_unsigned_attribute(&self, oid: &'static Oid, value_der: Vec<u8>) -> Self {
        let mut values = SetOf::new();
        values.insert(Any::new(value_der));

        let mut info = self.info.clone();
        let mut unsigned_attrs = info.unsigned_attrs.take().unwrap_or_else(SetOf::new);
        unsigned_attrs.insert(Attribute {
            r#type: ObjectIdentifier::from(oid),
            values,
        });
        info.unsigned_attrs = Some(unsigned_attrs);

        Self { info }
    }
}

fn attribute_values<'a>(attrs: Option<&'a SetOf<Attribute>>, oid: &Oid) -> Vec<&'a Any> {
    attrs
        .map(|attrs| attrs.to_vec())
        .unwrap_or_default()
        .into_iter()
        .filter(|attr| *attr.r#type == *oid)
        .flat_map(|attr| attr.values.to_vec())
        .collect()
}

impl fmt::Debug for SignerInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerInformation")
            .field("signature", &hex::encode(self.signature_value()))
            .field("signature_timestamps", &self.signature_timestamp_tokens().len())
            .finish()
    }
}
