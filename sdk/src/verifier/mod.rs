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


//! The chain-building and revocation-fetching capability consumed by the
//! extension pipeline.

use std::sync::Arc;

use cades_crypto::{CertificateToken, RevocationToken};

use crate::Result;

mod cache;
pub use cache::{CachingCertificateVerifier, DEFAULT_CACHE_CAPACITY};

mod offline;
pub use offline::OfflineCertificateVerifier;

/// Builds certificate chains and obtains revocation proofs.
///
/// Implementations typically perform blocking network operations (AIA
/// certificate retrieval, CRL download, OCSP queries). They own any timeout,
/// retry and cancellation policy. The extension pipeline calls each method
/// at most once per certificate per extension call.
pub trait CertificateVerifier: Send + Sync {
    /// Build the chain of `cert`.
    ///
    /// The returned chain starts with `cert` and ends with the certificate
    /// closest to a trust anchor that could be found (ideally the anchor
    /// itself).
    fn build_chain(&self, cert: &CertificateToken) -> Result<Vec<CertificateToken>>;

    /// Obtain revocation proofs for `cert`, issued by `issuer`.
    ///
    /// An empty result means no proof is available.
    fn revocation_for(
        &self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Result<Vec<RevocationToken>>;
}

impl<T: CertificateVerifier + ?Sized> CertificateVerifier for Arc<T> {
    fn build_chain(&self, cert: &CertificateToken) -> Result<Vec<CertificateToken>> {
        (**self).build_chain(cert)
    }

    fn revocation_for(
        &self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Result<Vec<RevocationToken>> {
        (**self).revocation_for(cert, issuer)
    }
}
