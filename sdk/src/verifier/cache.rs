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

use std::{
    collections::{HashMap, VecDeque},
    hash::Hash,
    sync::{PoisonError, RwLock},
};

use cades_crypto::{CertificateToken, RevocationToken, TokenId};

use crate::{verifier::CertificateVerifier, Result};

/// Number of chains, and of revocation answers, a cache keeps by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Caches the answers of another [`CertificateVerifier`] across extension
/// calls.
///
/// The cache may be shared by extension calls running in parallel. Each of
/// its two maps holds at most `capacity` entries; once full, the oldest entry
/// is evicted. Cached revocation proofs are only served while all of them
/// are still current. A stale answer is dropped and fetched again.
#[derive(Debug)]
pub struct CachingCertificateVerifier<V> {
    inner: V,
    chains: RwLock<BoundedMap<TokenId, Vec<CertificateToken>>>,
    revocations: RwLock<BoundedMap<(TokenId, TokenId), Vec<RevocationToken>>>,
}

impl<V: CertificateVerifier> CachingCertificateVerifier<V> {
    pub fn new(inner: V) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// A cache keeping at most `capacity` chains and `capacity` revocation
    /// answers. A capacity of zero is treated as one.
    pub fn with_capacity(inner: V, capacity: usize) -> Self {
        Self {
            inner,
            chains: RwLock::new(BoundedMap::new(capacity)),
            revocations: RwLock::new(BoundedMap::new(capacity)),
        }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Number of cached chains.
    pub fn cached_chains(&self) -> usize {
        self.chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of cached revocation answers.
    pub fn cached_revocations(&self) -> usize {
        self.revocations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop every cached answer.
    pub fn clear(&self) {
        self.chains
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.revocations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<V: CertificateVerifier> CertificateVerifier for CachingCertificateVerifier<V> {
    fn build_chain(&self, cert: &CertificateToken) -> Result<Vec<CertificateToken>> {
        if let Some(chain) = self
            .chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cert.id())
        {
            return Ok(chain.clone());
        }

        let chain = self.inner.build_chain(cert)?;

        self.chains
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cert.id(), chain.clone());

        Ok(chain)
    }

    fn revocation_for(
        &self,
        cert: &CertificateToken,
        issuer: &CertificateToken,
    ) -> Result<Vec<RevocationToken>> {
        let key = (cert.id(), issuer.id());

        let stale = match self
            .revocations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            Some(proofs) if proofs.iter().all(RevocationToken::is_current) => {
                return Ok(proofs.clone());
            }
            Some(_) => true,
            None => false,
        };

        if stale {
            log::debug!("dropping stale revocation data for {}", cert.subject_string());
            self.revocations
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key);
        }

        let proofs = self.inner.revocation_for(cert, issuer)?;

        // unavailable now does not mean unavailable later
        if !proofs.is_empty() {
            log::debug!(
                "caching {} revocation proof(s) for {}",
                proofs.len(),
                cert.subject_string()
            );
            self.revocations
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key, proofs.clone());
        }

        Ok(proofs)
    }
}

/// A map holding at most `capacity` entries, evicting in insertion order.
#[derive(Debug)]
struct BoundedMap<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K: Clone + Eq + Hash, V> BoundedMap<K, V> {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, key: K, value: V) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    fn remove(&mut self, key: &K) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
