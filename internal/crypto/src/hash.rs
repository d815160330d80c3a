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


//! Hash convenience functions.

use rasn::types::Oid;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// SHA-1 algorithm identifier.
pub const SHA1_OID: &Oid = Oid::const_new(&[1, 3, 14, 3, 2, 26]);

/// SHA-256 algorithm identifier.
pub const SHA256_OID: &Oid = Oid::const_new(&[2, 16, 840, 1, 101, 3, 4, 2, 1]);

/// SHA-384 algorithm identifier.
pub const SHA384_OID: &Oid = Oid::const_new(&[2, 16, 840, 1, 101, 3, 4, 2, 2]);

/// SHA-512 algorithm identifier.
pub const SHA512_OID: &Oid = Oid::const_new(&[2, 16, 840, 1, 101, 3, 4, 2, 3]);

/// Given a byte slice, return the SHA-1 hash of that content.
pub fn sha1(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha1::default();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Given a byte slice, return the SHA-256 hash of that content.
pub fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// Hash `data` with the algorithm named by `alg`.
///
/// Returns `None` if the algorithm is not one of SHA-1, SHA-256, SHA-384 or
/// SHA-512.
pub fn hash_by_oid(alg: &Oid, data: &[u8]) -> Option<Vec<u8>> {
    if alg == SHA1_OID {
        Some(sha1(data))
    } else if alg == SHA256_OID {
        Some(sha256(data))
    } else if alg == SHA384_OID {
        Some(Sha384::digest(data).to_vec())
    } else if alg == SHA512_OID {
        Some(Sha512::digest(data).to_vec())
    } else {
        None
    }
}
