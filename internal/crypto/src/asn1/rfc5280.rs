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


//! Certificate extension identifiers from [RFC 5280].
//!
//! [RFC 5280]: https://datatracker.ietf.org/doc/html/rfc5280

use rasn::types::Oid;

/// `id-ce-subjectKeyIdentifier`
pub const ID_CE_SUBJECT_KEY_IDENTIFIER: &Oid = Oid::const_new(&[2, 5, 29, 14]);

/// `id-ce-authorityKeyIdentifier`
pub const ID_CE_AUTHORITY_KEY_IDENTIFIER: &Oid = Oid::const_new(&[2, 5, 29, 35]);

/// `id-ce-basicConstraints`
pub const ID_CE_BASIC_CONSTRAINTS: &Oid = Oid::const_new(&[2, 5, 29, 19]);
