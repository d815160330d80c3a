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


//! Additional CMS revocation information choices, [RFC 5940].
//!
//! [RFC 5940]: https://datatracker.ietf.org/doc/html/rfc5940

use rasn::types::Oid;

/// `id-ri-ocsp-response`: an `OtherRevocationInfoFormat` holding a complete
/// `OCSPResponse`.
pub const ID_RI_OCSP_RESPONSE: &Oid = Oid::const_new(&[1, 3, 6, 1, 5, 5, 7, 16, 2]);
