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


//! Online Certificate Status Protocol, [RFC 6960].
//!
//! [RFC 6960]: https://datatracker.ietf.org/doc/html/rfc6960

use rasn::types::Oid;

/// `id-pkix-ocsp-basic`: response type of a `BasicOCSPResponse`. Also used as
/// the `OtherRevocationInfoFormat` type when a basic response is embedded in
/// CMS signed data.
pub const ID_PKIX_OCSP_BASIC: &Oid = Oid::const_new(&[1, 3, 6, 1, 5, 5, 7, 48, 1, 1]);

/// `id-pkix-ocsp-nocheck`: certificate extension marking an OCSP responder
/// certificate that need not be checked for revocation.
pub const ID_PKIX_OCSP_NOCHECK: &Oid = Oid::const_new(&[1, 3, 6, 1, 5, 5, 7, 48, 1, 5]);
