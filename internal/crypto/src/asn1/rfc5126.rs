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


//! CMS Advanced Electronic Signatures (CAdES), [RFC 5126] and
//! ETSI EN 319 122-1.
//!
//! [RFC 5126]: https://datatracker.ietf.org/doc/html/rfc5126

use rasn::types::Oid;

/// `id-aa-ets-archiveTimestamp` (version 1, obsolete).
pub const ID_AA_ETS_ARCHIVE_TIMESTAMP: &Oid =
    Oid::const_new(&[1, 2, 840, 113549, 1, 9, 16, 2, 27]);

/// `id-aa-ets-archiveTimestampV2`.
pub const ID_AA_ETS_ARCHIVE_TIMESTAMP_V2: &Oid =
    Oid::const_new(&[1, 2, 840, 113549, 1, 9, 16, 2, 48]);

/// `id-aa-ets-archiveTimestampV3` from ETSI EN 319 122-1.
pub const ID_AA_ETS_ARCHIVE_TIMESTAMP_V3: &Oid = Oid::const_new(&[0, 4, 0, 1733, 2, 4]);

/// All archive time-stamp attribute types. A signer carrying any of these is
/// at the archival (LTA) level.
pub const ARCHIVE_TIMESTAMP_ATTRIBUTES: [&Oid; 3] = [
    ID_AA_ETS_ARCHIVE_TIMESTAMP,
    ID_AA_ETS_ARCHIVE_TIMESTAMP_V2,
    ID_AA_ETS_ARCHIVE_TIMESTAMP_V3,
];
