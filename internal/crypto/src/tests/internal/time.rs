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


use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use x509_parser::time::ASN1Time;

use crate::internal::time::{asn1_time_to_utc, generalized_time_to_utc, utc_now};

#[test]
fn now() {
    let time_now = utc_now();
    let unix_ts = time_now.timestamp();
    assert!(unix_ts > 1_731_560_000); // 2024-11-14T04:53:00Z
}

#[test]
fn converts_generalized_time_offsets() {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let local: DateTime<FixedOffset> = offset.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    assert_eq!(
        generalized_time_to_utc(&local),
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
    );
}

#[test]
fn converts_x509_times() {
    let utc = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let time = ASN1Time::from_timestamp(utc.timestamp()).unwrap();

    assert_eq!(asn1_time_to_utc(time), Some(utc));
}
