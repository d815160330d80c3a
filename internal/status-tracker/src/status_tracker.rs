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


use std::{fmt::Debug, iter::Iterator};

use log::{info, warn};

use crate::LogItem;

/// A `StatusTracker` is used by the signature extension pipeline to control
/// error-handling behavior and to aggregate a report of what was embedded as
/// the pipeline runs.
#[derive(Debug, Default)]
pub struct StatusTracker {
    error_behavior: ErrorBehavior,
    logged_items: Vec<LogItem>,
}

impl StatusTracker {
    /// Returns a [`StatusTracker`] with the specified [`ErrorBehavior`].
    pub fn with_error_behavior(error_behavior: ErrorBehavior) -> Self {
        Self {
            error_behavior,
            logged_items: vec![],
        }
    }

    /// Returns the current list of log items.
    pub fn logged_items(&self) -> &[LogItem] {
        &self.logged_items
    }

    /// Appends the contents of another [`StatusTracker`] to this list of
    /// log items.
    pub fn append(&mut self, other: &StatusTracker) {
        self.logged_items
            .extend(other.logged_items().iter().cloned());
    }

    /// Adds a non-error [`LogItem`] to this status tracker.
    ///
    /// Primarily intended for use by [`LogItem::success()`]
    /// or [`LogItem::informational()`].
    pub fn add_non_error(&mut self, log_item: LogItem) {
        info!(
            "{}: {} ({})",
            log_item.extension_status.as_deref().unwrap_or("-"),
            log_item.description,
            log_item.label
        );
        self.logged_items.push(log_item);
    }

    /// Adds an error-case [`LogItem`] to this status tracker.
    ///
    /// Will return `Err(err)` if configured to stop immediately on errors or
    /// `Ok(err)` if configured to continue on errors. _(See [`ErrorBehavior`].)_
    pub fn add_error<E>(&mut self, log_item: LogItem, err: E) -> Result<E, E> {
        warn!(
            "{}: {} ({})",
            log_item.extension_status.as_deref().unwrap_or("-"),
            log_item.description,
            log_item.err_val.as_deref().unwrap_or_default()
        );
        self.logged_items.push(log_item);

        match self.error_behavior {
            ErrorBehavior::StopOnFirstError => Err(err),
            ErrorBehavior::ContinueWhenPossible => Ok(err),
        }
    }

    /// Returns the [`LogItem`]s that have error conditions (`err_val` is
    /// populated).
    pub fn filter_errors(&self) -> impl Iterator<Item = &LogItem> {
        self.logged_items()
            .iter()
            .filter(|item| item.err_val.is_some())
    }

    /// Returns `true` if the log contains a specific extension status code.
    pub fn has_status(&self, val: &str) -> bool {
        self.count_status(val) > 0
    }

    /// Returns the number of log items carrying a specific extension status
    /// code.
    pub fn count_status(&self, val: &str) -> usize {
        self.logged_items()
            .iter()
            .filter(|item| item.extension_status.as_deref() == Some(val))
            .count()
    }

    /// Returns `true` if the log contains a specific error.
    pub fn has_error<E: Debug>(&self, err: E) -> bool {
        let err_type = format!("{:?}", &err);
        self.logged_items()
            .iter()
            .any(|item| item.err_val.as_deref() == Some(err_type.as_str()))
    }

    /// Returns `true` if the log contains any error.
    pub fn has_any_error(&self) -> bool {
        self.filter_errors().next().is_some()
    }
}

/// `ErrorBehavior` configures the behavior of [`StatusTracker`] when its
/// [`add_error`] function is called.
///
/// [`add_error`]: StatusTracker::add_error
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorBehavior {
    /// If an error is encountered, stop immediately.
    #[default]
    StopOnFirstError,

    /// If an error is encountered, log it and continue as much as possible.
    ContinueWhenPossible,
}
