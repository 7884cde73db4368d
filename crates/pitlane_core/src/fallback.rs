//! Ordered fallback across alternative data sources.
//!
//! Each attempt is a labelled closure. Attempts run strictly one after
//! another and the first success wins; failures are logged and swallowed
//! until none are left.
//!
//! ```rust
//! use pitlane_core::error::AppError;
//! use pitlane_core::fallback::{Attempt, first_success};
//!
//! let attempts: Vec<Attempt<'_, u32>> = vec![
//!     Attempt::new("primary", || Err(AppError::io("connection refused"))),
//!     Attempt::new("mirror", || Ok(7)),
//! ];
//! assert_eq!(first_success(attempts).unwrap(), 7);
//! ```

use crate::error::AppError;
use tracing::{debug, warn};

pub struct Attempt<'a, T> {
    label: String,
    run: Box<dyn FnOnce() -> Result<T, AppError> + 'a>,
}

impl<'a, T> Attempt<'a, T> {
    pub fn new<L, F>(label: L, run: F) -> Self
    where
        L: Into<String>,
        F: FnOnce() -> Result<T, AppError> + 'a,
    {
        Self {
            label: label.into(),
            run: Box::new(run),
        }
    }
}

/// Runs `attempts` in order and returns the first `Ok`.
///
/// Fails with [`AppError::AllEndpointsFailed`] when every attempt fails or
/// when there is nothing to try.
pub fn first_success<'a, T, I>(attempts: I) -> Result<T, AppError>
where
    I: IntoIterator<Item = Attempt<'a, T>>,
{
    let mut tried = 0usize;
    let mut last_error: Option<AppError> = None;

    for attempt in attempts {
        tried += 1;
        let Attempt { label, run } = attempt;
        match run() {
            Ok(value) => {
                debug!(source = %label, tried, "fallback attempt succeeded");
                return Ok(value);
            }
            Err(err) => {
                warn!(source = %label, error = %err, "fallback attempt failed");
                last_error = Some(err);
            }
        }
    }

    Err(match last_error {
        Some(err) => AppError::all_endpoints_failed(format!(
            "all {tried} sources failed; last error: {err}"
        )),
        None => AppError::all_endpoints_failed("no sources configured"),
    })
}
