//! Version normalization.
//!
//! Turns free-form version strings into an optional major version number.
//! Nothing in here touches the filesystem or fails: unparseable input is
//! reported as `None`.
//!
//! - [`min_major_of_range`] reads a range (`engines.node`) and returns the
//!   major of the lowest version it accepts.
//! - [`major_of_specifier`] reads a single dependency specifier
//!   (`@types/node`, `volta.node`, `.nvmrc`) and returns its major.

pub mod coerce;
pub mod range;

pub use coerce::coerce_major;
pub use range::{Range, RangeError};

use tracing::trace;

/// Major version of the lowest version satisfying `range`.
///
/// Falls back to [`coerce_major`] when the range does not parse or
/// cannot be satisfied.
///
/// ```
/// use check_node_types::version::min_major_of_range;
///
/// assert_eq!(min_major_of_range(">=18 <22"), Some(18));
/// assert_eq!(min_major_of_range(">=18.0.0 || >=20.0.0"), Some(18));
/// assert_eq!(min_major_of_range(""), Some(0));
/// assert_eq!(min_major_of_range("not-a-version"), None);
/// ```
pub fn min_major_of_range(range: &str) -> Option<u64> {
    match Range::parse(range) {
        Ok(parsed) => {
            if let Some(min) = parsed.min_version() {
                return Some(min.major);
            }
            trace!(range, "range is unsatisfiable, coercing");
        }
        Err(err) => trace!(range, error = %err, "range did not parse, coercing"),
    }
    coerce_major(range)
}

/// Major version named by a dependency specifier.
///
/// `*` and `latest` are explicitly unconstrained and never coerce to a
/// number.
pub fn major_of_specifier(specifier: &str) -> Option<u64> {
    if specifier == "*" || specifier == "latest" {
        return None;
    }
    coerce_major(specifier)
}
