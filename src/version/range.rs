//! npm-style version ranges.
//!
//! Only the parts needed to find the lowest version a range accepts are
//! implemented: comparator desugaring, satisfaction tests, and
//! [`Range::min_version`].
//!
//! Handles:
//! - Primitive comparators: `<`, `<=`, `>`, `>=`, `=`
//! - Caret and tilde ranges: `^1.2.3`, `~1.2.3`, `~>1.2`
//! - X-ranges and partial versions: `1.x`, `1.2.*`, `1`, `*`
//! - Hyphen ranges: `1.2.3 - 2.3.4`
//! - Space-separated conjunctions and `||` disjunctions

use std::sync::LazyLock;

use regex::Regex;
use semver::{Prerelease, Version};
use thiserror::Error;

/// Largest component npm accepts (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// A single comparator token, with an optional operator.
static COMPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(<=|>=|<|>|=|~>|~|\^)?v?",
        r"(\*|[xX]|0|[1-9][0-9]*)",
        r"(?:\.(\*|[xX]|0|[1-9][0-9]*)",
        r"(?:\.(\*|[xX]|0|[1-9][0-9]*)",
        r"(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?",
        r"(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?",
        r")?)?$"
    ))
    .expect("COMPARATOR_REGEX must compile")
});

/// `A - B`, both sides plain (operator-free) versions.
static HYPHEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+-\s+(\S+)$").expect("HYPHEN_REGEX must compile"));

/// Whitespace between an operator and its version (`>= 1.2`).
static OPERATOR_GAP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<=|>=|<|>|=|~>|~|\^)\s+").expect("OPERATOR_GAP_REGEX must compile")
});

/// Errors produced while parsing a range string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A whitespace-separated token is not a comparator.
    #[error("invalid comparator '{0}'")]
    InvalidComparator(String),

    /// A numeric component exceeds the safe integer limit.
    #[error("version component too large in '{0}'")]
    ComponentTooLarge(String),

    /// The pre-release tag is not a valid semver pre-release.
    #[error("invalid pre-release '{0}'")]
    InvalidPrerelease(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

/// A primitive comparator after desugaring.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn test(&self, version: &Version) -> bool {
        match self.op {
            Op::Lt => version < &self.version,
            Op::Le => version <= &self.version,
            Op::Gt => version > &self.version,
            Op::Ge => version >= &self.version,
            Op::Eq => version == &self.version,
        }
    }
}

/// Conjunction of comparators. An empty set accepts every release version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ComparatorSet {
    comparators: Vec<Comparator>,
}

impl ComparatorSet {
    fn test(&self, version: &Version) -> bool {
        if !self.comparators.iter().all(|c| c.test(version)) {
            return false;
        }

        if version.pre.is_empty() {
            return true;
        }

        // A pre-release only matches when some comparator opts into
        // pre-releases of the very same major.minor.patch.
        self.comparators.iter().any(|c| {
            !c.version.pre.is_empty()
                && c.version.major == version.major
                && c.version.minor == version.minor
                && c.version.patch == version.patch
        })
    }

    /// Lowest lower bound in this set, if any comparator provides one.
    fn lower_bound(&self) -> Result<Option<Version>, RangeError> {
        let mut lowest: Option<Version> = None;
        for comparator in &self.comparators {
            let candidate = match comparator.op {
                Op::Gt => {
                    let mut bumped = comparator.version.clone();
                    if bumped.pre.is_empty() {
                        bumped.patch += 1;
                    } else {
                        bumped.pre = prerelease(&format!("{}.0", bumped.pre))?;
                    }
                    bumped
                }
                Op::Ge | Op::Eq => comparator.version.clone(),
                Op::Lt | Op::Le => continue,
            };
            if lowest.as_ref().map_or(true, |current| candidate > *current) {
                lowest = Some(candidate);
            }
        }
        Ok(lowest)
    }
}

/// A parsed range: a disjunction of comparator sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    sets: Vec<ComparatorSet>,
}

impl Range {
    /// Parse an npm range string. Surrounding whitespace is ignored and the
    /// empty string accepts everything.
    pub fn parse(text: &str) -> Result<Self, RangeError> {
        let sets = text
            .trim()
            .split("||")
            .map(|set| parse_set(set.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sets })
    }

    /// Whether `version` satisfies any comparator set.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set.test(version))
    }

    /// The lowest version satisfying the range, across every `||` clause.
    ///
    /// Returns `None` when the range cannot be satisfied.
    pub fn min_version(&self) -> Option<Version> {
        let zero = Version::new(0, 0, 0);
        if self.satisfies(&zero) {
            return Some(zero);
        }

        let zero_pre = Version {
            pre: Prerelease::new("0").ok()?,
            ..Version::new(0, 0, 0)
        };
        if self.satisfies(&zero_pre) {
            return Some(zero_pre);
        }

        let mut min: Option<Version> = None;
        for set in &self.sets {
            let Ok(Some(bound)) = set.lower_bound() else {
                continue;
            };
            if min.as_ref().map_or(true, |current| *current > bound) {
                min = Some(bound);
            }
        }

        min.filter(|candidate| self.satisfies(candidate))
    }
}

/// A version as written, where `None` components are wildcards.
///
/// Once a component is a wildcard every later component is too.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn is_wildcard(&self) -> bool {
        self.patch.is_none()
    }
}

fn parse_set(text: &str) -> Result<ComparatorSet, RangeError> {
    if let Some(captures) = HYPHEN_REGEX.captures(text) {
        let (from, to) = (&captures[1], &captures[2]);
        let (from_op, from) = parse_comparator(from)?;
        let (to_op, to) = parse_comparator(to)?;
        if from_op.is_none() && to_op.is_none() {
            return Ok(ComparatorSet {
                comparators: hyphen(&from, &to)?,
            });
        }
    }

    let text = OPERATOR_GAP_REGEX.replace_all(text, "$1");
    let mut comparators = Vec::new();
    for token in text.split_whitespace() {
        let (op, partial) = parse_comparator(token)?;
        let desugared = match op {
            Some("^") => caret(&partial)?,
            Some("~") | Some("~>") => tilde(&partial)?,
            Some("<") => xrange(Some(Op::Lt), &partial)?,
            Some("<=") => xrange(Some(Op::Le), &partial)?,
            Some(">") => xrange(Some(Op::Gt), &partial)?,
            Some(">=") => xrange(Some(Op::Ge), &partial)?,
            Some("=") => xrange(Some(Op::Eq), &partial)?,
            _ => xrange(None, &partial)?,
        };
        comparators.extend(desugared);
    }
    Ok(ComparatorSet { comparators })
}

fn parse_comparator(token: &str) -> Result<(Option<&str>, Partial), RangeError> {
    let captures = COMPARATOR_REGEX
        .captures(token)
        .ok_or_else(|| RangeError::InvalidComparator(token.to_string()))?;

    let component = |index: usize| -> Result<Option<u64>, RangeError> {
        match captures.get(index).map(|m| m.as_str()) {
            None | Some("*") | Some("x") | Some("X") => Ok(None),
            Some(digits) => digits
                .parse::<u64>()
                .ok()
                .filter(|n| *n <= MAX_SAFE_INTEGER)
                .map(Some)
                .ok_or_else(|| RangeError::ComponentTooLarge(token.to_string())),
        }
    };

    let major = component(2)?;
    let minor = major.and(component(3)?);
    let patch = minor.and(component(4)?);
    let pre = match (patch, captures.get(5)) {
        (Some(_), Some(tag)) => prerelease(tag.as_str())?,
        _ => Prerelease::EMPTY,
    };

    let op = captures.get(1).map(|m| m.as_str());
    Ok((
        op,
        Partial {
            major,
            minor,
            patch,
            pre,
        },
    ))
}

fn prerelease(tag: &str) -> Result<Prerelease, RangeError> {
    Prerelease::new(tag).map_err(|_| RangeError::InvalidPrerelease(tag.to_string()))
}

fn version(major: u64, minor: u64, patch: u64, pre: Prerelease) -> Version {
    Version {
        pre,
        ..Version::new(major, minor, patch)
    }
}

fn at_least(major: u64, minor: u64, patch: u64, pre: Prerelease) -> Comparator {
    Comparator {
        op: Op::Ge,
        version: version(major, minor, patch, pre),
    }
}

/// `<major.minor.patch-0`, excluding every pre-release of that version.
fn below(major: u64, minor: u64, patch: u64) -> Result<Comparator, RangeError> {
    Ok(Comparator {
        op: Op::Lt,
        version: version(major, minor, patch, prerelease("0")?),
    })
}

fn caret(p: &Partial) -> Result<Vec<Comparator>, RangeError> {
    let none = Prerelease::EMPTY;
    Ok(match (p.major, p.minor, p.patch) {
        (None, _, _) => Vec::new(),
        (Some(major), None, _) => vec![at_least(major, 0, 0, none), below(major + 1, 0, 0)?],
        (Some(0), Some(minor), None) => vec![at_least(0, minor, 0, none), below(0, minor + 1, 0)?],
        (Some(major), Some(minor), None) => {
            vec![at_least(major, minor, 0, none), below(major + 1, 0, 0)?]
        }
        (Some(0), Some(0), Some(patch)) => {
            vec![at_least(0, 0, patch, p.pre.clone()), below(0, 0, patch + 1)?]
        }
        (Some(0), Some(minor), Some(patch)) => {
            vec![at_least(0, minor, patch, p.pre.clone()), below(0, minor + 1, 0)?]
        }
        (Some(major), Some(minor), Some(patch)) => {
            vec![at_least(major, minor, patch, p.pre.clone()), below(major + 1, 0, 0)?]
        }
    })
}

fn tilde(p: &Partial) -> Result<Vec<Comparator>, RangeError> {
    let none = Prerelease::EMPTY;
    Ok(match (p.major, p.minor, p.patch) {
        (None, _, _) => Vec::new(),
        (Some(major), None, _) => vec![at_least(major, 0, 0, none), below(major + 1, 0, 0)?],
        (Some(major), Some(minor), None) => {
            vec![at_least(major, minor, 0, none), below(major, minor + 1, 0)?]
        }
        (Some(major), Some(minor), Some(patch)) => {
            vec![at_least(major, minor, patch, p.pre.clone()), below(major, minor + 1, 0)?]
        }
    })
}

fn xrange(op: Option<Op>, p: &Partial) -> Result<Vec<Comparator>, RangeError> {
    let op = match op {
        Some(Op::Eq) if p.is_wildcard() => None,
        other => other,
    };

    let Some(major) = p.major else {
        return Ok(match op {
            // Nothing is allowed.
            Some(Op::Gt) | Some(Op::Lt) => vec![below(0, 0, 0)?],
            _ => Vec::new(),
        });
    };

    match (op, p.minor, p.patch) {
        (Some(op), minor, None) => {
            let (mut major, mut minor) = (major, minor.unwrap_or(0));
            let op = match op {
                Op::Gt => {
                    if p.minor.is_none() {
                        major += 1;
                        minor = 0;
                    } else {
                        minor += 1;
                    }
                    Op::Ge
                }
                Op::Le => {
                    if p.minor.is_none() {
                        major += 1;
                    } else {
                        minor += 1;
                    }
                    Op::Lt
                }
                other => other,
            };
            if op == Op::Lt {
                Ok(vec![below(major, minor, 0)?])
            } else {
                Ok(vec![Comparator {
                    op,
                    version: Version::new(major, minor, 0),
                }])
            }
        }
        (None, None, _) => Ok(vec![
            at_least(major, 0, 0, Prerelease::EMPTY),
            below(major + 1, 0, 0)?,
        ]),
        (None, Some(minor), None) => Ok(vec![
            at_least(major, minor, 0, Prerelease::EMPTY),
            below(major, minor + 1, 0)?,
        ]),
        (op, Some(minor), Some(patch)) => Ok(vec![Comparator {
            op: op.unwrap_or(Op::Eq),
            version: version(major, minor, patch, p.pre.clone()),
        }]),
        // A patch never appears without a minor.
        (_, None, Some(_)) => Err(RangeError::InvalidComparator(format!("{major}"))),
    }
}

fn hyphen(from: &Partial, to: &Partial) -> Result<Vec<Comparator>, RangeError> {
    let mut comparators = Vec::new();

    match (from.major, from.minor, from.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(at_least(major, 0, 0, Prerelease::EMPTY)),
        (Some(major), Some(minor), None) => {
            comparators.push(at_least(major, minor, 0, Prerelease::EMPTY))
        }
        (Some(major), Some(minor), Some(patch)) => {
            comparators.push(at_least(major, minor, patch, from.pre.clone()))
        }
    }

    match (to.major, to.minor, to.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(below(major + 1, 0, 0)?),
        (Some(major), Some(minor), None) => comparators.push(below(major, minor + 1, 0)?),
        (Some(major), Some(minor), Some(patch)) => comparators.push(Comparator {
            op: Op::Le,
            version: version(major, minor, patch, to.pre.clone()),
        }),
    }

    Ok(comparators)
}
