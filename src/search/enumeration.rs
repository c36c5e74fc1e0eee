//! Index-to-label enumerations for the Type and Platform filters.
//!
//! The UI renders these as choice lists and submits the index back, so the
//! enumeration is recomputed from a fresh snapshot of both collections on
//! every request and carries a version fingerprint that lets the submit step
//! detect that the list it resolves against is not the one the client saw.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::models::Vulnerability;

/// Label of index 0 in every enumeration.
pub const ALL_LABEL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationKind {
    Type,
    Platform,
}

impl EnumerationKind {
    fn value_of<'r, R: Vulnerability + ?Sized>(&self, record: &'r R) -> &'r str {
        match self {
            Self::Type => record.vuln_type(),
            Self::Platform => record.platform(),
        }
    }
}

impl fmt::Display for EnumerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Platform => f.write_str("platform"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    #[error("{kind} index {index} is outside 0..{len}")]
    IndexOutOfRange {
        kind: EnumerationKind,
        index: usize,
        len: usize,
    },
    #[error("{kind} choices changed (client version {expected}, current {actual})")]
    StaleVersion {
        kind: EnumerationKind,
        expected: u64,
        actual: u64,
    },
}

/// A resolved filter choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Index 0: no constraint.
    All,
    Value(String),
}

impl FilterValue {
    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }

    pub fn as_label(&self) -> &str {
        match self {
            FilterValue::All => ALL_LABEL,
            FilterValue::Value(v) => v,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Choice<'a> {
    pub index: usize,
    pub label: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEnumeration {
    kind: EnumerationKind,
    version: u64,
    /// `labels[0]` is always [`ALL_LABEL`].
    labels: Vec<String>,
}

impl FilterEnumeration {
    /// Sorted union of the distinct non-empty values across every record given.
    pub fn compute<'a, R, I>(kind: EnumerationKind, records: I) -> Self
    where
        R: Vulnerability + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let distinct: BTreeSet<&str> = records
            .into_iter()
            .map(|r| kind.value_of(r))
            .filter(|v| !v.is_empty())
            .collect();

        let mut labels = Vec::with_capacity(distinct.len() + 1);
        labels.push(ALL_LABEL.to_string());
        labels.extend(distinct.into_iter().map(str::to_string));

        let version = fingerprint(&labels);
        Self { kind, version, labels }
    }

    pub fn kind(&self) -> EnumerationKind {
        self.kind
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        // The sentinel is always present
        false
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn choices(&self) -> Vec<Choice<'_>> {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| Choice { index, label })
            .collect()
    }

    pub fn resolve(&self, index: usize) -> Result<FilterValue, EnumerationError> {
        match index {
            0 => Ok(FilterValue::All),
            i if i < self.labels.len() => Ok(FilterValue::Value(self.labels[i].clone())),
            _ => Err(EnumerationError::IndexOutOfRange {
                kind: self.kind,
                index,
                len: self.labels.len(),
            }),
        }
    }

    /// Like [`resolve`](Self::resolve), but also rejects an index that was
    /// rendered against a different version of this enumeration.
    pub fn resolve_versioned(&self, index: usize, expected: Option<u64>) -> Result<FilterValue, EnumerationError> {
        if let Some(expected) = expected {
            if expected != self.version {
                return Err(EnumerationError::StaleVersion {
                    kind: self.kind,
                    expected,
                    actual: self.version,
                });
            }
        }
        self.resolve(index)
    }

    /// Reverse lookup used when building links from a resolved value.
    pub fn index_of(&self, value: &FilterValue) -> Option<usize> {
        match value {
            FilterValue::All => Some(0),
            FilterValue::Value(v) => self.labels.iter().skip(1).position(|l| l == v).map(|p| p + 1),
        }
    }
}

/// FNV-1a over the labels, NUL separated. Stable across processes and builds.
fn fingerprint(labels: &[String]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for label in labels {
        for byte in label.as_bytes().iter().chain(std::iter::once(&0u8)) {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(PRIME);
        }
    }
    hash
}
