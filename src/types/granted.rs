//! The set of codes held by one principal.

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

/// How several required codes combine.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    StrumDisplay,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckMode {
    /// Every code is required
    All,
    /// One code is enough
    #[default]
    Any,
}

/// Granted permission codes. Order is irrelevant and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedSet(HashSet<String>);

impl GrantedSet {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GrantedSet(codes.into_iter().map(Into::into).collect())
    }

    /// The fail-closed set: nothing is granted.
    pub fn empty() -> Self {
        GrantedSet::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Check one or more required codes.
    ///
    /// Blank codes are ignored; if nothing remains the check is denied, as is
    /// every check against an empty set.
    pub fn has_permission<S: AsRef<str>>(&self, required: &[S], mode: CheckMode) -> bool {
        let required: Vec<&str> = required
            .iter()
            .map(AsRef::as_ref)
            .filter(|code| !code.trim().is_empty())
            .collect();

        if required.is_empty() || self.is_empty() {
            return false;
        }

        match mode {
            CheckMode::All => required.iter().all(|code| self.contains(code)),
            CheckMode::Any => required.iter().any(|code| self.contains(code)),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for GrantedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        GrantedSet::new(iter)
    }
}

impl Display for GrantedSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}]", self.0.iter().sorted().join(", "))
    }
}
