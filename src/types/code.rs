//! Permission codes: a kind prefix followed by 2-digit level groups.
//!
//! `M01` is a top-level menu, `M0101` a menu below it, and `A010101` an
//! action on the `M0101` page. Each group is in `01..=99`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PermissionError;

use super::kind::CodeKind;

/// Width of one level group in the digit part.
pub const GROUP_WIDTH: usize = 2;

// `\d` would also accept non-ASCII digits.
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("digit pattern"));

/// A validated permission code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionCode {
    code: String,
    kind: CodeKind,
}

impl PermissionCode {
    /// Parse and validate a code.
    pub fn parse(code: &str) -> Result<Self, PermissionError> {
        let kind = check_format(code)?;
        Ok(PermissionCode {
            code: code.to_string(),
            kind,
        })
    }

    /// Build a code from a kind and an already validated digit string.
    fn from_parts(kind: CodeKind, digits: &str) -> Self {
        PermissionCode {
            code: format!("{}{}", kind.prefix(), digits),
            kind,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    pub fn is_menu(&self) -> bool {
        self.kind == CodeKind::Menu
    }

    pub fn is_action(&self) -> bool {
        self.kind == CodeKind::Action
    }

    /// The digit part, without the prefix.
    pub fn digits(&self) -> &str {
        &self.code[1..]
    }

    /// The 2-digit level groups, e.g. `M0102` -> `["01", "02"]`.
    pub fn groups(&self) -> Vec<&str> {
        let digits = self.digits();
        (0..digits.len())
            .step_by(GROUP_WIDTH)
            .map(|i| &digits[i..i + GROUP_WIDTH])
            .collect()
    }

    /// Number of level groups.
    pub fn depth(&self) -> usize {
        self.digits().len() / GROUP_WIDTH
    }

    /// The menu code with the same digits. Menus map to themselves.
    pub fn menu_equivalent(&self) -> PermissionCode {
        match self.kind {
            CodeKind::Menu => self.clone(),
            CodeKind::Action => Self::from_parts(CodeKind::Menu, self.digits()),
        }
    }

    /// The immediate parent in the permission hierarchy, always a menu.
    ///
    /// A menu drops its last group. An action is resolved through its menu
    /// equivalent, so `A010101` sits under `M0101`. Depth-1 codes have no parent.
    pub fn parent(&self) -> Option<PermissionCode> {
        if self.depth() <= 1 {
            return None;
        }
        let digits = self.digits();
        Some(Self::from_parts(
            CodeKind::Menu,
            &digits[..digits.len() - GROUP_WIDTH],
        ))
    }

    /// Ancestors from the root down to the immediate parent.
    pub fn parent_codes(&self) -> Vec<PermissionCode> {
        let mut chain = Vec::with_capacity(self.depth().saturating_sub(1));
        let mut current = self.parent();
        while let Some(code) = current {
            current = code.parent();
            chain.push(code);
        }
        chain.reverse();
        chain
    }

    /// The top-level menu of this code's branch.
    ///
    /// A depth-1 code is its own root, whatever its kind.
    pub fn root_code(&self) -> PermissionCode {
        if self.depth() == 1 {
            return self.clone();
        }
        Self::from_parts(CodeKind::Menu, &self.digits()[..GROUP_WIDTH])
    }

    /// True if `self` lies strictly below the menu `parent`.
    ///
    /// Actions only descend from menus; they are compared through their
    /// menu equivalent.
    pub fn is_descendant_of(&self, parent: &PermissionCode) -> bool {
        if self.is_action() && !parent.is_menu() {
            return false;
        }
        let compare = self.menu_equivalent();
        compare.code.starts_with(&parent.code) && compare.code.len() > parent.code.len()
    }

    /// Structured view of this code.
    pub fn info(&self) -> PermissionCodeInfo {
        PermissionCodeInfo {
            code: self.code.clone(),
            kind: self.kind,
            groups: self.groups().into_iter().map(str::to_string).collect(),
            depth: self.depth(),
            parent_code: self.parent().map(String::from),
        }
    }
}

impl Display for PermissionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.code)
    }
}

impl AsRef<str> for PermissionCode {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl FromStr for PermissionCode {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionCode::parse(s)
    }
}

impl TryFrom<String> for PermissionCode {
    type Error = PermissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let kind = check_format(&value)?;
        Ok(PermissionCode { code: value, kind })
    }
}

impl From<PermissionCode> for String {
    fn from(code: PermissionCode) -> Self {
        code.code
    }
}

/// The parsed form of a code, as handed to callers and serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCodeInfo {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CodeKind,
    pub groups: Vec<String>,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_code: Option<String>,
}

/// The one grammar check behind both `parse_code` and `is_valid_code`.
fn check_format(code: &str) -> Result<CodeKind, PermissionError> {
    let invalid = |reason: &str| {
        Err(PermissionError::InvalidCodeFormat(format!(
            "'{code}': {reason} (expected format: M|A followed by 2-digit groups in 01..99)"
        )))
    };

    if code.len() < 1 + GROUP_WIDTH {
        return invalid("too short");
    }

    let Some(prefix) = code.chars().next() else {
        return invalid("empty");
    };
    let Some(kind) = CodeKind::from_prefix(prefix) else {
        return invalid("unknown prefix");
    };

    let digits = &code[prefix.len_utf8()..];
    if !DIGITS.is_match(digits) {
        return invalid("digit part is not numeric");
    }
    if digits.len() % GROUP_WIDTH != 0 {
        return invalid("digit part has odd length");
    }

    for start in (0..digits.len()).step_by(GROUP_WIDTH) {
        let group = &digits[start..start + GROUP_WIDTH];
        match group.parse::<u8>() {
            Ok(1..=99) => {}
            _ => return invalid("level group outside 01..99"),
        }
    }

    Ok(kind)
}

/// Parse a code into its structured form.
pub fn parse_code(code: &str) -> Result<PermissionCodeInfo, PermissionError> {
    PermissionCode::parse(code).map(|c| c.info())
}

/// Non-failing form of [`parse_code`], with the same accept/reject decision.
pub fn is_valid_code(code: &str) -> bool {
    check_format(code).is_ok()
}

/// Ancestor chain of `code`, root first, excluding `code` itself.
pub fn parent_codes(code: &str) -> Result<Vec<PermissionCode>, PermissionError> {
    Ok(PermissionCode::parse(code)?.parent_codes())
}

/// Root menu of `code`'s branch.
pub fn root_code(code: &str) -> Result<PermissionCode, PermissionError> {
    Ok(PermissionCode::parse(code)?.root_code())
}

/// True if `child` descends from `parent`. Invalid input is never a child.
pub fn is_child_of(child: &str, parent: &str) -> bool {
    match (PermissionCode::parse(child), PermissionCode::parse(parent)) {
        (Ok(child), Ok(parent)) => child.is_descendant_of(&parent),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_json_snapshot;
    use yare::parameterized;

    fn codes(list: &[PermissionCode]) -> Vec<&str> {
        list.iter().map(PermissionCode::as_str).collect()
    }

    #[test]
    fn test_parse_menu_root() {
        let info = parse_code("M01").unwrap();
        assert_json_snapshot!(info, @r#"
        {
          "code": "M01",
          "type": "menu",
          "groups": [
            "01"
          ],
          "depth": 1
        }
        "#);
    }

    #[test]
    fn test_codes_sort_by_text() {
        let mut list: Vec<PermissionCode> = ["M02", "A0101", "M0101", "M01"]
            .iter()
            .map(|c| PermissionCode::parse(c).unwrap())
            .collect();
        list.sort();
        assert_eq!(codes(&list), vec!["A0101", "M01", "M0101", "M02"]);
    }

    #[test]
    fn test_parse_action() {
        let info = parse_code("A010101").unwrap();
        assert_eq!(info.kind, CodeKind::Action);
        assert_eq!(info.depth, 3);
        assert_eq!(info.groups, vec!["01", "01", "01"]);
        assert_eq!(info.parent_code.as_deref(), Some("M0101"));
    }

    #[parameterized(
        empty = { "" },
        too_short = { "M1" },
        prefix_only = { "M" },
        bad_prefix = { "X01" },
        lowercase_prefix = { "m01" },
        odd_digits = { "M010" },
        non_numeric = { "M0a" },
        zero_group = { "M00" },
        zero_inner_group = { "M0100" },
        signed = { "M+1" },
        whitespace = { "M01 " },
        unicode_digits = { "M٠١" },
        unicode_prefix = { "Ñ01" },
    )]
    fn test_invalid_codes(code: &str) {
        assert!(!is_valid_code(code));
        let err = parse_code(code).unwrap_err();
        assert!(matches!(err, PermissionError::InvalidCodeFormat(_)));
    }

    #[parameterized(
        menu_root = { "M01", 1 },
        menu_child = { "M0101", 2 },
        max_group = { "M99", 1 },
        action_two_level = { "A0101", 2 },
        action_three_level = { "A010101", 3 },
        deep_menu = { "M0102030405", 5 },
    )]
    fn test_valid_codes(code: &str, depth: usize) {
        assert!(is_valid_code(code));
        let parsed = PermissionCode::parse(code).unwrap();
        assert_eq!(parsed.depth(), depth);
        assert_eq!(parsed.groups().len(), depth);
        assert_eq!(parsed.parent_codes().len(), depth - 1);
    }

    #[parameterized(
        menu_root = { "M01", &[] },
        menu_child = { "M0101", &["M01"] },
        menu_grandchild = { "M010101", &["M01", "M0101"] },
        action = { "A010101", &["M01", "M0101"] },
        action_two_level = { "A0203", &["M02"] },
        action_root = { "A01", &[] },
    )]
    fn test_parent_codes(code: &str, expected: &[&str]) {
        let parents = parent_codes(code).unwrap();
        assert_eq!(codes(&parents), expected);
        assert!(parents.iter().all(PermissionCode::is_menu));
    }

    #[parameterized(
        menu_root = { "M01", "M01" },
        action_root = { "A01", "A01" },
        menu_child = { "M0302", "M03" },
        action = { "A030201", "M03" },
    )]
    fn test_root_code(code: &str, expected: &str) {
        assert_eq!(root_code(code).unwrap().as_str(), expected);
    }

    #[parameterized(
        action_under_root = { "A010101", "M01", true },
        action_under_page = { "A010101", "M0101", true },
        action_not_under_own_equivalent = { "A010101", "M010101", false },
        menu_child = { "M0101", "M01", true },
        sibling = { "M02", "M01", false },
        self_is_not_child = { "M01", "M01", false },
        parent_not_child = { "M01", "M0101", false },
        action_under_action = { "A010101", "A01", false },
        menu_under_action = { "M0101", "A01", false },
        invalid_child = { "M1", "M01", false },
        invalid_parent = { "M0101", "X01", false },
        other_branch = { "M0201", "M01", false },
    )]
    fn test_is_child_of(child: &str, parent: &str, expected: bool) {
        assert_eq!(is_child_of(child, parent), expected);
    }

    #[test]
    fn test_menu_equivalent() {
        let action = PermissionCode::parse("A010203").unwrap();
        assert_eq!(action.menu_equivalent().as_str(), "M010203");
        let menu = PermissionCode::parse("M01").unwrap();
        assert_eq!(menu.menu_equivalent(), menu);
    }

    #[test]
    fn test_code_serde_validates() {
        let code: PermissionCode = serde_json::from_value(serde_json::json!("A0101")).unwrap();
        assert_eq!(code.kind(), CodeKind::Action);
        assert_eq!(serde_json::to_value(&code).unwrap(), serde_json::json!("A0101"));

        let bad = serde_json::from_value::<PermissionCode>(serde_json::json!("B0101"));
        assert!(bad.is_err());
    }

    #[test]
    fn test_from_str_and_display() {
        let code: PermissionCode = "M0303".parse().unwrap();
        assert_eq!(code.to_string(), "M0303");
        assert_eq!(String::from(code), "M0303");
    }
}
