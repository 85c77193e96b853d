//! Linking flat permission records into a tree.

use std::collections::HashMap;

use tracing::warn;

use crate::types::{PermissionNode, PermissionRecord};

/// Build the permission tree from a flat record list.
///
/// A record is attached to the record named by its `parentCode`; when that
/// parent is missing (or the record names itself) it becomes a root. Roots
/// and children keep input order. With duplicate codes the first record is
/// used and later ones are dropped. Records caught in a parent cycle are
/// appended as roots after the regular ones, so nothing is lost.
pub fn permission_tree(records: &[PermissionRecord]) -> Vec<PermissionNode> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut kept: Vec<usize> = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if index.contains_key(record.code.as_str()) {
            warn!(
                event = "PermissionTree",
                phase = "Duplicate",
                code = record.code.as_str(),
                "duplicate permission code, later record dropped"
            );
            continue;
        }
        index.insert(record.code.as_str(), i);
        kept.push(i);
    }

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();
    for &i in &kept {
        let record = &records[i];
        match record
            .parent_code
            .as_deref()
            .and_then(|parent| index.get(parent).copied())
        {
            Some(parent) if parent != i => children.entry(parent).or_default().push(i),
            _ => roots.push(i),
        }
    }

    let mut placed = vec![false; records.len()];
    let mut tree = Vec::with_capacity(roots.len());
    for &root in &roots {
        tree.push(assemble(root, records, &children, &mut placed));
    }

    for &i in &kept {
        if !placed[i] {
            warn!(
                event = "PermissionTree",
                phase = "Cycle",
                code = records[i].code.as_str(),
                "permission parent chain forms a cycle, placed at root"
            );
            tree.push(assemble(i, records, &children, &mut placed));
        }
    }

    tree
}

fn assemble(
    i: usize,
    records: &[PermissionRecord],
    children: &HashMap<usize, Vec<usize>>,
    placed: &mut [bool],
) -> PermissionNode {
    placed[i] = true;
    let mut node = PermissionNode::leaf(records[i].clone());
    if let Some(kids) = children.get(&i) {
        for &child in kids {
            if !placed[child] {
                node.children.push(assemble(child, records, children, placed));
            }
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PermissionType;

    fn record(code: &str, parent: Option<&str>) -> PermissionRecord {
        PermissionRecord {
            code: code.to_string(),
            name: code.to_lowercase(),
            kind: if code.starts_with('M') {
                PermissionType::Menu
            } else {
                PermissionType::Button
            },
            parent_code: parent.map(str::to_string),
            route_name: None,
        }
    }

    fn shape(nodes: &[PermissionNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| {
                if n.children.is_empty() {
                    n.code().to_string()
                } else {
                    format!("{}({})", n.code(), shape(&n.children).join(","))
                }
            })
            .collect()
    }

    #[test]
    fn test_tree_links_children() {
        let records = vec![
            record("M01", None),
            record("A0101", Some("M01")),
            record("M02", None),
            record("M0201", Some("M02")),
            record("A020101", Some("M0201")),
        ];
        let tree = permission_tree(&records);
        assert_eq!(shape(&tree), vec!["M01(A0101)", "M02(M0201(A020101))"]);
    }

    #[test]
    fn test_tree_preserves_input_order() {
        let records = vec![
            record("M03", None),
            record("M0303", Some("M03")),
            record("M0301", Some("M03")),
            record("M0302", Some("M03")),
            record("M01", None),
        ];
        let tree = permission_tree(&records);
        assert_eq!(shape(&tree), vec!["M03(M0303,M0301,M0302)", "M01"]);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let records = vec![record("A0101", Some("M01")), record("M01", None)];
        let tree = permission_tree(&records);
        assert_eq!(shape(&tree), vec!["M01(A0101)"]);
    }

    #[test]
    fn test_missing_parent_becomes_root() {
        let records = vec![record("M0101", Some("M01")), record("M02", None)];
        let tree = permission_tree(&records);
        assert_eq!(shape(&tree), vec!["M0101", "M02"]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let mut second = record("M01", None);
        second.name = "second".to_string();
        let records = vec![record("M01", None), second, record("A0101", Some("M01"))];
        let tree = permission_tree(&records);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].record.name, "m01");
        assert_eq!(tree[0].children.len(), 1);
    }

    #[test]
    fn test_cycles_are_not_lost() {
        let records = vec![
            record("M01", Some("M02")),
            record("M02", Some("M01")),
            record("M03", Some("M03")),
        ];
        let tree = permission_tree(&records);
        assert_eq!(shape(&tree), vec!["M03", "M01(M02)"]);
        assert_eq!(tree.iter().map(PermissionNode::size).sum::<usize>(), 3);
    }

    #[test]
    fn test_input_is_untouched() {
        let records = vec![record("M01", None), record("A0101", Some("M01"))];
        let before = records.clone();
        let _ = permission_tree(&records);
        assert_eq!(records, before);
    }
}
