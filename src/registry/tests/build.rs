use super::*;

#[test]
fn test_build_is_memoized() {
    let registry = registry_from(USERS_CONFIG);
    assert!(!registry.is_built().unwrap());

    let first = registry.build().unwrap();
    let second = registry.build().unwrap();
    assert!(registry.is_built().unwrap());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(codes(&first), vec!["M01", "A0101", "A0102"]);
}

#[test]
fn test_invalidate_rebuilds() {
    let registry = registry_from(USERS_CONFIG);
    let first = registry.build().unwrap();

    registry.invalidate().unwrap();
    assert!(!registry.is_built().unwrap());

    let second = registry.build().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn test_clones_share_state() {
    let registry = registry_from(USERS_CONFIG);
    let clone = registry.clone();
    let built = clone.build().unwrap();
    assert!(registry.is_built().unwrap());
    assert!(Arc::ptr_eq(&built, &registry.build().unwrap()));
}

#[parameterized(
    menu = { "M01", Some(("Users", PermissionType::Menu, None)) },
    action = { "A0102", Some(("Edit", PermissionType::Button, Some("M01"))) },
    unknown = { "M02", None },
    malformed = { "nope", None },
)]
fn test_permission_by_code(code: &str, expected: Option<(&str, PermissionType, Option<&str>)>) {
    let registry = registry_from(USERS_CONFIG);
    let found = registry.permission_by_code(code).unwrap();
    let found = found
        .as_ref()
        .map(|p| (p.name(), p.record.kind, p.parent_code()));
    assert_eq!(found, expected);
}

#[test]
fn test_code_for_path() {
    let registry = registry_from(SETTINGS_CONFIG);
    assert_eq!(
        registry.code_for_path(&["Settings", "Roles", "Add"]).unwrap(),
        Some("A030101".to_string())
    );
    assert_eq!(registry.code_for_path(&["Roles", "Add"]).unwrap(), None);
}

#[test]
fn test_tree_keeps_configuration_order() {
    let registry = registry_from(SETTINGS_CONFIG);
    let tree = registry.tree().unwrap();
    assert_eq!(tree.len(), 1);
    let children: Vec<&str> = tree[0].children.iter().map(|c| c.code()).collect();
    assert_eq!(children, vec!["M0303", "M0301"]);
    assert_eq!(tree[0].size(), 4);
}

#[test]
fn test_validate() {
    assert!(registry_from(USERS_CONFIG).validate().unwrap().valid);

    let report = registry_from(BROKEN_CONFIG).validate().unwrap();
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
    assert!(matches!(
        report.errors[0],
        PermissionError::StructuralViolation(_)
    ));
    assert!(matches!(
        report.errors[1],
        PermissionError::ConfigurationError(_)
    ));
}

#[test]
fn test_broken_config_still_builds() {
    let built = registry_from(BROKEN_CONFIG).build().unwrap();
    assert_eq!(codes(&built), vec!["M01", "A0101", "A010101"]);
}

#[test]
fn test_new_from_str_rejects_non_object() {
    let result = PermissionRegistry::new_from_str(r#"["M01"]"#);
    assert!(matches!(result, Err(PermissionError::ConfigurationError(_))));
}
