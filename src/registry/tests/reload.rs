use super::*;

#[test]
fn test_reload_replaces_config() {
    let registry = registry_from(USERS_CONFIG);
    let before = registry.build().unwrap();
    assert!(registry.permission_by_code("M01").unwrap().is_some());

    registry.reload_from_str(SETTINGS_CONFIG).unwrap();
    assert!(!registry.is_built().unwrap());
    assert!(registry.permission_by_code("M01").unwrap().is_none());
    assert!(registry.permission_by_code("M0301").unwrap().is_some());

    // Builds handed out before the reload are untouched.
    assert_eq!(codes(&before), vec!["M01", "A0101", "A0102"]);
}

#[test]
fn test_reload_failure_keeps_config() {
    let registry = registry_from(USERS_CONFIG);
    let built = registry.build().unwrap();

    let result = registry.reload_from_str(r#"{ "M01": "#);
    assert!(matches!(result, Err(PermissionError::ConfigurationError(_))));

    assert!(registry.is_built().unwrap());
    assert!(Arc::ptr_eq(&built, &registry.build().unwrap()));
    assert_eq!(registry.config().unwrap().len(), 1);
}

#[test]
fn test_reload_during_lookups() {
    use std::thread;
    use std::time::Duration;

    let registry = registry_from(USERS_CONFIG);
    let reader = registry.clone();
    let writer = registry.clone();

    let read_handle = thread::spawn(move || {
        for _ in 0..100 {
            let built = reader.build().unwrap();
            let found = codes(&built);
            assert!(found == vec!["M01", "A0101", "A0102"] || found[0] == "M03");
            thread::sleep(Duration::from_micros(10));
        }
    });

    let write_handle = thread::spawn(move || {
        for i in 0..10 {
            let text = if i % 2 == 0 { SETTINGS_CONFIG } else { USERS_CONFIG };
            writer.reload_from_str(text).unwrap();
            thread::sleep(Duration::from_millis(1));
        }
    });

    read_handle.join().unwrap();
    write_handle.join().unwrap();
    assert!(registry.build().unwrap().get("M01").is_some());
}
