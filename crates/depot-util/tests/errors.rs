use depot_util::errors::DepotError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = DepotError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_metadata_unavailable_display() {
    let err = DepotError::metadata("org.foo:bar:1.0", "POM not found");
    assert_eq!(
        err.to_string(),
        "Metadata unavailable for org.foo:bar:1.0: POM not found"
    );
}

#[test]
fn test_coordinate_error_display() {
    let err = DepotError::Coordinate {
        input: "nonsense".to_string(),
    };
    assert!(err.to_string().starts_with("Invalid coordinate 'nonsense'"));
}

#[test]
fn test_scope_error_display() {
    let err = DepotError::Scope {
        input: "import".to_string(),
    };
    assert!(err.to_string().contains("Unknown scope 'import'"));
}

#[test]
fn test_graph_task_wraps_source() {
    let err = DepotError::GraphTask {
        task: "populate".to_string(),
        source: Box::new(DepotError::metadata("g:a:1", "missing")),
    };
    let msg = err.to_string();
    assert!(msg.starts_with("Graph task 'populate' failed"), "got: {msg}");
    assert!(msg.contains("Metadata unavailable for g:a:1"), "got: {msg}");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_root_cause_unwraps_nested_tasks() {
    let err = DepotError::GraphTask {
        task: "populate".to_string(),
        source: Box::new(DepotError::metadata("g:a:1", "missing")),
    };
    assert!(matches!(
        err.root_cause(),
        DepotError::MetadataUnavailable { .. }
    ));
}

#[test]
fn test_generic_error_display() {
    let err = DepotError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}
