use crate::{ModelError, ReaperEndpointBuilder};

/// **VALUE**: Verifies that a valid host and port produce the control-surface base URL.
///
/// **WHY THIS MATTERS**: Every command URL is built by appending to this base.
/// A missing `/_` segment would make every request hit the wrong path.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The `_` path segment is dropped or renamed
/// - Host and port are swapped or formatted wrongly
#[test]
fn given_valid_host_and_port_when_building_then_base_url_points_at_control_surface() {
    // GIVEN: Builder with a LAN address
    let builder = ReaperEndpointBuilder::default()
        .with_host("192.168.1.100")
        .with_port(8080);

    // WHEN: Building
    let endpoint = builder.build().unwrap();

    // THEN: Base URL is http://host:port/_
    assert_eq!(endpoint.base_url(), "http://192.168.1.100:8080/_");
    assert_eq!(endpoint.authority(), "192.168.1.100:8080");
    assert_eq!(endpoint.host(), "192.168.1.100");
    assert_eq!(endpoint.port(), 8080);
}

/// **VALUE**: Verifies that surrounding whitespace in the host is tolerated.
///
/// **BUG THIS CATCHES**: Would catch if values copied from config files with a
/// trailing space end up in the URL.
#[test]
fn given_host_with_surrounding_whitespace_when_building_then_host_is_trimmed() {
    // GIVEN: Host padded with spaces
    let builder = ReaperEndpointBuilder::default()
        .with_host("  studio.local ")
        .with_port(8080);

    // WHEN: Building
    let endpoint = builder.build().unwrap();

    // THEN: Host is trimmed
    assert_eq!(endpoint.host(), "studio.local");
}

/// **VALUE**: Verifies that builder validation rejects a missing host.
///
/// **WHY THIS MATTERS**: Without a host there is nothing to talk to; failing at
/// construction beats failing on every job.
///
/// **BUG THIS CATCHES**: Would catch if required field validation is removed.
#[test]
fn given_missing_host_when_building_then_returns_validation_error() {
    // GIVEN: Builder without host
    let builder = ReaperEndpointBuilder::default().with_port(8080);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Host is required");
        }
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[test]
fn given_blank_host_when_building_then_returns_validation_error() {
    // GIVEN: Host of only whitespace
    let builder = ReaperEndpointBuilder::default()
        .with_host("   ")
        .with_port(8080);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Host cannot be empty");
        }
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies that a host carrying a scheme is rejected.
///
/// **WHY THIS MATTERS**: Users commonly paste `http://...` into the host field.
/// That would produce `http://http://...:8080/_` and every request would fail.
///
/// **BUG THIS CATCHES**: Would catch if scheme detection is removed.
#[test]
fn given_host_with_scheme_when_building_then_returns_validation_error() {
    // GIVEN: Host with a scheme prefix
    let builder = ReaperEndpointBuilder::default()
        .with_host("http://192.168.1.100")
        .with_port(8080);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error mentioning the scheme
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert!(message.contains("scheme"));
        }
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[test]
fn given_host_with_path_or_inner_space_when_building_then_returns_validation_error() {
    for bad in ["studio/_", "studio box", "user@studio"] {
        // GIVEN: Host that would change URL structure
        let builder = ReaperEndpointBuilder::default()
            .with_host(bad)
            .with_port(8080);

        // WHEN: Attempting to build
        let result = builder.build();

        // THEN: Rejected
        assert!(
            matches!(result, Err(ModelError::Validation { .. })),
            "host {bad:?} should be rejected"
        );
    }
}

/// **VALUE**: Verifies that port zero and a missing port are both rejected.
///
/// **BUG THIS CATCHES**: Would catch if the builder silently defaults the port,
/// which would send every request to an unbound socket.
#[test]
fn given_zero_or_missing_port_when_building_then_returns_validation_error() {
    // GIVEN: One builder with port 0 and one without a port
    let zero = ReaperEndpointBuilder::default()
        .with_host("studio.local")
        .with_port(0);
    let missing = ReaperEndpointBuilder::default().with_host("studio.local");

    // WHEN: Building both
    let zero_result = zero.build();
    let missing_result = missing.build();

    // THEN: Both fail with specific messages
    match zero_result.unwrap_err() {
        ModelError::Validation { message, .. } => assert_eq!(message, "Port must be non-zero"),
        other => panic!("Expected Validation error, got {other:?}"),
    }
    match missing_result.unwrap_err() {
        ModelError::Validation { message, .. } => assert_eq!(message, "Port is required"),
        other => panic!("Expected Validation error, got {other:?}"),
    }
}
