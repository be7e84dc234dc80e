use microlog::{LoggerError, Requirement, PACKAGE};

#[test]
fn current_version_is_satisfied() {
    let requirement: Requirement = PACKAGE.reference().parse().unwrap();
    assert!(PACKAGE.satisfies(&requirement).is_ok());
}

#[test]
fn older_pin_is_reported() {
    let requirement: Requirement = "microlog/6.1.0".parse().unwrap();
    match PACKAGE.satisfies(&requirement) {
        Err(LoggerError::VersionMismatch { required, provided }) => {
            assert_eq!(required, "6.1.0");
            assert_eq!(provided, "6.2.2");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn other_package_is_reported() {
    let requirement: Requirement = "ulog/6.2.2".parse().unwrap();
    assert!(matches!(
        PACKAGE.satisfies(&requirement),
        Err(LoggerError::PackageMismatch { .. })
    ));
}

#[test]
fn build_options_match_features() {
    assert_eq!(PACKAGE.options.with_color, cfg!(feature = "color"));
    assert_eq!(PACKAGE.options.with_time, cfg!(feature = "time"));
}
