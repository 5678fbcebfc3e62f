use super::*;

#[test]
fn validation_message_is_prefixed() {
    let err = TileError::validation("layout width must be > 0");
    assert_eq!(
        err.to_string(),
        "validation error: layout width must be > 0"
    );
}

#[test]
fn helpers_build_matching_variants() {
    assert!(matches!(TileError::validation("x"), TileError::Validation(_)));
    assert!(matches!(TileError::serde("x"), TileError::Serde(_)));
}

#[test]
fn anyhow_errors_wrap_transparently() {
    let err: TileError = anyhow::anyhow!("backing store gone").into();
    assert_eq!(err.to_string(), "backing store gone");
}
