use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        InkError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        InkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        InkError::font_unavailable("x")
            .to_string()
            .contains("font unavailable:")
    );
    assert!(InkError::render("x").to_string().contains("render error:"));
    assert!(
        InkError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = InkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
