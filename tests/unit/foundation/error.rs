use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OverlayError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        OverlayError::rendering("x")
            .to_string()
            .contains("rendering error:")
    );
    assert!(OverlayError::input("x").to_string().contains("input error:"));
    assert!(
        OverlayError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
