use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(MandalaError::EmptyInput.to_string().contains("empty input"));
    assert!(
        MandalaError::invalid_digest_length(31)
            .to_string()
            .contains("got 31")
    );
    assert!(
        MandalaError::surface("x")
            .to_string()
            .contains("render surface unavailable:")
    );
    assert!(
        MandalaError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        MandalaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MandalaError::rejected("x")
            .to_string()
            .contains("intention rejected:")
    );
    assert!(
        MandalaError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MandalaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
