use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MikoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MikoError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(MikoError::asset("x").to_string().contains("asset error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MikoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
