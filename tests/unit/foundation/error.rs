use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        Diff2GifError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        Diff2GifError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(
        Diff2GifError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        Diff2GifError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = Diff2GifError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_config());
}

#[test]
fn config_errors_are_classified() {
    assert!(Diff2GifError::config("bad extension").is_config());
    assert!(!Diff2GifError::resource("disk full").is_config());
}
