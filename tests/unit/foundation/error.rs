use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PixmergeError::unsupported_format("tiff")
            .to_string()
            .contains("unsupported format:")
    );
    assert!(
        PixmergeError::decode_failure("x")
            .to_string()
            .contains("decode failure:")
    );
    assert!(
        PixmergeError::encode_failure("x")
            .to_string()
            .contains("encode failure:")
    );
    assert!(
        PixmergeError::invalid_scale_factor("x")
            .to_string()
            .contains("invalid scale factor:")
    );
    assert!(
        PixmergeError::invalid_command("x")
            .to_string()
            .contains("invalid command:")
    );
}

#[test]
fn path_helpers_mention_the_path() {
    let err = PixmergeError::missing_extension(Path::new("photos/README"));
    assert!(err.to_string().starts_with("missing extension:"));
    assert!(err.to_string().contains("photos/README"));

    let err = PixmergeError::source_unavailable(
        Path::new("gone.png"),
        std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    );
    assert!(matches!(err, PixmergeError::SourceUnavailable(_)));
    assert!(err.to_string().contains("gone.png"));
    assert!(err.to_string().contains("no such file"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PixmergeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
