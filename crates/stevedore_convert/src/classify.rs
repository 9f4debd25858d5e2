use crate::manifest;
use crate::translate;

/// Which of the two representations a piece of input text looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    RunCommand,
    ComposeManifest,
    Unknown,
}

/// Decide which translation direction applies to `text`.
///
/// The `docker run` prefix is the cheap, unambiguous signal and wins
/// outright, even when the rest of the command is malformed. Otherwise the
/// text must parse as YAML with a non-empty `services` mapping to count as a
/// manifest; any parse failure folds into `Unknown`. No side effects, never
/// panics.
pub fn classify(text: &str) -> InputKind {
    let trimmed = text.trim();
    if translate::has_run_prefix(trimmed) {
        return InputKind::RunCommand;
    }
    if manifest::looks_like_manifest(text) {
        return InputKind::ComposeManifest;
    }
    InputKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_prefix_wins_even_when_malformed() {
        assert_eq!(classify("docker run"), InputKind::RunCommand);
        assert_eq!(classify("  DOCKER RUN 'unclosed"), InputKind::RunCommand);
    }

    #[test]
    fn test_manifest_with_services() {
        let yaml = "services:\n  web:\n    image: nginx\n";
        assert_eq!(classify(yaml), InputKind::ComposeManifest);
    }

    #[test]
    fn test_empty_services_is_unknown() {
        assert_eq!(classify("services: {}\n"), InputKind::Unknown);
    }

    #[test]
    fn test_malformed_yaml_is_unknown() {
        assert_eq!(classify("docker ps\n\t- ]["), InputKind::Unknown);
    }

    #[test]
    fn test_plain_text_is_unknown() {
        assert_eq!(classify("hello there"), InputKind::Unknown);
        assert_eq!(classify(""), InputKind::Unknown);
    }
}
