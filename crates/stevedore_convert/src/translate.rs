//! The two translation directions.

use tracing::debug;

use crate::error::ConvertError;
use crate::service::ServiceConfig;
use crate::{flags, manifest, tokenize, Result};

/// Prefix that marks the imperative form. Matched case-insensitively.
pub const RUN_PREFIX: &str = "docker run";

pub(crate) fn has_run_prefix(trimmed: &str) -> bool {
    trimmed
        .get(..RUN_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(RUN_PREFIX))
}

/// Convert a `docker run` command into a compose manifest string.
pub fn run_to_compose(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if !has_run_prefix(trimmed) {
        return Err(ConvertError::NotRunCommand);
    }
    let rest = trimmed[RUN_PREFIX.len()..].trim_start();

    let tokens = tokenize::split(rest)?;
    let (options, positionals) = flags::scan(&tokens)?;
    let config = ServiceConfig::from_run(options, positionals)?;

    debug!("[CONVERT] run -> compose, service '{}'", config.name);
    manifest::render(&config.to_compose())
}

/// Convert the first service of a compose manifest into a `docker run`
/// command string, safely quoted.
pub fn compose_to_run(text: &str) -> Result<String> {
    let file = manifest::parse(text)?;
    let (name, spec) = file
        .services
        .first()
        .ok_or(ConvertError::InvalidStructure)?;
    let config = ServiceConfig::from_manifest(name, spec)?;

    debug!("[CONVERT] compose -> run, service '{}'", config.name);
    Ok(tokenize::join(config.to_run_tokens()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_to_compose_rejects_other_commands() {
        let err = run_to_compose("docker ps -a").unwrap_err();
        assert!(matches!(err, ConvertError::NotRunCommand));
    }

    #[test]
    fn test_run_to_compose_prefix_is_case_insensitive() {
        let yaml = run_to_compose("  Docker RUN nginx").unwrap();
        assert!(yaml.contains("image: nginx"));
    }

    #[test]
    fn test_run_to_compose_bare_image() {
        let yaml = run_to_compose("docker run nginx").unwrap();
        assert!(yaml.contains("version: '3.8'"));
        assert!(yaml.contains("myservice:"));
        assert!(yaml.contains("image: nginx"));
        assert!(!yaml.contains("command"));
        assert!(!yaml.contains("ports"));
    }

    #[test]
    fn test_run_to_compose_missing_image() {
        let err = run_to_compose("docker run -p 80:80").unwrap_err();
        assert!(matches!(err, ConvertError::MissingImage));
    }

    #[test]
    fn test_run_to_compose_unrecognized_flag_joins_command_tail() {
        let yaml = run_to_compose("docker run myimage --foo bar baz").unwrap();
        assert!(yaml.contains("image: myimage"));
        assert!(yaml.contains("command: --foo bar baz"));
    }

    #[test]
    fn test_run_to_compose_unbalanced_quote() {
        let err = run_to_compose(r#"docker run -e A="oops nginx"#).unwrap_err();
        assert!(matches!(err, ConvertError::Tokenize(_)));
    }

    #[test]
    fn test_compose_to_run_uses_first_service() {
        let yaml = "services:\n  second-listed-first:\n    image: a\n  other:\n    image: b\n";
        let cmd = compose_to_run(yaml).unwrap();
        assert_eq!(cmd, "docker run --name second-listed-first a");
    }

    #[test]
    fn test_compose_to_run_missing_image_names_service() {
        let yaml = "services:\n  web:\n    ports:\n      - 80:80\n";
        let err = compose_to_run(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingServiceImage { service } if service == "web"
        ));
    }

    #[test]
    fn test_compose_to_run_env_map_flattens_in_order() {
        let yaml = "services:\n  web:\n    image: nginx\n    environment:\n      B: '2'\n      A: '1'\n";
        let cmd = compose_to_run(yaml).unwrap();
        assert_eq!(cmd, "docker run --name web -e B=2 -e A=1 nginx");
    }

    #[test]
    fn test_compose_to_run_numeric_env_value() {
        let yaml = "services:\n  web:\n    image: nginx\n    environment:\n      PORT: 8080\n";
        let cmd = compose_to_run(yaml).unwrap();
        assert_eq!(cmd, "docker run --name web -e PORT=8080 nginx");
    }

    #[test]
    fn test_compose_to_run_quotes_env_with_spaces() {
        let yaml = "services:\n  web:\n    image: nginx\n    environment:\n      - GREETING=hello world\n";
        let cmd = compose_to_run(yaml).unwrap();
        assert_eq!(cmd, "docker run --name web -e 'GREETING=hello world' nginx");
    }

    #[test]
    fn test_compose_to_run_shell_command_is_retokenized() {
        let yaml = "services:\n  app:\n    image: alpine\n    command: echo 'a b'\n";
        let cmd = compose_to_run(yaml).unwrap();
        assert_eq!(cmd, "docker run --name app alpine echo 'a b'");
    }

    #[test]
    fn test_compose_to_run_exec_command_kept_as_tokens() {
        let yaml = "services:\n  app:\n    image: alpine\n    command: [sh, -c, 'echo hi']\n";
        let cmd = compose_to_run(yaml).unwrap();
        assert_eq!(cmd, "docker run --name app alpine sh -c 'echo hi'");
    }
}
