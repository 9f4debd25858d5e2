use crate::Result;

/// Split a command string into tokens using POSIX shell word rules.
///
/// Quoted values survive as single tokens, so `-e GREETING="hello world"`
/// yields one `GREETING=hello world` token. Unbalanced quotes are an error.
pub fn split(text: &str) -> Result<Vec<String>> {
    Ok(shell_words::split(text)?)
}

/// Join tokens back into a single shell command string.
///
/// The escaping inverse of [`split`]: tokens made only of shell-safe
/// characters pass through bare, so `KEY=VALUE` pairs stay readable, while
/// anything with whitespace or metacharacters comes back single-quoted.
pub fn join<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| quote(token.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote one token for a POSIX shell, only if it needs it.
pub fn quote(token: &str) -> String {
    if token.is_empty() {
        return "''".to_string();
    }
    if token.chars().all(is_shell_safe) {
        return token.to_string();
    }
    // A single-quoted section cannot contain a quote; close, escape, reopen.
    format!("'{}'", token.replace('\'', r#"'"'"'"#))
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}
