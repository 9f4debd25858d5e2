use crate::error::ConvertError;
use crate::Result;

/// The `docker run` flags the converter understands.
///
/// Repeatable flags accumulate in order; single-value flags are last-wins.
/// `detach` and `auto_remove` are accepted but have no compose equivalent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunOptions {
    pub detach: bool,
    pub name: Option<String>,
    pub publish: Vec<String>,
    pub volume: Vec<String>,
    pub env: Vec<String>,
    pub network: Option<String>,
    pub restart: Option<String>,
    pub auto_remove: bool,
}

/// Scan tokens into recognized options plus the positional tail.
///
/// This is an explicit two-state scan: it consumes recognized flags (and
/// their values) until it hits the first token that is neither, then hands
/// back everything from that token onward untouched. The first positional is
/// the image and the rest is a literal command, so an unrecognized flag like
/// `--foo` after the flags must fall through instead of being rejected.
pub fn scan(tokens: &[String]) -> Result<(RunOptions, Vec<String>)> {
    let mut options = RunOptions::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].as_str();

        // `--flag=value` form; short flags never take inline values.
        let (flag, inline) = match token.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f, Some(v)),
            _ => (token, None),
        };

        match flag {
            "-d" | "--detach" if inline.is_none() => options.detach = true,
            "--rm" if inline.is_none() => options.auto_remove = true,
            "--name" | "-p" | "--publish" | "-v" | "--volume" | "-e" | "--env" | "--network"
            | "--restart" => {
                let value = match inline {
                    Some(v) => v.to_string(),
                    None => {
                        i += 1;
                        tokens
                            .get(i)
                            .cloned()
                            .ok_or_else(|| ConvertError::MissingFlagValue {
                                flag: flag.to_string(),
                            })?
                    }
                };
                match flag {
                    "--name" => options.name = Some(value),
                    "-p" | "--publish" => options.publish.push(value),
                    "-v" | "--volume" => options.volume.push(value),
                    "-e" | "--env" => options.env.push(value),
                    "--network" => options.network = Some(value),
                    "--restart" => options.restart = Some(value),
                    _ => unreachable!(),
                }
            }
            _ => {
                // Positional tail: the image and everything after it.
                return Ok((options, tokens[i..].to_vec()));
            }
        }
        i += 1;
    }

    Ok((options, Vec::new()))
}
