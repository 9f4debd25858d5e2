use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::ConvertError;
use crate::flags::RunOptions;
use crate::manifest::{self, CommandField, ComposeFile, EnvField, NetworksField, ServiceSpec};
use crate::{tokenize, Result};

/// Service name used when the input does not provide one.
pub const DEFAULT_SERVICE_NAME: &str = "myservice";

/// Canonical single-service configuration, the meeting point of both
/// translation directions. Built fresh per conversion and discarded after
/// rendering; `image` and `name` are always non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub name: String,
    pub image: String,
    /// Command override in token form; empty means no override.
    pub command: Vec<String>,
    pub ports: Vec<String>,
    pub volumes: Vec<String>,
    pub environment: EnvField,
    pub network: Option<String>,
    pub restart: Option<String>,
    /// Parsed from `-d`/`--rm` but never rendered into a manifest and never
    /// reconstructed from one.
    pub detach: bool,
    pub auto_remove: bool,
}

impl ServiceConfig {
    /// Build from scanned `docker run` options and the positional tail.
    /// The first positional is the image; the rest is the command override.
    pub fn from_run(options: RunOptions, positionals: Vec<String>) -> Result<Self> {
        let mut rest = positionals.into_iter();
        let image = rest.next().ok_or(ConvertError::MissingImage)?;
        let environment = if options.env.is_empty() {
            EnvField::None
        } else {
            EnvField::List(options.env)
        };

        Ok(Self {
            name: options
                .name
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            image,
            command: rest.collect(),
            ports: options.publish,
            volumes: options.volume,
            environment,
            network: options.network,
            restart: options.restart,
            detach: options.detach,
            auto_remove: options.auto_remove,
        })
    }

    /// Build from one named service entry of a parsed manifest.
    pub fn from_manifest(name: &str, spec: &ServiceSpec) -> Result<Self> {
        let image = spec
            .image
            .clone()
            .ok_or_else(|| ConvertError::MissingServiceImage {
                service: name.to_string(),
            })?;

        let command = match &spec.command {
            CommandField::None => Vec::new(),
            CommandField::Exec(tokens) => tokens.clone(),
            // Shell-form command strings are split by shell word rules.
            CommandField::Shell(line) => tokenize::split(line)?,
        };

        Ok(Self {
            name: name.to_string(),
            image,
            command,
            ports: spec.ports.clone(),
            volumes: spec.volumes.clone(),
            environment: spec.environment.clone(),
            network: spec.networks.first().map(str::to_string),
            restart: spec.restart.clone(),
            detach: false,
            auto_remove: false,
        })
    }

    /// Render as a single-service compose manifest.
    ///
    /// Only non-empty fields are emitted. The command override is joined
    /// into a shell-form string, which loses the original token boundaries
    /// of quoted arguments; matching the flag order of the source command is
    /// not attempted either.
    pub fn to_compose(&self) -> ComposeFile {
        let spec = ServiceSpec {
            image: Some(self.image.clone()),
            command: if self.command.is_empty() {
                CommandField::None
            } else {
                CommandField::Shell(self.command.join(" "))
            },
            ports: self.ports.clone(),
            volumes: self.volumes.clone(),
            environment: self.environment.clone(),
            networks: match &self.network {
                Some(net) => NetworksField::Many(vec![net.clone()]),
                None => NetworksField::None,
            },
            restart: self.restart.clone(),
        };

        let mut services = IndexMap::new();
        services.insert(self.name.clone(), spec);

        let mut networks = IndexMap::new();
        if let Some(net) = &self.network {
            // Declared external: the run command attaches to an existing network.
            networks.insert(net.clone(), manifest::external_network_decl());
        }

        ComposeFile {
            version: Some(Value::from("3.8")),
            services,
            networks,
        }
    }

    /// Emit the equivalent `docker run` invocation as a token sequence, in
    /// canonical flag order: name, restart, ports, volumes, environment,
    /// network, image, command.
    pub fn to_run_tokens(&self) -> Vec<String> {
        let mut tokens = vec!["docker".to_string(), "run".to_string()];

        tokens.push("--name".to_string());
        tokens.push(self.name.clone());

        if let Some(restart) = &self.restart {
            tokens.push("--restart".to_string());
            tokens.push(restart.clone());
        }
        for port in &self.ports {
            tokens.push("-p".to_string());
            tokens.push(port.clone());
        }
        for volume in &self.volumes {
            tokens.push("-v".to_string());
            tokens.push(volume.clone());
        }
        for pair in self.environment.to_pairs() {
            tokens.push("-e".to_string());
            tokens.push(pair);
        }
        if let Some(network) = &self.network {
            tokens.push("--network".to_string());
            tokens.push(network.clone());
        }

        tokens.push(self.image.clone());
        tokens.extend(self.command.iter().cloned());
        tokens
    }
}
