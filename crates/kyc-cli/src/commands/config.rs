//! Config command - inspect and edit the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use kyc_core::KycConfig;

use super::default_config_path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Where to write the file (default: the --config path or the user config dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, addressed by a dotted key such as "server.bind"
    Get { key: String },

    /// Change one value; input that is not valid JSON is stored as a string
    Set { key: String, value: String },

    /// Print the configuration file location
    Path,
}

/// The configuration file a command operates on.
struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    fn resolve(explicit: Option<&str>) -> Self {
        let path = explicit.map(PathBuf::from).unwrap_or_else(default_config_path);
        Self { path }
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    /// File contents, or defaults when the file has not been created yet.
    fn load(&self) -> anyhow::Result<KycConfig> {
        if self.exists() {
            Ok(KycConfig::from_file(&self.path)?)
        } else {
            Ok(KycConfig::default())
        }
    }

    fn store(&self, config: &KycConfig) -> anyhow::Result<()> {
        write_config(&self.path, config)
    }
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let file = ConfigFile::resolve(config_path);

    match args.command {
        ConfigCommand::Show => {
            if !file.exists() {
                eprintln!(
                    "{} {} does not exist, showing defaults.",
                    style("ℹ").blue(),
                    file.path.display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&file.load()?)?);
        }
        ConfigCommand::Init { output, force } => {
            let path = output.unwrap_or_else(|| file.path.clone());
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            write_config(&path, &KycConfig::default())?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                path.display()
            );
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(file.load()?)?;
            let value = json
                .pointer(&json_pointer(&key))
                .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => {
            let value = parse_value(&value);
            let updated = with_value(&file.load()?, &key, value.clone())?;
            file.store(&updated)?;
            println!("{} {} = {}", style("✓").green(), key, value);
        }
        ConfigCommand::Path => {
            let status = if file.exists() {
                style("exists").green()
            } else {
                style("not created, run 'kyc config init'").yellow()
            };
            println!("{} ({})", file.path.display(), status);
        }
    }

    Ok(())
}

fn write_config(path: &Path, config: &KycConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// "server.bind" -> "/server/bind"
fn json_pointer(key: &str) -> String {
    key.split('.').fold(String::new(), |mut pointer, part| {
        pointer.push('/');
        pointer.push_str(part);
        pointer
    })
}

fn parse_value(input: &str) -> Value {
    serde_json::from_str(input).unwrap_or_else(|_| Value::String(input.to_string()))
}

/// Copy of `config` with one existing key replaced, re-validated against the schema.
fn with_value(config: &KycConfig, key: &str, value: Value) -> anyhow::Result<KycConfig> {
    let mut json = serde_json::to_value(config)?;

    let slot = json
        .pointer_mut(&json_pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("{} is a section; set one of its keys instead", key);
    }
    *slot = value;

    serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))
}
