#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::CompressionOptions;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AttachmentMaxDimension,
    #[strum(serialize = "attachment-max-size-mb")]
    AttachmentMaxSizeMB,
    AttachmentQuality,
    #[strum(serialize = "chat-url")]
    ChatURL,
    ConfigFile,
    TranscriptFile,
}

fn app_dir(base: Option<path::PathBuf>) -> path::PathBuf {
    return base.unwrap_or_else(|| return path::PathBuf::from(".")).join("vdmax");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::AttachmentMaxDimension => "1920".to_string(),
            ConfigKey::AttachmentMaxSizeMB => "2".to_string(),
            ConfigKey::AttachmentQuality => "80".to_string(),
            ConfigKey::ChatURL => "http://localhost:5000/chat".to_string(),
            ConfigKey::ConfigFile => app_dir(dirs::config_dir())
                .join("config.toml")
                .to_string_lossy()
                .to_string(),
            ConfigKey::TranscriptFile => app_dir(dirs::cache_dir())
                .join("transcript.yaml")
                .to_string_lossy()
                .to_string(),
        };

        return res;
    }

    /// Reads the attachment bounds, rejecting values the compressor cannot
    /// work with.
    pub fn compression_options() -> Result<CompressionOptions> {
        let max_size_mb = Config::get(ConfigKey::AttachmentMaxSizeMB).parse::<f64>()?;
        if max_size_mb <= 0.0 || !max_size_mb.is_finite() {
            bail!(format!(
                "{} must be a positive number, got {max_size_mb}",
                ConfigKey::AttachmentMaxSizeMB
            ));
        }

        let max_width_or_height = Config::get(ConfigKey::AttachmentMaxDimension).parse::<u32>()?;
        if max_width_or_height == 0 {
            bail!(format!(
                "{} must be greater than 0",
                ConfigKey::AttachmentMaxDimension
            ));
        }

        let quality = Config::get(ConfigKey::AttachmentQuality).parse::<u8>()?;
        if quality == 0 || quality > 100 {
            bail!(format!(
                "{} must be between 1 and 100, got {quality}",
                ConfigKey::AttachmentQuality
            ));
        }

        return Ok(CompressionOptions {
            max_size_mb,
            max_width_or_height,
            quality,
        });
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_float) = val.as_float() {
                        Config::set(key, &val_float.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!("config.toml has an invalid value for key '{key}'"));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::compression_options()?;

        tracing::debug!(
            chat_url = %Config::get(ConfigKey::ChatURL),
            transcript_file = %Config::get(ConfigKey::TranscriptFile),
            attachment_max_size_mb = %Config::get(ConfigKey::AttachmentMaxSizeMB),
            attachment_max_dimension = %Config::get(ConfigKey::AttachmentMaxDimension),
            attachment_quality = %Config::get(ConfigKey::AttachmentQuality),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<f64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
