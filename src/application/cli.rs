#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::help_text;
use crate::domain::models::Conversation;
use crate::domain::models::TranscriptStore;
use crate::domain::services::FileTranscriptStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn format_transcript(conversation: &Conversation) -> String {
    return conversation
        .messages()
        .iter()
        .map(|message| {
            let mut res = format!("{}: {}", message.author, message.text);
            if let Some(attachment) = &message.attachment {
                res = format!("{res}\n[image: {attachment}]");
            }
            return res;
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

async fn print_transcript() -> Result<()> {
    let conversation = FileTranscriptStore::default().load().await?;
    if conversation.is_placeholder() {
        println!("There is no saved transcript yet. You should start your first chat!");
        return Ok(());
    }

    println!("{}", format_transcript(&conversation));
    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    let parent = config_file_path
        .parent()
        .ok_or_else(|| return anyhow!("Config file path has no parent directory"))?;
    if !parent.exists() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_transcript() -> Command {
    return Command::new("transcript")
        .about("Manage the saved conversation.")
        .arg_required_else_help(true)
        .subcommand(Command::new("path").about("Print the transcript file path."))
        .subcommand(Command::new("show").about("Print the saved conversation."))
        .subcommand(Command::new("clear").about("Delete the saved conversation."));
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start chatting. This is the default when no command is given.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("INPUT:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("vdmax")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_transcript())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("VDMAX_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ChatURL.to_string())
                .short('u')
                .long(ConfigKey::ChatURL.to_string())
                .env("VDMAX_CHAT_URL")
                .num_args(1)
                .help(format!("Chat endpoint that receives the prompt and streams the answer back. [default: {}]", Config::default(ConfigKey::ChatURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TranscriptFile.to_string())
                .long(ConfigKey::TranscriptFile.to_string())
                .env("VDMAX_TRANSCRIPT_FILE")
                .num_args(1)
                .help(format!("Where the conversation is saved between runs. [default: {}]", Config::default(ConfigKey::TranscriptFile)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AttachmentMaxSizeMB.to_string())
                .long(ConfigKey::AttachmentMaxSizeMB.to_string())
                .env("VDMAX_ATTACHMENT_MAX_SIZE_MB")
                .num_args(1)
                .help(format!("Largest image upload in megabytes, after compression. [default: {}]", Config::default(ConfigKey::AttachmentMaxSizeMB)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AttachmentMaxDimension.to_string())
                .long(ConfigKey::AttachmentMaxDimension.to_string())
                .env("VDMAX_ATTACHMENT_MAX_DIMENSION")
                .num_args(1)
                .help(format!("Images are downsized so neither side exceeds this many pixels. [default: {}]", Config::default(ConfigKey::AttachmentMaxDimension)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AttachmentQuality.to_string())
                .long(ConfigKey::AttachmentQuality.to_string())
                .env("VDMAX_ATTACHMENT_QUALITY")
                .num_args(1)
                .help(format!("Starting JPEG quality for compressed images, from 1 to 100. [default: {}]", Config::default(ConfigKey::AttachmentQuality)))
                .global(true),
        );
}

async fn parse_transcript(matches: &ArgMatches, subcmd_matches: &ArgMatches) -> Result<()> {
    Config::load(vec![matches, subcmd_matches]).await?;

    match subcmd_matches.subcommand() {
        Some(("path", _)) => {
            println!("{}", Config::get(ConfigKey::TranscriptFile));
        }
        Some(("show", _)) => {
            print_transcript().await?;
        }
        Some(("clear", _)) => {
            FileTranscriptStore::default().clear().await?;
            println!("Deleted the saved transcript");
        }
        _ => {
            subcommand_transcript().print_long_help()?;
        }
    }

    return Ok(());
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("transcript", subcmd_matches)) => {
            parse_transcript(&matches, subcmd_matches).await?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
