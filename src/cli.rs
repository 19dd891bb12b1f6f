use clap::{Parser, Subcommand};
use deep_dissect::tools::ToolId;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an analysis tool and print the result as JSON
    Run {
        /// Tool to run
        #[arg(value_enum)]
        tool: ToolId,

        /// Tool input: JSON for structured tools, plain text otherwise
        input: String,
    },

    /// List the available tools
    Tools,

    /// Inspect or edit the request history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage the primary provider API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Run the DeepSeek proxy server
    Proxy {
        /// Port to listen on (defaults to the configured proxy port)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Print all records, newest first
    List,
    /// Delete every record
    Clear,
    /// Delete a single record
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Store a new key (an empty key removes it)
    Set { key: String },
    /// Remove the stored key
    Clear,
    /// Show the stored key, masked
    Show,
}

#[derive(Parser, Debug)]
#[command(version, about = "Structured AI analysis tools with provider fallback", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for settings and history
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the proxy used for the primary provider
    #[arg(long, global = true)]
    pub proxy_url: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        <Args as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_command_parsing() {
        let args = Args::try_parse_from(["test", "run", "devils-advocate", "猫是液体"])
            .expect("Failed to parse run args");

        match args.command {
            Command::Run { tool, input } => {
                assert_eq!(tool, ToolId::DevilsAdvocate);
                assert_eq!(input, "猫是液体");
            }
            other => panic!("Expected run command, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "test",
            "history",
            "list",
            "-vv",
            "--data-dir",
            "/tmp/dd",
            "--proxy-url",
            "http://proxy",
        ])
        .expect("Failed to parse global flags");

        assert_eq!(args.verbose, 2);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/dd")));
        assert_eq!(args.proxy_url.as_deref(), Some("http://proxy"));
        assert!(matches!(
            args.command,
            Command::History {
                action: HistoryAction::List
            }
        ));
    }

    #[test]
    fn key_and_proxy_commands() {
        let args = Args::try_parse_from(["test", "key", "set", "sk-1"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Key {
                action: KeyAction::Set { ref key }
            } if key == "sk-1"
        ));

        let args = Args::try_parse_from(["test", "proxy", "--port", "8080"]).unwrap();
        assert!(matches!(args.command, Command::Proxy { port: Some(8080) }));
    }

    #[test]
    fn unknown_tool_is_rejected() {
        assert!(Args::try_parse_from(["test", "run", "NOPE", "x"]).is_err());
    }
}
