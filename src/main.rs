mod cli;

use anyhow::Result;
use cli::{Args, Command, HistoryAction, KeyAction};
use deep_dissect::config::AppConfig;
use deep_dissect::history::HistoryStore;
use deep_dissect::logging::setup_logging;
use deep_dissect::orchestrator::Orchestrator;
use deep_dissect::proxy;
use deep_dissect::settings::{mask_key, SettingsStore};
use deep_dissect::storage::{FileStorage, Storage};
use deep_dissect::tools::ToolId;
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(proxy_url) = args.proxy_url {
        config.proxy_base_url = proxy_url;
    }

    match args.command {
        Command::Run { tool, input } => {
            let orchestrator = Orchestrator::from_config(&config);
            let result = orchestrator.run_tool(tool, parse_input(&input)).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Tools => {
            for tool in ToolId::ALL {
                println!("{:<18} {}", tool.as_str(), tool.description());
            }
        }
        Command::History { action } => {
            let history = HistoryStore::new(storage(&config));
            match action {
                HistoryAction::List => {
                    println!("{}", serde_json::to_string_pretty(&history.list())?);
                }
                HistoryAction::Clear => {
                    history.clear()?;
                    eprintln!("History cleared");
                }
                HistoryAction::Remove { id } => {
                    let remaining = history.remove(&id)?;
                    eprintln!("{} records remaining", remaining.len());
                }
            }
        }
        Command::Key { action } => {
            let settings = SettingsStore::new(storage(&config));
            match action {
                KeyAction::Set { key } => {
                    settings.set_api_key(&key)?;
                    match settings.api_key() {
                        Some(_) => eprintln!("API key saved"),
                        None => eprintln!("API key removed"),
                    }
                }
                KeyAction::Clear => {
                    settings.clear_api_key()?;
                    eprintln!("API key removed");
                }
                KeyAction::Show => match settings.api_key() {
                    Some(key) => println!("{}", mask_key(&key)),
                    None => println!("(not set)"),
                },
            }
        }
        Command::Proxy { port } => {
            proxy::serve(port.unwrap_or(config.proxy_port), config.deepseek.clone()).await?;
        }
    }

    Ok(())
}

fn storage(config: &AppConfig) -> Arc<dyn Storage> {
    Arc::new(FileStorage::new(config.data_dir.clone()))
}

/// JSON when the input parses as JSON, the raw text otherwise
fn parse_input(input: &str) -> Value {
    serde_json::from_str(input).unwrap_or_else(|_| Value::String(input.to_string()))
}
