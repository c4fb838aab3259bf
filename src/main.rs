mod core;
mod inference;
mod mcp;
#[cfg(test)]
mod test_support;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use tokio_util::sync::CancellationToken;

use crate::core::config::{ConfigStore, FileConfigStore, validate};
use crate::core::{Gateway, SendOutcome};

#[derive(Parser)]
#[command(name = "parley", about = "AI chat gateway with provider selection and MCP tools")]
struct Args {
    /// Path to the config file (defaults to ~/.parley/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parley.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Parley starting up");

    let store = match args.config {
        Some(path) => FileConfigStore::at(path),
        None => FileConfigStore::new(),
    };
    if !validate(&store.load()) {
        eprintln!("warning: configuration is incomplete, chat may be unavailable");
    }

    let mut gateway = Gateway::new(Arc::new(store));
    repl(&gateway).await?;
    gateway.shutdown();
    Ok(())
}

/// Line-oriented chat loop. `/tools` lists discovered tools, `/quit` exits,
/// Ctrl-C cancels the in-flight request.
async fn repl(gateway: &Gateway) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" | "/exit" => break,
            "/tools" => {
                let tools = gateway.available_tools().await;
                if tools.is_empty() {
                    println!("(no tools available)");
                }
                for tool in tools {
                    println!("{}: {}", tool.name, tool.description);
                }
            }
            message => {
                let cancel = CancellationToken::new();
                let guard = cancel.clone();
                let ctrl_c = tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        guard.cancel();
                    }
                });

                match gateway.send_message(message, &cancel).await {
                    SendOutcome::Cancelled => println!("(cancelled)"),
                    SendOutcome::Completed(result) => {
                        if result.is_error {
                            let message = result
                                .error_message
                                .unwrap_or_else(|| "unknown error".to_string());
                            eprintln!("error: {message}");
                        } else {
                            println!("{}", result.text_content);
                            for url in &result.image_urls {
                                println!("[image] {url}");
                            }
                        }
                    }
                }
                ctrl_c.abort();
            }
        }
    }

    Ok(())
}
