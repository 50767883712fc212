//! `works-server` command line

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::net::SocketAddr;
use std::path::PathBuf;
use works_server::{init_tracing, repository, serve, ServerConfig};
use works_store::{next_id, RecordStore, WriteDurability};

fn cli() -> Command {
    Command::new("works-server")
        .version(works_server::VERSION)
        .about("Portfolio works store and HTTP API")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Works JSON file"),
        )
        .arg(
            Arg::new("durable")
                .long("durable")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Sync every save to disk before replacing the file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit JSON log lines"),
        )
        .subcommand(
            Command::new("serve").about("Run the HTTP API (default)").arg(
                Arg::new("bind")
                    .long("bind")
                    .value_parser(value_parser!(SocketAddr))
                    .help("Listen address"),
            ),
        )
        .subcommand(Command::new("list").about("Print all works as JSON"))
        .subcommand(Command::new("check").about("Verify the works file parses"))
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<ServerConfig> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::new(),
    };
    let mut config = config.apply_env()?;

    if let Some(path) = matches.get_one::<PathBuf>("data") {
        config = config.with_data_path(path);
    }
    if matches.get_flag("durable") {
        config = config.with_durability(WriteDurability::Durable);
    }
    if matches.get_flag("log-json") {
        config = config.with_log_json(true);
    }
    if let Some(("serve", args)) = matches.subcommand() {
        if let Some(bind) = args.get_one::<SocketAddr>("bind") {
            config = config.with_bind(*bind);
        }
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config.log_filter, config.log_json)?;

    match matches.subcommand() {
        Some(("list", _)) => {
            let works = repository(&config)
                .list()
                .await
                .with_context(|| format!("reading {}", config.data_path.display()))?;
            println!("{}", serde_json::to_string_pretty(&works)?);
        }
        Some(("check", _)) => {
            let works = repository(&config)
                .store()
                .load_all()
                .await
                .with_context(|| format!("checking {}", config.data_path.display()))?;
            let next = next_id(&works)?;
            println!(
                "{}: {} works, next id {}",
                config.data_path.display(),
                works.len(),
                next
            );
        }
        _ => {
            serve(&config, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "failed to listen for ctrl-c");
                }
            })
            .await?;
        }
    }

    Ok(())
}
