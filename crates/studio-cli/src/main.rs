//! `studio` command-line front end

mod cli;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `STUDIO_LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("STUDIO_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let matches = cli::build().get_matches();
    let Some((name, args)) = matches.subcommand() else {
        return Ok(ExitCode::FAILURE);
    };
    let as_json = args.get_flag("json");

    // extract works on a saved response and needs no configuration
    if name == "extract" {
        return commands::extract(args, as_json);
    }

    let config = commands::load_config(args.get_one::<PathBuf>("config"))?;
    match name {
        "generate" => commands::generate(config, args).await,
        "upload" => commands::upload(config, args).await,
        "fields" => commands::fields(&config, args, as_json),
        "route" => commands::route(&config, args, as_json),
        other => anyhow::bail!("unknown command '{other}'"),
    }
}
