//! Subcommand handlers

use crate::cli::assignments;
use anyhow::{Context, Result};
use clap::ArgMatches;
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use studio_config::StudioConfig;
use studio_core::{FormState, Selection, Studio, StudioError};

/// Exit status when a run succeeded but nothing usable came back
pub(crate) const EXIT_NOT_FOUND: u8 = 2;

/// Load the config file (if any) and apply environment overrides
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<StudioConfig> {
    let config = match path {
        Some(path) => StudioConfig::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => StudioConfig::new(),
    };
    let config = config.with_env_overrides()?;
    config.validate()?;
    Ok(config)
}

fn selection(args: &ArgMatches) -> Selection {
    let scenario = args.get_one::<String>("scenario").cloned().unwrap_or_default();
    let selection = Selection::scenario(scenario);
    match args.get_one::<String>("template") {
        Some(template) => selection.with_template(template.clone()),
        None => selection,
    }
}

/// Print the user message for an action error; maps to exit status
fn report(err: &StudioError) -> ExitCode {
    tracing::debug!(error = %err, "action failed");
    eprintln!("{}", err.user_message());
    match err {
        StudioError::NoArtifact { .. } => ExitCode::from(EXIT_NOT_FOUND),
        _ => ExitCode::FAILURE,
    }
}

pub(crate) async fn generate(config: StudioConfig, args: &ArgMatches) -> Result<ExitCode> {
    let selection = selection(args);
    let mut policy = config.retry.clone();
    if let Some(max_retries) = args.get_one::<u32>("max-retries") {
        policy = policy.with_max_retries(*max_retries);
    }

    let studio = match Studio::connect(config) {
        Ok(studio) => studio,
        Err(err) => return Ok(report(&err)),
    };

    let mut form = FormState::new();
    for (field, value) in assignments(args, "text") {
        form.set_text(field, value);
    }
    for (field, path) in assignments(args, "file") {
        match studio.upload_path_into_form(&mut form, &selection, &field, &path).await {
            Ok(uploaded) => tracing::info!(field = %field, file_id = %uploaded.file_id, "attached file"),
            Err(err) => return Ok(report(&err)),
        }
    }

    match studio.generate_with(&selection, &form, &policy).await {
        Ok(design) => {
            println!("{}", design.url);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

pub(crate) async fn upload(config: StudioConfig, args: &ArgMatches) -> Result<ExitCode> {
    let path = args.get_one::<PathBuf>("path").context("missing path")?;
    let studio = match Studio::connect(config) {
        Ok(studio) => studio,
        Err(err) => return Ok(report(&err)),
    };

    match studio.upload_path(path).await {
        Ok(uploaded) => {
            println!("{}", uploaded.file_id);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

pub(crate) fn extract(args: &ArgMatches, as_json: bool) -> Result<ExitCode> {
    let input = args.get_one::<String>("input").context("missing input")?;
    let response = read_response(input)?;

    let Some(found) = studio_extract::extract_artifact(&response) else {
        eprintln!("No artifact URL found in the response.");
        return Ok(ExitCode::from(EXIT_NOT_FOUND));
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        println!("{}\t{}", found.url, found.strategy);
    }
    Ok(ExitCode::SUCCESS)
}

fn read_response(input: &str) -> Result<Value> {
    let raw = if input == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw).context("reading stdin")?;
        raw
    } else {
        std::fs::read_to_string(Path::new(input)).with_context(|| format!("reading {input}"))?
    };
    serde_json::from_str(&raw).context("response is not valid JSON")
}

pub(crate) fn fields(config: &StudioConfig, args: &ArgMatches, as_json: bool) -> Result<ExitCode> {
    let selection = selection(args);
    let fields = config.fields.resolve(&selection.scenario, selection.template());

    if as_json {
        println!("{}", serde_json::to_string_pretty(fields)?);
    } else {
        for field in fields {
            println!("{}\t{}\t{}\t{}", field.id, field.kind, field.label, field.placeholder);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn route(config: &StudioConfig, args: &ArgMatches, as_json: bool) -> Result<ExitCode> {
    let selection = selection(args);
    let workflow_id = config.workflows.resolve(&selection.scenario, selection.template());

    if as_json {
        let out = json!({
            "scenario": selection.scenario,
            "template": selection.template,
            "workflow_id": workflow_id,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{workflow_id}");
    }
    Ok(ExitCode::SUCCESS)
}
