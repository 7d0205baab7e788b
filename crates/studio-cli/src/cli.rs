//! Command-line definition

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Build the `studio` command
pub(crate) fn build() -> Command {
    Command::new("studio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate marketing designs through remote workflows")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (.toml, .yaml, .yml or .json)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(
            Command::new("generate")
                .about("Run the workflow for a scenario/template and print the artifact URL")
                .arg(selection_scenario())
                .arg(selection_template())
                .arg(
                    Arg::new("text")
                        .long("text")
                        .action(ArgAction::Append)
                        .value_parser(parse_assignment)
                        .help("Text field value as id=value (repeatable)"),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .action(ArgAction::Append)
                        .value_parser(parse_assignment)
                        .help("File field as id=path; uploaded before the run (repeatable)"),
                )
                .arg(
                    Arg::new("max-retries")
                        .long("max-retries")
                        .value_parser(value_parser!(u32))
                        .help("Override the configured retry count"),
                ),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload a file and print its file id")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("File to upload"),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Find the artifact URL in a saved workflow response")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Response JSON file, or - for stdin"),
                ),
        )
        .subcommand(
            Command::new("fields")
                .about("List the input fields for a scenario/template")
                .arg(selection_scenario())
                .arg(selection_template()),
        )
        .subcommand(
            Command::new("route")
                .about("Print the workflow id for a scenario/template")
                .arg(selection_scenario())
                .arg(selection_template()),
        )
}

fn selection_scenario() -> Arg {
    Arg::new("scenario")
        .long("scenario")
        .required(true)
        .help("Scenario id, e.g. poster")
}

fn selection_template() -> Arg {
    Arg::new("template")
        .long("template")
        .help("Template id, e.g. poster-promotion-1")
}

/// Parse `id=value`; the value may itself contain `=`
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected id=value, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing field id in '{raw}'"));
    }
    Ok((id.to_string(), value.to_string()))
}

/// Collected `id=value` pairs for an appendable argument
pub(crate) fn assignments(args: &ArgMatches, name: &str) -> Vec<(String, String)> {
    args.get_many::<(String, String)>(name)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn command_is_well_formed() {
        build().debug_assert();
    }

    #[test]
    fn assignment_parsing() {
        assert_eq!(parse_assignment("input=Summer sale"), Ok(("input".into(), "Summer sale".into())));
        assert_eq!(parse_assignment("q=a=b"), Ok(("q".into(), "a=b".into())));
        assert_eq!(parse_assignment("prompt="), Ok(("prompt".into(), String::new())));
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn generate_collects_repeated_fields() {
        let matches = build()
            .try_get_matches_from([
                "studio",
                "generate",
                "--scenario",
                "poster",
                "--template",
                "poster-promotion-1",
                "--text",
                "input=Autumn",
                "--file",
                "logo=./logo.png",
                "--text",
                "extra=x",
                "--max-retries",
                "0",
            ])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "generate");
        assert_eq!(
            assignments(args, "text"),
            vec![("input".to_string(), "Autumn".to_string()), ("extra".to_string(), "x".to_string())]
        );
        assert_eq!(assignments(args, "file").len(), 1);
        assert_eq!(args.get_one::<u32>("max-retries"), Some(&0));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = build()
            .try_get_matches_from(["studio", "route", "--scenario", "banner", "--json", "--config", "s.toml"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert!(args.get_flag("json"));
        assert_eq!(args.get_one::<PathBuf>("config"), Some(&PathBuf::from("s.toml")));
    }

    #[test]
    fn scenario_is_required() {
        assert!(build().try_get_matches_from(["studio", "fields"]).is_err());
    }
}
