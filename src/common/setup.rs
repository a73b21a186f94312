use clap::{Arg, Command, ValueEnum, builder::EnumValueParser};
use serde::Deserialize;

use super::logging::init_logging;
use crate::inference::evaluator::{EvaluatorOptions, SummationScope};

/// How the report is rendered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human readable blocks.
    #[serde(rename = "text")]
    Text,

    /// Pretty-printed JSON.
    #[serde(rename = "json")]
    Json,
}

/// These options define the inputs from the user.
#[derive(Deserialize, Clone, Debug)]
pub struct CommandLineOptions {
    pub scenario_name: String,
    pub scope: SummationScope,
    pub use_shortcuts: bool,
    pub format: OutputFormat,
    pub output_file: Option<String>,
}

impl Default for CommandLineOptions {
    fn default() -> Self {
        CommandLineOptions {
            scenario_name: "coursework".to_string(),
            scope: SummationScope::FullJoint,
            use_shortcuts: true,
            format: OutputFormat::Text,
            output_file: None,
        }
    }
}

impl CommandLineOptions {
    pub fn evaluator_options(&self) -> EvaluatorOptions {
        EvaluatorOptions {
            scope: self.scope,
            use_shortcuts: self.use_shortcuts,
        }
    }
}

fn command() -> Command {
    Command::new("EXACTBAYES")
        .version("0.1")
        .about("Exact marginal, conditional and interventional queries over a five-variable Bayesian network.")
        .arg(
            Arg::new("scenario_name")
                .long("scenario_name")
                .value_name("STRING")
                .help("Question set to answer: 'coursework' or 'independence'")
                .default_value("coursework"),
        )
        .arg(
            Arg::new("scope")
                .long("scope")
                .value_parser(EnumValueParser::<SummationScope>::new())
                .help("Variables to sum over: 'full-joint' or 'ancestral'")
                .default_value("full-joint"),
        )
        .arg(
            Arg::new("no_shortcuts")
                .long("no_shortcuts")
                .help("Always sum the joint, even when a query reduces to a marginal")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(EnumValueParser::<OutputFormat>::new())
                .help("Report format: 'text' or 'json'")
                .default_value("text"),
        )
        .arg(
            Arg::new("output_file")
                .long("output_file")
                .value_name("FILE")
                .help("Also write the report to this file (optional)"),
        )
}

/// Parses options from an explicit argument list. Does not touch logging.
pub fn parse_options_from<I, T>(args: I) -> Result<CommandLineOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    let defaults = CommandLineOptions::default();
    Ok(CommandLineOptions {
        scenario_name: matches
            .get_one::<String>("scenario_name")
            .cloned()
            .unwrap_or(defaults.scenario_name),
        scope: matches
            .get_one::<SummationScope>("scope")
            .copied()
            .unwrap_or(defaults.scope),
        use_shortcuts: !matches.get_flag("no_shortcuts"),
        format: matches
            .get_one::<OutputFormat>("format")
            .copied()
            .unwrap_or(defaults.format),
        output_file: matches.get_one::<String>("output_file").cloned(),
    })
}

/// Initializes logging and parses the process arguments, exiting with
/// clap's usage message on bad input.
pub fn parse_configuration_options() -> CommandLineOptions {
    init_logging();
    parse_options_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = parse_options_from(["exactbayes"]).unwrap();
        assert_eq!(options.scenario_name, "coursework");
        assert_eq!(options.scope, SummationScope::FullJoint);
        assert!(options.use_shortcuts);
        assert_eq!(options.format, OutputFormat::Text);
        assert!(options.output_file.is_none());
    }

    #[test]
    fn test_all_flags() {
        let options = parse_options_from([
            "exactbayes",
            "--scenario_name",
            "independence",
            "--scope",
            "ancestral",
            "--no_shortcuts",
            "--format",
            "json",
            "--output_file",
            "report.json",
        ])
        .unwrap();
        assert_eq!(options.scenario_name, "independence");
        assert_eq!(options.scope, SummationScope::Ancestral);
        assert!(!options.use_shortcuts);
        assert_eq!(options.format, OutputFormat::Json);
        assert_eq!(options.output_file.as_deref(), Some("report.json"));
    }

    #[test]
    fn test_unknown_scope_rejected() {
        assert!(parse_options_from(["exactbayes", "--scope", "sampled"]).is_err());
    }
}
