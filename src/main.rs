use anyhow::Result;
use exactbayes::common::report::Report;
use exactbayes::common::setup::parse_configuration_options;
use exactbayes::inference::QueryEvaluator;
use exactbayes::network::{NetworkConfig, NetworkModel};
use exactbayes::scenarios::QuestionSetFactory;
use exactbayes::{print_blue, print_red, print_yellow};
use log::info;

fn main() -> Result<()> {
    let options = parse_configuration_options();
    info!("options: {:?}", options);

    let network = NetworkModel::new_shared(&NetworkConfig::default())?;
    let evaluator = QueryEvaluator::new_shared(network, options.evaluator_options())?;
    let questions = QuestionSetFactory::new_shared(&options.scenario_name)?;

    let report = Report::build(questions.as_ref(), &evaluator);
    if let Some(heading) = report.heading(options.format) {
        print_blue!("{}", heading);
    }
    println!("{}", report.render(options.format)?);

    if let Some(path) = &options.output_file {
        report.write_to_file(path, options.format)?;
    }
    if report.failures() > 0 {
        print_red!("{} question(s) could not be answered", report.failures());
    }
    if report.mismatches() > 0 {
        print_yellow!("{} check(s) differ from their reference", report.mismatches());
    }
    Ok(())
}
