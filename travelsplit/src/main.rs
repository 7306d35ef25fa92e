mod bootstrap;

use bootstrap::{AppConfig, init_logging};
use std::{borrow::Cow, env, fs, io, process};
use travelsplit_application::{ProcessError, SettlementProcessor};
use travelsplit_domain::SettlementCalculator;
use travelsplit_i18n as i18n;
use travelsplit_infrastructure::JsonDocumentParser;
use travelsplit_presentation::{ReportPresenter, format_process_error};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    init_logging();

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;

    let Some(path) = env::args().nth(1) else {
        return Err(i18n::USAGE.into());
    };
    let source = read_input(&path)?;

    let context = config.context();
    let parser = JsonDocumentParser::new(context);
    let processor = SettlementProcessor::new(&parser, SettlementCalculator::with_context(context));

    let report = match processor.build_report(&source) {
        Ok(report) => report,
        Err(ProcessError::NoPayments) => {
            println!("{}", i18n::NO_PAYMENTS);
            return Ok(());
        }
        Err(err) => return Err(format_process_error(&err).into()),
    };
    tracing::info!(
        input = %path,
        transfer_count = report.settlement.transfers.len(),
        "Settlement report ready"
    );

    println!(
        "{}",
        ReportPresenter::render(&report, &config.summary_style(), config.tolerance)
    );
    Ok(())
}

/// `-` reads standard input.
fn read_input(path: &str) -> CliResult<String> {
    let result = if path == "-" {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(path)
    };
    result.map_err(|err| i18n::failed_to_read(path, err).into())
}
