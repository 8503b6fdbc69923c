use clap::Args;
use serde::Serialize;

use mflix::{AggregateStore, Report, ReportOptions, ReportOutput};

use super::{CmdResult, GlobalArgs};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Report id (see `mflix list`)
    pub report: String,
}

#[derive(Debug, Serialize)]
pub struct ReportsOutput {
    pub command: String,
    pub database: String,
    pub reports: Vec<ReportOutput>,
}

pub fn run_all<F>(global: &GlobalArgs, on_report: F) -> CmdResult<ReportsOutput>
where
    F: FnMut(&ReportOutput) -> mflix::Result<()>,
{
    let options = global.report_options()?;
    let connection = super::connect(global)?;
    let reports = execute(&connection, &Report::ALL, &options, on_report)?;

    Ok((
        ReportsOutput {
            command: "reports.all".to_string(),
            database: connection.database_name().to_string(),
            reports,
        },
        0,
    ))
}

pub fn run<F>(args: RunArgs, global: &GlobalArgs, on_report: F) -> CmdResult<ReportsOutput>
where
    F: FnMut(&ReportOutput) -> mflix::Result<()>,
{
    // Resolve the id before touching the network
    let report = Report::from_id(&args.report)?;
    let options = global.report_options()?;
    let connection = super::connect(global)?;
    let reports = execute(&connection, &[report], &options, on_report)?;

    Ok((
        ReportsOutput {
            command: format!("reports.{}", report.id()),
            database: connection.database_name().to_string(),
            reports,
        },
        0,
    ))
}

/// Run `reports` in order, handing each result to `on_report` before the
/// next one starts. Stops at the first failure.
pub fn execute<S, F>(
    store: &S,
    reports: &[Report],
    options: &ReportOptions,
    mut on_report: F,
) -> mflix::Result<Vec<ReportOutput>>
where
    S: AggregateStore + ?Sized,
    F: FnMut(&ReportOutput) -> mflix::Result<()>,
{
    let mut outputs = Vec::with_capacity(reports.len());

    for report in reports {
        mflix::log_status!("report", "Running {}", report.id());
        let output = report.run(store, options)?;
        mflix::log_status!("report", "{}: {} row(s)", report.id(), output.row_count());
        on_report(&output)?;
        outputs.push(output);
    }

    Ok(outputs)
}
