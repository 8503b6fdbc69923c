use serde::Serialize;

use mflix::Report;

use super::{CmdResult, GlobalArgs};

#[derive(Debug, Serialize)]
pub struct ReportInfo {
    pub id: String,
    pub collection: String,
    pub heading: String,
    pub stages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub command: String,
    pub reports: Vec<ReportInfo>,
}

pub fn run(global: &GlobalArgs) -> CmdResult<ListOutput> {
    let options = global.report_options()?;

    let reports = Report::ALL
        .iter()
        .map(|report| ReportInfo {
            id: report.id().to_string(),
            collection: report.collection().to_string(),
            heading: report.heading().to_string(),
            stages: report
                .pipeline(&options)
                .operators()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    Ok((
        ListOutput {
            command: "reports.list".to_string(),
            reports,
        },
        0,
    ))
}

pub fn render_text(output: &ListOutput) -> String {
    let width = output
        .reports
        .iter()
        .map(|r| r.id.len())
        .max()
        .unwrap_or(0);

    output
        .reports
        .iter()
        .map(|r| {
            format!(
                "{:<width$}  {:<8}  {}",
                r.id,
                r.collection,
                r.stages.join(" > "),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
