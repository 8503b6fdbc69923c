use clap::Args;

use mflix::config::{self, StoreConfig};
use mflix::report::{ReportOptions, DEFAULT_COMMENTER};
use mflix::utils::validation;
use mflix::Connection;

use crate::output;

pub type CmdResult<T> = mflix::Result<(T, i32)>;

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
pub(crate) struct GlobalArgs {
    /// Read connection settings from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<String>,

    /// Database to query (overrides DATABASE)
    #[arg(long, global = true, value_name = "NAME")]
    pub database: Option<String>,

    /// Commenter shown by the comments report
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_COMMENTER)]
    pub commenter: String,

    /// Print a JSON envelope instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    pub fn report_options(&self) -> mflix::Result<ReportOptions> {
        let commenter =
            validation::require_non_empty(&self.commenter, "commenter", "Commenter name is required")?;
        Ok(ReportOptions {
            commenter: commenter.to_string(),
        })
    }
}

/// Load settings and open the store session for this process.
pub(crate) fn connect(global: &GlobalArgs) -> mflix::Result<Connection> {
    let applied = config::load_env_file(global.env_file.as_deref())?;
    if applied > 0 {
        mflix::log_status!("config", "Loaded {} setting(s) from env file", applied);
    }

    let mut store_config = StoreConfig::from_env()?;
    if let Some(database) = &global.database {
        let database = validation::require_non_empty(database, "database", "Database name is required")?;
        store_config = store_config.with_database(database);
    }

    Connection::connect(&store_config)
}

pub mod list;
pub mod reports;

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (mflix::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::List => output::map_cmd_result_to_json(list::run(global)),
        crate::Commands::RunAll => {
            output::map_cmd_result_to_json(reports::run_all(global, |_| Ok(())))
        }
        crate::Commands::Run(args) => {
            output::map_cmd_result_to_json(reports::run(args, global, |_| Ok(())))
        }
    }
}

/// Run a command in text mode and return its exit code.
///
/// Reports are printed as they complete, so a failure part-way keeps the
/// sections already written.
pub(crate) fn run_text(command: crate::Commands, global: &GlobalArgs) -> i32 {
    let result = match command {
        crate::Commands::List => list::run(global).and_then(|(out, exit_code)| {
            output::print_section(&list::render_text(&out), true)?;
            Ok(exit_code)
        }),
        crate::Commands::RunAll => {
            reports::run_all(global, section_printer()).map(|(_, exit_code)| exit_code)
        }
        crate::Commands::Run(args) => {
            reports::run(args, global, section_printer()).map(|(_, exit_code)| exit_code)
        }
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(err) => {
            output::print_error(&err);
            output::exit_code_for_error(err.code)
        }
    }
}

fn section_printer() -> impl FnMut(&mflix::ReportOutput) -> mflix::Result<()> {
    let mut first = true;
    move |report| {
        output::print_section(&report.render_text(), first)?;
        first = false;
        Ok(())
    }
}
