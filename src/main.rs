use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Text,
}

mod commands;
mod output;
mod tty;

use commands::reports;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "mflix")]
#[command(version = VERSION)]
#[command(about = "Run demonstration aggregation pipelines against the sample_mflix dataset")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every report in order (default)
    RunAll,
    /// Run a single report
    Run(reports::RunArgs),
    /// List available reports and their pipelines
    #[command(visible_alias = "ls")]
    List,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let mode = if cli.global.json {
        ResponseMode::Json
    } else {
        ResponseMode::Text
    };
    let command = cli.command.unwrap_or(Commands::RunAll);

    let exit_code = match mode {
        ResponseMode::Json => {
            tty::status("mflix is working...");
            let (json_result, exit_code) = commands::run_json(command, &cli.global);
            if let Err(err) = output::print_json_result(json_result) {
                output::print_error(&err);
                return std::process::ExitCode::from(exit_code_to_u8(1));
            }
            exit_code
        }
        ResponseMode::Text => commands::run_text(command, &cli.global),
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
