pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "concierge",
    about = "Concierge action server operator CLI",
    long_about = "Inspect configuration, check readiness, and run custom actions offline against a recorded webhook request.",
    after_help = "Examples:\n  concierge doctor --json\n  concierge config\n  concierge invoke --file request.json\n  cat request.json | concierge invoke --file -"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, listen address, and the action registry")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List the registered custom actions as JSON")]
    Actions,
    #[command(about = "Run a webhook request through the action executor and print the response")]
    Invoke {
        #[arg(long, value_name = "PATH", help = "Request JSON file, or `-` for stdin")]
        file: PathBuf,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Actions => commands::actions::run(),
        Command::Invoke { file } => commands::invoke::run(&file),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn invoke_requires_a_file_argument() {
        assert!(Cli::try_parse_from(["concierge", "invoke"]).is_err());

        let cli = Cli::try_parse_from(["concierge", "invoke", "--file", "-"]).expect("parses");
        assert!(matches!(cli.command, Command::Invoke { ref file } if file.as_os_str() == "-"));
    }

    #[test]
    fn doctor_json_flag_is_optional() {
        let cli = Cli::try_parse_from(["concierge", "doctor"]).expect("parses");
        assert!(matches!(cli.command, Command::Doctor { json: false }));
    }
}
