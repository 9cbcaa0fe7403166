use std::process::ExitCode;

use colored::Colorize;
use estree_swift::cli::CommandLineInterface;
use estree_swift::transpile::TranspileError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let command_line_interface = CommandLineInterface::load();
    match command_line_interface.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            // fatal: the inputs or hints need fixing before a rerun can help
            let fatal = error
                .downcast_ref::<TranspileError>()
                .is_some_and(TranspileError::is_fatal);
            ExitCode::from(if fatal { 2 } else { 1 })
        }
    }
}
