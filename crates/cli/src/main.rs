use std::process::ExitCode;

fn main() -> ExitCode {
    edulearn_cli::run()
}
