use contribviz::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
