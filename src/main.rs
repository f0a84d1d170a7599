mod cli;

use cli::ExitCode;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(ExitCode::GeneralError as i32);
    }
}
