//! Print the OpenAPI document as JSON.

use std::io::Write;
use std::process::ExitCode;

use campgrounds::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    let json = match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => json,
        Err(err) => {
            eprintln!("failed to serialise OpenAPI document: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(err) = writeln!(stdout, "{json}") {
        eprintln!("failed to write OpenAPI document: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
