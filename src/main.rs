use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match medaccess_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("medaccess: {e}");
            ExitCode::FAILURE
        }
    }
}
