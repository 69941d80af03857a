use std::process::ExitCode;

use factorio_online::{init_logging, run, ConnectionConfig, Mode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let outcome = run(
        Mode::Strict,
        std::env::args_os(),
        |_| None,
        &ConnectionConfig::build(),
    )
    .await;

    println!("{}", outcome);
    outcome.exit_code()
}
