use std::process::ExitCode;

use factorio_online::{init_logging, run, ConnectionConfig, Mode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let outcome = run(
        Mode::EnvFallback,
        std::env::args_os(),
        |key| std::env::var(key).ok(),
        &ConnectionConfig::build(),
    )
    .await;

    println!("{}", outcome);
    outcome.exit_code()
}
