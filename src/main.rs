// src/main.rs

use std::time::Instant;

use ratexec::{cli, elapsed_line, logging, run};

#[tokio::main]
async fn main() {
    let started = Instant::now();

    if let Err(err) = run_main().await {
        eprintln!("ratexec error: {err:#}");
        std::process::exit(1);
    }

    println!("{}", elapsed_line(started.elapsed()));
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
