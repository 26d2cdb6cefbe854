use refnet_cli::{build_command, logging, run};

#[tokio::main]
async fn main() {
    let matches = build_command().get_matches();
    logging::init(
        matches.get_count("verbose"),
        matches.get_flag("log-json"),
    );

    match run(&matches).await {
        Ok(outcome) => {
            print!("{}", outcome.output);
            if !outcome.output.ends_with('\n') {
                println!();
            }
            if !outcome.success {
                std::process::exit(1);
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}
