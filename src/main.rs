use s3_file_gateway::utils::log_utils;
use s3_file_gateway::{args, run_app};

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let args = args::args_checks();
    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = log_utils::init(args.verbose) {
        eprintln!("Error: failed to initialise logging: {e}");
        std::process::exit(1);
    }

    // Run the application logic
    if let Err(e) = run_app(&args).await {
        tracing::error!("Application error: {e:#}");
        std::process::exit(1);
    }
}
