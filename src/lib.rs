pub mod args;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod server;
pub mod storage;
pub mod testing;
pub mod utils;

pub use args::Args;
pub use config::StorageConfig;
pub use interfaces::ObjectStore;
pub use storage::Gateway;

/// Read storage configuration from the environment and serve HTTP
pub async fn run_app(args: &Args) -> anyhow::Result<()> {
    let storage = StorageConfig::from_env()?;
    server::run(args, storage).await
}
