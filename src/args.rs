use crate::storage::DEFAULT_BUCKET;
use crate::utils::path_utils::check_staging_dir;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub fn args_checks() -> Args {
    Args::parse()
}

/// Storage credentials and region come from the environment, see `StorageConfig`
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP server binds to
    #[arg(short = 'l', long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,
    /// Bucket used by every route; created on first use if missing
    #[arg(short = 'b', long, default_value = DEFAULT_BUCKET)]
    pub bucket: String,
    /// Local directory used as upload source and download destination
    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        default_value = "./downloads",
        value_parser = check_staging_dir
    )]
    pub staging_dir: PathBuf,
    /// Print extra stuff, repeat for more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Validate values clap cannot check on its own
    pub fn validate(&self) -> Result<(), String> {
        let bucket = self.bucket.trim();
        if bucket.len() < 3 || bucket.len() > 63 {
            return Err(format!(
                "Bucket name '{}' must be between 3 and 63 characters.",
                self.bucket
            ));
        }
        if bucket != self.bucket {
            return Err(format!(
                "Bucket name '{}' must not have surrounding whitespace.",
                self.bucket
            ));
        }
        Ok(())
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            bucket: DEFAULT_BUCKET.to_string(),
            staging_dir: PathBuf::from("./downloads"),
            verbose: 0,
        }
    }
}
