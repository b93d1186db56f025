mod dir_checks;
mod file_checks;

pub use dir_checks::check_staging_dir;
pub use file_checks::{is_plain_file_name, object_key_for};
