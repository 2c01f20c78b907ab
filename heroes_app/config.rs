use dotenvy::dotenv;
use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Root of uploaded files. Images live under `images/` inside it.
    pub uploads_dir: PathBuf,
    /// Prebuilt admin site served under `/admin`.
    pub admin_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Directory of the daily rotated log files.
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port = match env::var("PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(DEFAULT_PORT),
            Err(_) => DEFAULT_PORT,
        };

        let uploads_dir = match env::var("HEROES_UPLOADS_DIR") {
            Ok(val) => PathBuf::from(val),
            Err(_) => PathBuf::from("uploads"),
        };

        let admin_dir = match env::var("HEROES_ADMIN_DIR") {
            Ok(val) => PathBuf::from(val),
            Err(_) => PathBuf::from("admin"),
        };

        let max_upload_bytes = match env::var("HEROES_MAX_UPLOAD_BYTES") {
            Ok(val) => val.parse::<usize>().unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let log_dir = match env::var("HEROES_LOG_DIR") {
            Ok(val) => PathBuf::from(val),
            Err(_) => PathBuf::from("logs"),
        };

        Self {
            port,
            uploads_dir,
            admin_dir,
            max_upload_bytes,
            log_dir,
        }
    }

    /// Directory holding uploaded images, served under `/images`.
    pub fn images_dir(&self) -> PathBuf {
        self.uploads_dir.join("images")
    }
}
