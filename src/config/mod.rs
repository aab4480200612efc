use crate::util::common::{get_bool_from_env_or, get_env_or, load_dotenv};

pub mod db;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Basic app info
    pub app_name: String,

    // Secret used to sign the flash-message cookie
    pub secret_key: String,

    // App settings
    pub static_url: String,
    pub static_path: String,

    // Server settings
    pub http: HTTPConfig,
    pub db: DBConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct HTTPConfig {
    pub ip: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DBConfig {
    pub url: String,
    pub pool_size: u32,
    pub auto_migrate: bool,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_requests: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        load_dotenv();

        let app_name = get_env_or("APP_NAME", "Quill".to_string()).unwrap();
        let secret_key = get_env_or("SECRET_KEY", DEV_SECRET_KEY.to_string()).unwrap();
        let static_url = get_env_or("STATIC_URL", "/static".to_string()).unwrap();
        let static_path = get_env_or("STATIC_PATH", "./static".to_string()).unwrap();

        AppConfig {
            app_name,
            secret_key,
            static_url,
            static_path,

            http: HTTPConfig::from_env(),
            db: DBConfig::from_env(),
            log: LogConfig::from_env(),
        }
    }

    pub fn validate_config(&self) {
        // The signing key is derived from this value and needs enough entropy.
        if self.secret_key.len() < 32 {
            panic!("SECRET_KEY must be at least 32 bytes long");
        }
    }
}

impl HTTPConfig {
    pub fn from_env() -> Self {
        load_dotenv();

        let ip = get_env_or("HTTP_IP", "127.0.0.1".to_string()).unwrap();
        let port = get_env_or("HTTP_PORT", 8000).unwrap();

        HTTPConfig { ip, port }
    }
}

impl DBConfig {
    pub fn from_env() -> Self {
        load_dotenv();

        let url = get_env_or("DATABASE_URL", "quill.db".to_string()).unwrap();
        let pool_size = get_env_or("DATABASE_POOL_SIZE", 5).unwrap();
        let auto_migrate = get_bool_from_env_or("DATABASE_AUTO_MIGRATE", true).unwrap();

        DBConfig {
            url,
            pool_size,
            auto_migrate,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        load_dotenv();

        let log_requests = get_bool_from_env_or("LOG_REQUESTS", false).unwrap();

        LogConfig { log_requests }
    }
}

// Fallback for development only; validate_config rejects anything shorter than 32 bytes,
// so a production deployment must set SECRET_KEY explicitly.
const DEV_SECRET_KEY: &str = "quill-dev-secret-key-do-not-use-in-production";
