use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiration_minutes: u64,
    pub api_key: Option<String>,
    pub mailer_api_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let jwt_expiration_minutes = env::var("JWT_EXPIRATION_MINUTES")
            .unwrap_or_default()
            .parse::<u64>()
            .unwrap_or(1440);
        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-this-development-secret-at-least-32-chars".into()),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "enrollment-center".into()),
            jwt_audience: env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "enrollment-center-clients".into()),
            jwt_expiration_minutes,
            api_key: env::var("API_KEY").ok(),
            mailer_api_url: env::var("MAILER_API_URL").unwrap_or_else(|_| {
                "https://info.vttu.edu.vn/api/guest/mailer_service/add_queue.php".into()
            }),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(3000),
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_minutes * 60)
    }
}
