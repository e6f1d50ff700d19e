use anyhow::{Context, Result};
use base64::Engine;

use super::config_model::{Auth, Database, DotEnvyConfig, Mux, MuxSigning, Server};

const DEFAULT_MUX_BASE_URL: &str = "https://api.mux.com";
const DEFAULT_MUX_STATS_BASE_URL: &str = "https://stats.mux.com";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let auth = Auth {
        jwt_secret: std::env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET is invalid"),
    };

    let mux = Mux {
        token_id: std::env::var("MUX_TOKEN_ID").expect("MUX_TOKEN_ID is invalid"),
        token_secret: std::env::var("MUX_TOKEN_SECRET").expect("MUX_TOKEN_SECRET is invalid"),
        base_url: std::env::var("MUX_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_MUX_BASE_URL.to_string()),
        stats_base_url: std::env::var("MUX_STATS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_MUX_STATS_BASE_URL.to_string()),
    };

    let signing_private_key_base64 =
        std::env::var("MUX_SIGNING_PRIVATE_KEY").expect("MUX_SIGNING_PRIVATE_KEY is invalid");
    let private_key = base64::engine::general_purpose::STANDARD
        .decode(signing_private_key_base64.trim())
        .context("MUX_SIGNING_PRIVATE_KEY is not valid base64")?;
    let private_key =
        String::from_utf8(private_key).context("MUX_SIGNING_PRIVATE_KEY is not UTF-8 PEM")?;

    let mux_signing = MuxSigning {
        key_id: std::env::var("MUX_SIGNING_KEY_ID").expect("MUX_SIGNING_KEY_ID is invalid"),
        private_key,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        auth,
        mux,
        mux_signing,
    })
}

pub fn get_auth_secret() -> Result<Auth> {
    dotenvy::dotenv().ok();

    Ok(Auth {
        jwt_secret: std::env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET is invalid"),
    })
}
