#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub auth: Auth,
    pub mux: Mux,
    pub mux_signing: MuxSigning,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub jwt_secret: String,
}

/// API credentials and endpoints of the video platform.
#[derive(Debug, Clone)]
pub struct Mux {
    pub token_id: String,
    pub token_secret: String,
    pub base_url: String,
    pub stats_base_url: String,
}

/// Key material for signing status credentials. The private key is stored
/// base64-encoded in the environment and decoded to PEM at load time.
#[derive(Debug, Clone)]
pub struct MuxSigning {
    pub key_id: String,
    pub private_key: String,
}
