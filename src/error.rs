use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No session configured; set `session` in Config.toml or FLAVOR_SWEEP_SESSION")]
    MissingSession,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Kaltura API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Operator input closed before an answer was given")]
    InputClosed,
}
