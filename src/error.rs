use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Invalid table format: {0}")]
	InvalidFormat(String),

	#[error("Malformed encoded input: {0}")]
	MalformedInput(String),

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
