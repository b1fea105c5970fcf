use crate::error::HuffmanError;
use std::fmt;
use std::str::FromStr;

/// How the decoder treats input that does not line up with the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Drop trailing partial codes and undecodable bits without complaint.
    #[default]
    Lenient,
    /// Reject anything that is not an exact concatenation of codes.
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct CodecConfig {
    pub decode_policy: DecodePolicy,
}

impl CodecConfig {
    pub fn with_policy(mut self, decode_policy: DecodePolicy) -> Self {
        self.decode_policy = decode_policy;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.decode_policy == DecodePolicy::Strict
    }
}

impl FromStr for DecodePolicy {
    type Err = HuffmanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(DecodePolicy::Lenient),
            "strict" => Ok(DecodePolicy::Strict),
            _ => Err(HuffmanError::ConfigError(format!("Invalid decode policy: {}", s))),
        }
    }
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodePolicy::Lenient => f.write_str("lenient"),
            DecodePolicy::Strict => f.write_str("strict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("lenient".parse::<DecodePolicy>().unwrap(), DecodePolicy::Lenient);
        assert_eq!("STRICT".parse::<DecodePolicy>().unwrap(), DecodePolicy::Strict);
        assert!(matches!(
            "paranoid".parse::<DecodePolicy>(),
            Err(HuffmanError::ConfigError(_))
        ));
    }

    #[test]
    fn test_default_is_lenient() {
        let config = CodecConfig::default();
        assert_eq!(config.decode_policy, DecodePolicy::Lenient);
        assert!(!config.is_strict());
        assert!(config.with_policy(DecodePolicy::Strict).is_strict());
    }
}
