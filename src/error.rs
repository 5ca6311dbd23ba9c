use sixel_reductor::ReductorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedPng(String),

    #[error("Conversion error: {0}")]
    Reduce(#[from] ReductorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_png() {
        let error = CliError::UnsupportedPng("16-bit indexed".to_string());
        assert_eq!(error.to_string(), "Unsupported PNG layout: 16-bit indexed");
    }

    #[test]
    fn test_config_error() {
        let error = CliError::Config("unknown color mode: 7".to_string());
        assert_eq!(error.to_string(), "Config error: unknown color mode: 7");
    }

    #[test]
    fn test_reduce_error_from() {
        let error: CliError = ReductorError::InvalidGain(600).into();
        assert!(matches!(error, CliError::Reduce(_)));
        assert_eq!(
            error.to_string(),
            "Conversion error: output gain 600 out of range (0..=512)"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CliError = io_error.into();
        assert!(matches!(error, CliError::Io(_)));
        assert!(error.to_string().contains("file not found"));
    }
}
