use thiserror::Error;

pub type Result<T> = std::result::Result<T, SortvizError>;

#[derive(Debug, Error)]
pub enum SortvizError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl SortvizError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SortvizError;

    #[test]
    fn invalid_argument_exits_with_usage_code() {
        let error = SortvizError::invalid("bad --values");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "invalid argument: bad --values");
    }

    #[test]
    fn io_errors_exit_with_one() {
        let error = SortvizError::from(std::io::Error::other("tty gone"));
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().contains("tty gone"));
    }
}
