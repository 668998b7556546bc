use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never got a reply
    #[error("Could not reach the server: {0}")]
    Transport(String),

    /// Non-2xx reply without an application error message
    #[error("Server responded with status {0}")]
    Status(u16),

    /// `error` field returned by the backend
    #[error("{0}")]
    Application(String),

    /// Payload did not have the expected shape
    #[error("Unexpected response: {0}")]
    Malformed(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            // the server answered, but not with JSON
            gloo_net::Error::SerdeError(err) => ApiError::Malformed(err.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_show_the_backend_message_verbatim() {
        let err = ApiError::Application("No selected file".to_string());
        assert_eq!(err.to_string(), "No selected file");
    }

    #[test]
    fn non_json_body_is_malformed_not_unreachable() {
        let parse = serde_json::from_str::<serde_json::Value>("<html>oops</html>").unwrap_err();
        let err = ApiError::from(gloo_net::Error::SerdeError(parse));
        assert!(matches!(err, ApiError::Malformed(_)));
        assert!(!err.to_string().contains("reach"));
    }

    #[test]
    fn other_gloo_failures_are_transport() {
        let err = ApiError::from(gloo_net::Error::GlooError("network down".to_string()));
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn status_errors_name_the_status() {
        assert_eq!(
            ApiError::Status(503).to_string(),
            "Server responded with status 503"
        );
    }
}
