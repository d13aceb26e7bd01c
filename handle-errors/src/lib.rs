use serde::Serialize;
use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::{InvalidQuery, MethodNotAllowed, Reject, UnsupportedMediaType},
};

use tracing::{Level, event, instrument};

#[derive(Debug)]
pub enum Error {
    ParseError(std::num::ParseIntError),
    InvalidEncoding(std::str::Utf8Error),
    MissingParameter(&'static str),
    InvalidEmail(String),
    InvalidQuestion(String),
    StateNotFound(String),
    UserNotFound(String),
    SeedError(serde_json::Error),
    ConfigError(config::ConfigError),
    InvalidConfig(&'static str),
    Unexpected(String),
}

/// JSON body of every error response.
#[derive(Serialize, Debug, Clone)]
pub struct ErrorMessage {
    pub message: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &*self {
            Error::ParseError(err) => {
                write!(f, "Cannot parse parameter: {}", err)
            }
            Error::InvalidEncoding(err) => {
                write!(f, "Cannot decode path segment: {}", err)
            }
            Error::MissingParameter(name) => {
                write!(f, "Missing parameter: {}", name)
            }
            Error::InvalidEmail(email) => {
                write!(f, "Invalid email address: {}", email)
            }
            Error::InvalidQuestion(reason) => {
                write!(f, "Invalid question: {}", reason)
            }
            Error::StateNotFound(abbreviation) => {
                write!(f, "State not found: {}", abbreviation)
            }
            Error::UserNotFound(_) => {
                write!(f, "User not found")
            }
            Error::SeedError(err) => {
                write!(f, "Cannot read seed data: {}", err)
            }
            Error::ConfigError(err) => {
                write!(f, "Cannot load configuration: {}", err)
            }
            Error::InvalidConfig(reason) => {
                write!(f, "Invalid configuration: {}", reason)
            }
            Error::Unexpected(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Reject for Error {}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::ConfigError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SeedError(err)
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::ParseError(_)
            | Error::InvalidEncoding(_)
            | Error::MissingParameter(_)
            | Error::InvalidEmail(_)
            | Error::InvalidQuestion(_) => StatusCode::BAD_REQUEST,
            Error::StateNotFound(_) | Error::UserNotFound(_) => StatusCode::NOT_FOUND,
            Error::SeedError(_)
            | Error::ConfigError(_)
            | Error::InvalidConfig(_)
            | Error::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn reply_with(message: String, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&ErrorMessage { message }), status)
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(error) = r.find::<Error>() {
        let status = error.status();
        if status.is_server_error() {
            event!(Level::ERROR, "{}", error);
        } else {
            event!(Level::WARN, "{}", error);
        }
        Ok(reply_with(error.to_string(), status))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::ERROR, "CORS forbidden error: {}", error);
        Ok(reply_with(error.to_string(), StatusCode::FORBIDDEN))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::WARN, "Cannot deserialize request body: {}", error);
        Ok(reply_with(error.to_string(), StatusCode::BAD_REQUEST))
    } else if let Some(error) = r.find::<UnsupportedMediaType>() {
        event!(Level::WARN, "Unsupported request body: {}", error);
        Ok(reply_with(error.to_string(), StatusCode::BAD_REQUEST))
    } else if let Some(error) = r.find::<InvalidQuery>() {
        event!(Level::WARN, "Cannot parse query string: {}", error);
        Ok(reply_with(error.to_string(), StatusCode::BAD_REQUEST))
    } else if let Some(error) = r.find::<MethodNotAllowed>() {
        event!(Level::WARN, "{}", error);
        Ok(reply_with(error.to_string(), StatusCode::METHOD_NOT_ALLOWED))
    } else {
        event!(Level::WARN, "Requested route was not found");
        Ok(reply_with(
            "Route not found".to_string(),
            StatusCode::NOT_FOUND,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let parse = "x".parse::<i32>().unwrap_err();
        assert_eq!(Error::ParseError(parse).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::MissingParameter("query").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::StateNotFound("ZZ".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::UserNotFound("a@b.co".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Unexpected("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unexpected_errors_pass_their_message_through() {
        let err = Error::Unexpected("store unavailable".to_string());
        assert_eq!(err.to_string(), "store unavailable");
    }
}
