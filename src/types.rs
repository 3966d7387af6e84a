use crate::error::SerializationError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// Well-known envelope statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    InternalServerError,
}

impl ResponseStatus {
    pub fn code(&self) -> i32 {
        use ResponseStatus::*;
        match self {
            Success => 0,
            InternalServerError => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        use ResponseStatus::*;
        match self {
            Success => "ok",
            InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

/// The uniform result of every routed call.
///
/// On success this is whatever the remote server sent back. On any failure
/// inside the interceptor it is a fresh [`ResponseStatus::InternalServerError`]
/// envelope with no data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Response<T = ()> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ResponseStatus::Success.code(),
            message: ResponseStatus::Success.message().to_owned(),
            data: Some(data),
        }
    }

    pub fn from_status(status: ResponseStatus) -> Self {
        Self {
            code: status.code(),
            message: status.message().to_owned(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ResponseStatus::Success.code()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// A return type a routed method may declare.
///
/// The interceptor decodes the remote body into it, or builds one from a
/// status when the call fails.
pub trait Envelope: DeserializeOwned {
    fn from_status(status: ResponseStatus) -> Self;
}

impl<T: DeserializeOwned> Envelope for Response<T> {
    fn from_status(status: ResponseStatus) -> Self {
        Response::from_status(status)
    }
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    serde_json::to_string(value).map_err(SerializationError::Request)
}

pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Foo {
        x: i64,
    }

    #[test]
    fn decodes_envelope_with_payload() {
        let resp: Response<Foo> =
            decode(r#"{"code":0,"message":"ok","data":{"x":1}}"#).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.message, "ok");
        assert_eq!(resp.data, Some(Foo { x: 1 }));
    }

    #[test]
    fn missing_data_is_none() {
        let resp: Response = decode(r#"{"code":0,"message":"ok"}"#).unwrap();
        assert_eq!(resp, Response::from_status(ResponseStatus::Success));
    }

    #[test]
    fn generic_envelope_without_default_payload() {
        fn parse<R: Envelope>(json: &str) -> R {
            decode(json).unwrap()
        }
        let resp: Response<Foo> = parse(r#"{"code":3,"message":"later"}"#);
        assert_eq!(resp.code, 3);
        assert!(resp.data.is_none());
    }

    #[test]
    fn payload_type_mismatch_is_a_response_error() {
        let err = decode::<Response<Foo>>(r#"{"code":0,"data":{"x":"one"}}"#).unwrap_err();
        assert!(matches!(err, SerializationError::Response(_)));
    }

    #[test]
    fn internal_error_envelope() {
        let resp = <Response<Foo> as Envelope>::from_status(ResponseStatus::InternalServerError);
        assert_eq!(resp.code, 500);
        assert_eq!(resp.message, "Internal Server Error");
        assert!(resp.data.is_none());
        assert!(!resp.is_success());
    }

    #[test]
    fn encodes_bare_string_argument() {
        assert_eq!(encode("world").unwrap(), r#""world""#);
        let skipped = serde_json::to_string(&Response::<()>::from_status(ResponseStatus::Success));
        assert_eq!(skipped.unwrap(), r#"{"code":0,"message":"ok"}"#);
    }
}
