use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the correlation id on requests and responses.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Length of generated ids, in hex characters.
pub const REQUEST_ID_LEN: usize = 8;

/// Generates short opaque correlation ids: the first eight hex digits of a
/// random UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeShortRequestId;

impl MakeRequestId for MakeShortRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let uuid = Uuid::new_v4().simple().to_string();
        HeaderValue::from_str(&uuid[..REQUEST_ID_LEN])
            .ok()
            .map(RequestId::new)
    }
}

/// The correlation id of a request, if one was assigned.
pub fn request_id_of<B>(request: &Request<B>) -> Option<String> {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_short_hex() {
        let request = Request::new(());
        let id = MakeShortRequestId.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert_eq!(value.len(), REQUEST_ID_LEN);
        assert!(value.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_differ_between_requests() {
        let request = Request::new(());
        let mut make = MakeShortRequestId;
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }

    #[test]
    fn request_id_is_read_from_extensions() {
        let mut request = Request::new(());
        assert_eq!(request_id_of(&request), None);
        request
            .extensions_mut()
            .insert(RequestId::new(HeaderValue::from_static("abcd1234")));
        assert_eq!(request_id_of(&request).as_deref(), Some("abcd1234"));
    }
}
