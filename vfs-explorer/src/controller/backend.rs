//! ``src/controller/backend.rs``
//!
//! Seam between the navigation controller and whatever serves listings.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::ListingError;
use crate::model::listing::{Listing, application_error};

/// Source of directory listings.
///
/// `root == None` asks the backend for its own default directory.
#[async_trait]
pub trait ListingBackend: Send + Sync + Debug {
    async fn fetch(&self, root: Option<&str>) -> Result<Listing, ListingError>;
}

/// Maps a complete HTTP response onto a listing result.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Listing, ListingError> {
    if (200..300).contains(&status) {
        Listing::from_json(body)
    } else {
        Err(application_error(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_2xx_is_success() {
        let body = br#"{"path": "/", "files": []}"#;
        assert!(interpret_response(200, body).is_ok());
        assert!(interpret_response(203, body).is_ok());
    }

    #[test]
    fn non_2xx_is_application_error() {
        let err = interpret_response(403, br#"{"message": "access denied"}"#).unwrap_err();
        assert_eq!(err.user_message(), "access denied");

        let err = interpret_response(304, b"").unwrap_err();
        assert!(matches!(err, ListingError::Application { status: 304, .. }));
    }

    #[test]
    fn success_with_bad_payload_is_malformed() {
        let err = interpret_response(200, br#"{"message": "ok"}"#).unwrap_err();
        assert!(matches!(err, ListingError::Malformed(_)));
    }
}
