//! HTTP status → ZosFilesError mapping.

use reqwest::StatusCode;

use zosfiles_shared::ZosFilesError;

use super::types::ZosmfErrorBody;
use crate::request::RequestDescriptor;

/// Map a response whose status is outside the request's expected set.
///
/// A 404 on a USS request means the path is absent. Everything else is
/// surfaced as `UnexpectedStatus`, preferring the z/OSMF error message
/// over the raw body when the body parses as one.
pub(crate) fn map_http_status(
    status: StatusCode,
    request: &RequestDescriptor,
    text: &str,
) -> ZosFilesError {
    if status == StatusCode::NOT_FOUND
        && let Some(path) = &request.uss_path
    {
        return ZosFilesError::RemoteResourceNotFound(path.clone());
    }

    let message = match serde_json::from_str::<ZosmfErrorBody>(text) {
        Ok(body) => body.describe(),
        Err(_) => text.to_string(),
    };

    ZosFilesError::UnexpectedStatus {
        status: status.as_u16(),
        expected: request.expected.to_vec(),
        message,
    }
}

/// Map a failure of the HTTP stack itself.
pub(crate) fn map_transport(err: reqwest::Error) -> ZosFilesError {
    ZosFilesError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBuilder;

    fn builder() -> RequestBuilder {
        RequestBuilder::new("https://zosmf.example.com")
    }

    #[test]
    fn test_404_on_uss_maps_to_not_found() {
        let req = builder().get_file_content("/u/ibmuser/missing");
        let err = map_http_status(StatusCode::NOT_FOUND, &req, "");
        assert!(matches!(
            err,
            ZosFilesError::RemoteResourceNotFound(ref path) if path == "/u/ibmuser/missing"
        ));
    }

    #[test]
    fn test_404_on_dataset_is_unexpected_status() {
        let req = builder().get_dsn_content("IBMUSER.MISSING");
        let err = map_http_status(StatusCode::NOT_FOUND, &req, "not found");
        match err {
            ZosFilesError::UnexpectedStatus {
                status,
                expected,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(expected, vec![200]);
                assert_eq!(message, "not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zosmf_error_body_is_described() {
        let req = builder().delete_data_set("IBMUSER.DATA", None, None);
        let body = r#"{"rc":8,"reason":0,"category":4,"message":"Data set in use","details":["ISRZ002"]}"#;
        let err = map_http_status(StatusCode::INTERNAL_SERVER_ERROR, &req, body);
        match err {
            ZosFilesError::UnexpectedStatus {
                status,
                expected,
                message,
            } => {
                assert_eq!(status, 500);
                assert_eq!(expected, vec![200, 202, 204]);
                assert_eq!(
                    message,
                    "Data set in use (rc=8, reason=0, category=4); ISRZ002"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_outside_expected_even_if_success() {
        let req = builder().delete_uss("/u/ibmuser/a", false);
        let err = map_http_status(StatusCode::OK, &req, "");
        assert!(matches!(
            err,
            ZosFilesError::UnexpectedStatus { status: 200, .. }
        ));
    }
}
