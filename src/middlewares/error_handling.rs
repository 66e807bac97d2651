use crate::error::{ApiError, Error, ErrorElement};
use async_trait::async_trait;
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which translates error responses returned from Stark Bank APIs
/// into [`Error::ApiError`](crate::error::Error)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an ApiError if the response is not a success
        if !response.status().is_success() {
            let status = response.status();
            tracing::debug!("Failed HTTP request. Status code: {}", status);

            let bytes = response.bytes().await?;
            return Err(Error::ApiError(api_error_from_body(status, &bytes)).into());
        }

        Ok(response)
    }
}

/// Body of an error response from Stark Bank APIs.
#[derive(serde::Deserialize, Debug)]
struct ErrorResponseBody {
    errors: Vec<ErrorElement>,
}

fn api_error_from_body(status: StatusCode, bytes: &[u8]) -> ApiError {
    let content = String::from_utf8_lossy(bytes).into_owned();

    if status.is_server_error() {
        return ApiError::InternalServerError {
            status: status.as_u16(),
            content,
        };
    }

    match serde_json::from_slice::<ErrorResponseBody>(bytes) {
        Ok(body) if status.is_client_error() && !body.errors.is_empty() => ApiError::InputErrors {
            status: status.as_u16(),
            errors: body.errors,
        },
        _ => ApiError::UnknownError {
            status: status.as_u16(),
            content,
        },
    }
}
