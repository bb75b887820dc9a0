//! Error body completion
//!
//! `AppError` renders its body without knowing the request; this layer fills in
//! the request path on every error response that carries an `ErrorBody`.

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorBody;

pub async fn error_path_layer(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    let Some(mut body) = response.extensions_mut().remove::<ErrorBody>() else {
        return response;
    };
    body.path = path;

    (response.status(), Json(body)).into_response()
}
