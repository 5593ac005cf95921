use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

pub fn render_template<T: askama::Template>(t: T) -> Response {
    render_with_status(StatusCode::OK, t)
}

pub fn render_with_status<T: askama::Template>(status: StatusCode, t: T) -> Response {
    match t.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
