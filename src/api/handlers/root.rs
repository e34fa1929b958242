use axum::response::IntoResponse;

// Undocumented banner route; the OpenAPI spec only covers the real API.
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
