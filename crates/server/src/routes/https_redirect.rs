use axum::{
    extract::Request,
    http::{
        header::{HOST, LOCATION},
        HeaderMap, HeaderName, StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// The https url to send the client to if the proxy in front of us received
/// the request over plain http
pub fn https_location(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let proto = headers.get(X_FORWARDED_PROTO)?.to_str().ok()?;
    if !proto.eq_ignore_ascii_case("http") {
        return None;
    }

    let host = headers.get(HOST)?.to_str().ok()?;
    let path = uri.path_and_query().map_or("/", |p| p.as_str());

    Some(format!("https://{host}{path}"))
}

/// Service workers only register on secure origins
pub async fn redirect_to_https(request: Request, next: Next) -> Response {
    match https_location(request.headers(), request.uri()) {
        Some(location) => {
            debug!("Redirecting to {location}");
            (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response()
        }
        None => next.run(request).await,
    }
}
