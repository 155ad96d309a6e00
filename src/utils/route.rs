//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Label used for requests that did not match a registered resource
pub const UNMATCHED_ROUTE: &str = "/unknown";

/// Matched resource pattern for metric labels.
///
/// Only available once routing has happened, so call it on the request
/// attached to the response. Unmatched paths collapse into one label to keep
/// metric cardinality bounded.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
