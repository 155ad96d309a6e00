//! Helpers for pulling client details out of a request.

use actix_web::HttpRequest;

/// Proxy headers checked for the real client address, in order of preference
const CLIENT_IP_HEADERS: &[&str] = &[
    "X-Forwarded-For",
    "X-Nf-Client-Connection-Ip",
    "X-Real-IP",
    "CF-Connecting-IP",
];

/// Extract client IP address, falling back to the peer address
pub fn extract_client_ip(req: &HttpRequest) -> String {
    for header_name in CLIENT_IP_HEADERS {
        if let Some(header_str) = req.headers().get(*header_name).and_then(|h| h.to_str().ok()) {
            // X-Forwarded-For can carry a chain; the first entry is the client
            let ip = header_str.split(',').next().unwrap_or(header_str).trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
