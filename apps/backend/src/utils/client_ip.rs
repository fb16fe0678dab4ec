//! Client IP resolution for login auditing.

use actix_web::HttpRequest;

/// Best-effort client IP: first entry of `X-Forwarded-For`, then
/// `X-Real-IP`, then the peer address.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    if let Some(forwarded) = header_value(req, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }

    if let Some(real_ip) = header_value(req, "x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return Some(real_ip.to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}
