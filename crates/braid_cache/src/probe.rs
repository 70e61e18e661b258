//! Remote last-modified probing over HTTP.
//!
//! Determines how recently a remote source changed by reading response
//! headers. Redirects are followed manually under an explicit hop budget;
//! the HTTP client's own redirect handling is disabled so every hop is
//! accounted for. All failures collapse to `None`, which freshness checks
//! treat as "unknown, rebuild".

use std::time::Duration;

use ureq::Agent;

/// Last-modified lookup for remote sources.
///
/// Injected into the build cache so tests can substitute a canned probe.
pub trait RemoteFreshness {
    /// Returns the last-modified time of a remote resource in Unix seconds.
    ///
    /// `None` means the probe failed to reach the resource. `Some(0)` means
    /// the probe succeeded but no modification time was reported, which is
    /// deliberately distinct: an unreachable source forces a rebuild while
    /// an undated one never does.
    fn last_modified(&self, url: &str) -> Option<u64>;
}

/// HTTP-backed probe with a request timeout and a redirect hop budget.
pub struct RemoteProbe {
    agent: Agent,
    max_hops: u32,
}

impl RemoteProbe {
    /// Creates a probe with the given per-request timeout and maximum
    /// number of redirect hops.
    pub fn new(timeout: Duration, max_hops: u32) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .into();
        Self { agent, max_hops }
    }

    fn probe(&self, url: &str, hops_left: u32) -> Option<u64> {
        let response = self.agent.get(url).call().ok()?;
        if let Some(location) = header_value(&response, "location") {
            if hops_left == 0 {
                return None;
            }
            let next = resolve_location(url, &location);
            // close the current stream before chasing the redirect
            drop(response);
            return self.probe(&next, hops_left - 1);
        }
        match header_value(&response, "last-modified") {
            Some(date) => Some(parse_http_date(&date)),
            None => Some(0),
        }
    }
}

impl RemoteFreshness for RemoteProbe {
    fn last_modified(&self, url: &str) -> Option<u64> {
        self.probe(url, self.max_hops)
    }
}

/// Extracts a header as an owned string. Header name lookup is
/// case-insensitive.
fn header_value(response: &ureq::http::Response<ureq::Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Parses an HTTP date header into Unix seconds.
///
/// An unparseable or pre-epoch date yields 0, the "no usable time" value.
fn parse_http_date(value: &str) -> u64 {
    match chrono::DateTime::parse_from_rfc2822(value) {
        Ok(date) => date.timestamp().max(0) as u64,
        Err(_) => 0,
    }
}

/// Resolves a `location` header value against the URL that produced it.
///
/// Handles absolute, protocol-relative, root-relative, and relative forms.
fn resolve_location(base: &str, location: &str) -> String {
    if location.contains("://") {
        return location.to_string();
    }
    if let Some(rest) = location.strip_prefix("//") {
        let scheme = base.split("://").next().unwrap_or("http");
        return format!("{scheme}://{rest}");
    }
    let origin = origin(base);
    if location.starts_with('/') {
        return format!("{origin}{location}");
    }
    let path = &base[origin.len()..];
    match path.rsplit_once('/') {
        Some((dir, _)) => format!("{origin}{dir}/{location}"),
        None => format!("{origin}/{location}"),
    }
}

/// Returns `scheme://host[:port]` for a URL.
fn origin(url: &str) -> String {
    match url.find("://") {
        Some(scheme_end) => {
            let after = &url[scheme_end + 3..];
            match after.find('/') {
                Some(path_start) => url[..scheme_end + 3 + path_start].to_string(),
                None => url.to_string(),
            }
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serves one canned HTTP response on a loopback port and returns the
    /// URL to request it from.
    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn probe() -> RemoteProbe {
        RemoteProbe::new(Duration::from_secs(5), 5)
    }

    #[test]
    fn reads_last_modified_header() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nLast-Modified: Mon, 01 Jan 2024 00:00:00 GMT\r\nContent-Length: 0\r\n\r\n"
                .to_string(),
        );
        assert_eq!(probe().last_modified(&url), Some(1704067200));
    }

    #[test]
    fn missing_header_is_epoch() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n".to_string());
        assert_eq!(probe().last_modified(&url), Some(0));
    }

    #[test]
    fn unparseable_date_is_epoch() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nLast-Modified: yesterday-ish\r\nContent-Length: 0\r\n\r\n"
                .to_string(),
        );
        assert_eq!(probe().last_modified(&url), Some(0));
    }

    #[test]
    fn failed_connect_is_none() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        assert_eq!(probe().last_modified(&url), None);
    }

    #[test]
    fn error_status_is_none() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_string());
        assert_eq!(probe().last_modified(&url), None);
    }

    #[test]
    fn follows_redirect_to_target() {
        let target = serve_once(
            "HTTP/1.1 200 OK\r\nLast-Modified: Mon, 01 Jan 2024 00:00:00 GMT\r\nContent-Length: 0\r\n\r\n"
                .to_string(),
        );
        let hop = serve_once(format!(
            "HTTP/1.1 302 Found\r\nLocation: {target}\r\nContent-Length: 0\r\n\r\n"
        ));
        assert_eq!(probe().last_modified(&hop), Some(1704067200));
    }

    #[test]
    fn exhausted_hop_budget_is_none() {
        let target = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n".to_string());
        let hop = serve_once(format!(
            "HTTP/1.1 302 Found\r\nLocation: {target}\r\nContent-Length: 0\r\n\r\n"
        ));
        let bounded = RemoteProbe::new(Duration::from_secs(5), 0);
        assert_eq!(bounded.last_modified(&hop), None);
    }

    #[test]
    fn parses_rfc2822_dates() {
        assert_eq!(parse_http_date("Mon, 01 Jan 2024 00:00:00 GMT"), 1704067200);
        assert_eq!(parse_http_date("Thu, 01 Jan 1970 00:00:00 GMT"), 0);
        assert_eq!(parse_http_date("not a date"), 0);
    }

    #[test]
    fn resolves_location_forms() {
        assert_eq!(
            resolve_location("http://a.example/x/y.css", "http://b.example/z.css"),
            "http://b.example/z.css"
        );
        assert_eq!(
            resolve_location("http://a.example/x/y.css", "/z.css"),
            "http://a.example/z.css"
        );
        assert_eq!(
            resolve_location("http://a.example/x/y.css", "z.css"),
            "http://a.example/x/z.css"
        );
        assert_eq!(
            resolve_location("https://a.example/x", "//cdn.example/z.css"),
            "https://cdn.example/z.css"
        );
        assert_eq!(
            resolve_location("http://a.example:8080", "next.css"),
            "http://a.example:8080/next.css"
        );
    }
}
