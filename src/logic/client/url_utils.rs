/// Build the full URL for a backend endpoint.
///
/// An explicit base URL takes precedence and must include its protocol.
/// Otherwise the URL is built from host and port; a host that already carries
/// a protocol is used as-is, a bare host defaults to http.
pub fn endpoint_url(base_url: Option<&str>, host: &str, port: u16, path: &str) -> String {
    if let Some(base) = base_url {
        return format!("{}{}", base.trim_end_matches('/'), path);
    }
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}{}", host.trim_end_matches('/'), path)
    } else {
        format!("http://{}:{}{}", host, port, path)
    }
}
