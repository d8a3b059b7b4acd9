pub(crate) mod http;

/// Strip trailing slashes so `{base_url}/v1/...` never doubles up.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.anthropic.com/"),
            "https://api.anthropic.com"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8080//"),
            "http://127.0.0.1:8080"
        );
        assert_eq!(normalize_base_url("http://proxy"), "http://proxy");
    }
}
