use url::Url;

pub const GITHUB: &str = "https://github.com";
pub const TWITTER: &str = "https://twitter.com";
pub const LINKEDIN: &str = "https://www.linkedin.com/in";

/// Turns a bare profile handle into a full link on `site`. Anything containing a `/` is
/// assumed to already be a link and is returned as-is.
pub fn ensure_social_link(site: &str, value: &str) -> String {
    if value.is_empty() || value.contains('/') {
        value.to_string()
    } else {
        format!("{site}/{value}")
    }
}

/// Absolute http(s) URL whose host carries a top-level domain.
pub fn is_web_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value.trim()) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some((name, tld)) = url.host_str().and_then(|host| host.rsplit_once('.')) else {
        return false;
    };
    !name.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
