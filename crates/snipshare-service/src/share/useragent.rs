//! Coarse user-agent classification for access log rows.
//!
//! Only the device class and browser family are derived; anything beyond
//! that would need a full UA parser, which the access log does not need.

/// Derive a device class ("mobile", "tablet", "desktop", "bot") from a
/// raw User-Agent header.
pub fn device_type(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();
    if ua.contains("bot") || ua.contains("crawler") || ua.contains("spider") {
        "bot"
    } else if ua.contains("ipad") || ua.contains("tablet") {
        "tablet"
    } else if ua.contains("mobile") || ua.contains("android") || ua.contains("iphone") {
        "mobile"
    } else {
        "desktop"
    }
}

/// Derive a browser family from a raw User-Agent header.
///
/// Order matters: Edge and Chrome both advertise "Safari", and Edge also
/// advertises "Chrome".
pub fn browser(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();
    if ua.contains("edg/") || ua.contains("edge") {
        "edge"
    } else if ua.contains("firefox") {
        "firefox"
    } else if ua.contains("chrome") || ua.contains("chromium") {
        "chrome"
    } else if ua.contains("safari") {
        "safari"
    } else if ua.contains("curl") {
        "curl"
    } else {
        "other"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
         AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_device_classification() {
        assert_eq!(device_type(CHROME_DESKTOP), "desktop");
        assert_eq!(device_type(SAFARI_IPHONE), "mobile");
        assert_eq!(device_type("Googlebot/2.1"), "bot");
    }

    #[test]
    fn test_browser_classification() {
        assert_eq!(browser(CHROME_DESKTOP), "chrome");
        assert_eq!(browser(SAFARI_IPHONE), "safari");
        assert_eq!(browser("curl/8.5.0"), "curl");
        assert_eq!(
            browser("Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0"),
            "firefox"
        );
    }
}
