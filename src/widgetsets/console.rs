//! Console deep links for header widgets. Pure templating: nothing checks
//! that the link resolves.

use std::borrow::Cow;

/// Regional console URL: `https://<region>.console.aws.amazon.com/<service>/home?region=<region>#<fragment>`
pub fn console_url(region: &str, service: &str, fragment: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/{service}/home?region={region}#{fragment}",
        region = region,
        service = service,
        fragment = fragment
    )
}

/// Markdown link
pub fn link(label: &str, url: &str) -> String {
    format!("[{}]({})", label, url)
}

/// Percent-encode a path segment taken from a resource field
pub fn encode(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
