//! Identifier parsing
//!
//! Resource identifiers are ARN-shaped:
//! `arn:partition:service:region:account:resource`. Colon segment 3 is the
//! region; the slash segments of the whole string locate sub-resources, e.g.
//! `arn:aws:elasticloadbalancing:eu-west-1:123:loadbalancer/app/web/50dc6c49`
//! has slash segments `[.., "app", "web", "50dc6c49"]`.
//!
//! Parsing fails closed: an identifier without the six colon segments, or a
//! lookup of a slash segment that is not there, is a
//! [`Error::MalformedIdentifier`].

use crate::error::{Error, Result};

const MIN_SEGMENTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arn<'a> {
    raw: &'a str,
    region: &'a str,
    resource: &'a str,
}

impl<'a> Arn<'a> {
    pub fn parse(raw: &'a str) -> Result<Self> {
        let parts: Vec<&str> = raw.splitn(MIN_SEGMENTS, ':').collect();
        if parts.len() < MIN_SEGMENTS {
            return Err(Error::malformed(
                raw,
                format!("expected {} colon-delimited segments, found {}", MIN_SEGMENTS, parts.len()),
            ));
        }
        if parts[0] != "arn" {
            return Err(Error::malformed(raw, "identifier must start with 'arn'"));
        }

        Ok(Self {
            raw,
            region: parts[3],
            resource: parts[5],
        })
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Region segment, possibly empty (global services)
    pub fn region(&self) -> &'a str {
        self.region
    }

    /// Region segment, failing when it is empty
    pub fn require_region(&self) -> Result<&'a str> {
        if self.region.is_empty() {
            return Err(Error::malformed(self.raw, "missing region segment"));
        }
        Ok(self.region)
    }

    /// Everything after the account segment
    pub fn resource(&self) -> &'a str {
        self.resource
    }

    /// Last colon-delimited segment
    pub fn last_segment(&self) -> Result<&'a str> {
        non_empty(self.raw, self.raw.rsplit(':').next(), "empty trailing segment")
    }

    /// Slash-delimited segment of the whole identifier at `index`
    pub fn path_segment(&self, index: usize) -> Result<&'a str> {
        non_empty(
            self.raw,
            self.raw.split('/').nth(index),
            &format!("missing slash-delimited segment {}", index),
        )
    }

    /// Last slash-delimited segment
    pub fn last_path_segment(&self) -> Result<&'a str> {
        if !self.raw.contains('/') {
            return Err(Error::malformed(self.raw, "no slash-delimited resource id"));
        }
        non_empty(self.raw, self.raw.rsplit('/').next(), "empty resource id")
    }
}

fn non_empty<'a>(raw: &str, segment: Option<&'a str>, reason: &str) -> Result<&'a str> {
    match segment {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(Error::malformed(raw, reason)),
    }
}
