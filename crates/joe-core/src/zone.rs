//! DNS zone file generation and inspection

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use crate::error::{Error, Result};

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]$")
        .expect("domain regex is valid")
});

static ZONE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i);\s*Zone file for\s+([a-z0-9.-]+)").expect("zone comment regex is valid")
});

static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\$ORIGIN\s+([a-z0-9.-]+)\.").expect("origin regex is valid")
});

/// Validate a domain name
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

/// Extract the domain a zone file describes.
///
/// Prefers the leading `; Zone file for <domain>` comment, falls back to a
/// `$ORIGIN` directive, and gives up otherwise.
pub fn extract_domain(zone_text: &str) -> Option<String> {
    if let Some(captures) = ZONE_COMMENT_RE.captures(zone_text) {
        return Some(captures[1].to_string());
    }

    ORIGIN_RE
        .captures(zone_text)
        .map(|captures| captures[1].to_string())
}

/// Everything needed to render a basic zone file
#[derive(Debug, Clone)]
pub struct ZoneSpec {
    /// Apex domain the zone describes
    pub domain: String,

    /// Authoritative nameservers; the first one goes into the SOA record
    pub nameservers: Vec<String>,

    /// Administrative contact email
    pub admin_email: String,

    /// Default TTL in seconds
    pub ttl: u32,
}

impl ZoneSpec {
    /// Create a spec for `domain`, validating it first.
    ///
    /// Without explicit nameservers, `ns1.<domain>` and `ns2.<domain>` are
    /// assumed.
    pub fn new(domain: impl Into<String>) -> Result<Self> {
        let domain = domain.into();
        if !is_valid_domain(&domain) {
            return Err(Error::invalid_domain(domain));
        }

        let nameservers = vec![format!("ns1.{domain}"), format!("ns2.{domain}")];

        Ok(Self {
            domain,
            nameservers,
            admin_email: "admin@example.com".to_string(),
            ttl: 3600,
        })
    }

    /// Replace the default nameservers; an empty list keeps the defaults
    pub fn with_nameservers(mut self, nameservers: Vec<String>) -> Self {
        if !nameservers.is_empty() {
            self.nameservers = nameservers;
        }
        self
    }

    /// Set the administrative contact email
    pub fn with_admin_email(mut self, email: impl Into<String>) -> Self {
        self.admin_email = email.into();
        self
    }

    /// Set the default TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Whether the default nameservers are still in effect
    pub fn uses_default_nameservers(&self) -> bool {
        self.nameservers == [format!("ns1.{}", self.domain), format!("ns2.{}", self.domain)]
    }

    /// Render the zone file text.
    ///
    /// The serial is today's date plus a fixed `01` revision.
    pub fn render(&self) -> String {
        // Zone file email form replaces '@' with '.'
        let zone_email = self.admin_email.replace('@', ".");
        let serial = format!("{}01", Utc::now().format("%Y%m%d"));

        let mut out = String::new();
        let _ = writeln!(out, "; Zone file for {}", self.domain);
        let _ = writeln!(out, "$TTL {}", self.ttl);
        let _ = writeln!(
            out,
            "@       IN      SOA     {}. {}. (",
            self.nameservers[0], zone_email
        );
        let _ = writeln!(out, "                        {serial} ; Serial");
        let _ = writeln!(out, "                        3600       ; Refresh");
        let _ = writeln!(out, "                        1800       ; Retry");
        let _ = writeln!(out, "                        604800     ; Expire");
        let _ = writeln!(out, "                        86400 )    ; Minimum TTL");
        out.push('\n');

        for ns in &self.nameservers {
            let _ = writeln!(out, "@       IN      NS      {ns}.");
        }
        out.push('\n');

        let _ = writeln!(out, "@       IN      A       127.0.0.1 ; Replace with actual IP");
        let _ = writeln!(out, "www     IN      CNAME   @");
        let _ = writeln!(out, "@       IN      MX      10 mail.{}.", self.domain);
        let _ = writeln!(
            out,
            "mail    IN      A       127.0.0.1 ; Replace with actual mail server IP"
        );

        out
    }
}
