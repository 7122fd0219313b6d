//! Structural Features - hostname, path and query shape

use once_cell::sync::Lazy;
use regex::Regex;

use super::extractor::{FeatureGroup, UrlContext};
use super::layout::idx;
use super::lexical::char_len;
use super::vector::FeatureVectorBuilder;

/// Dotted-quad anywhere in the hostname
static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").expect("valid IPv4 pattern")
});

/// URLs longer than this set `UrlLengthRT`
pub const LONG_URL_THRESHOLD: usize = 100;

#[derive(Debug, Default, Clone, Copy)]
pub struct StructureFeatures;

impl StructureFeatures {
    pub fn new() -> Self {
        Self
    }
}

/// Labels beyond the registrable two
pub fn subdomain_level(hostname: &str) -> usize {
    if hostname.is_empty() {
        return 0;
    }
    hostname.split('.').count().saturating_sub(2)
}

/// Non-empty `/`-separated segments
pub fn path_level(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// Distinct form-decoded keys that carry a non-empty value
pub fn query_components(query: &str) -> usize {
    let mut keys: Vec<String> = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, _)| key.into_owned())
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}

/// Registrable domain (last two labels) repeated inside the subdomain prefix
pub fn domain_in_subdomains(hostname: &str) -> bool {
    if hostname.is_empty() || !hostname.contains('.') {
        return false;
    }
    let labels: Vec<&str> = hostname.split('.').collect();
    let split_at = labels.len().saturating_sub(2);
    let registrable = labels[split_at..].join(".");
    let prefix = labels[..split_at].join(".");
    prefix.contains(&registrable)
}

/// Hostname without dots appearing in the path without slashes
pub fn domain_in_path(hostname: &str, path: &str) -> bool {
    if hostname.is_empty() {
        return false;
    }
    let needle = hostname.replace('.', "");
    path.replace('/', "").contains(&needle)
}

impl FeatureGroup for StructureFeatures {
    fn apply(&self, ctx: &UrlContext<'_>, builder: FeatureVectorBuilder) -> FeatureVectorBuilder {
        let host = ctx.hostname.as_str();
        let path = ctx.parts.path;
        let query = ctx.parts.query;

        let subdomains = subdomain_level(host);
        let url_length = char_len(ctx.raw);

        builder
            .count(idx::SUBDOMAIN_LEVEL, subdomains)
            .count(idx::PATH_LEVEL, path_level(path))
            .count(idx::NUM_QUERY_COMPONENTS, query_components(query))
            .flag(idx::NO_HTTPS, ctx.parts.scheme != "https")
            .flag(idx::IP_ADDRESS, IPV4_PATTERN.is_match(host))
            .flag(idx::DOMAIN_IN_SUBDOMAINS, domain_in_subdomains(host))
            .flag(idx::DOMAIN_IN_PATHS, domain_in_path(host, path))
            .flag(idx::HTTPS_IN_HOSTNAME, host.contains("https"))
            .count(idx::HOSTNAME_LENGTH, char_len(host))
            .count(idx::PATH_LENGTH, char_len(path))
            .count(idx::QUERY_LENGTH, char_len(query))
            .flag(idx::DOUBLE_SLASH_IN_PATH, path.contains("//"))
            .count(idx::SUBDOMAIN_LEVEL_RT, subdomains)
            .flag(idx::URL_LENGTH_RT, url_length > LONG_URL_THRESHOLD)
    }
}
