//! Canonical request construction for AWS Signature Version 4.
//!
//! Every function here is pure and synchronous, per the concurrency model:
//! canonicalization is CPU-only and never a suspension point.

use std::collections::{BTreeMap, HashSet};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters SigV4 canonical URI encoding leaves unescaped: unreserved
/// characters per RFC 3986 section 2.3, plus the AWS-specific additions.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn uri_encode(segment: &str) -> String {
    utf8_percent_encode(segment, URI_ENCODE_SET).to_string()
}

/// Percent-encode a URI path segment-by-segment, preserving `/` separators
/// and performing no normalization beyond what the caller sent.
#[must_use]
pub fn build_canonical_uri(path: &str) -> String {
    if path.is_empty() {
        return "/".to_owned();
    }
    path.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
}

/// Build the canonical query string: split on `&`/`=`, then sort the
/// resulting pairs lexicographically by name, then by value.
///
/// The caller is responsible for percent-encoding names and values before
/// they reach this function (they arrive already encoded exactly as the
/// client transmitted them); this function does not re-encode, so that
/// whatever encoding the client used for signing is reproduced exactly.
#[must_use]
pub fn build_canonical_query_string(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }
    let mut pairs: Vec<(&str, &str)> = query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut parts = segment.splitn(2, '=');
            let name = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default();
            (name, value)
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));
    pairs
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_was_space = false;
    for ch in value.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

/// Build the canonical headers block: for every header named in
/// `signed_headers`, lowercase the name, collapse internal whitespace in the
/// value, comma-join duplicate values, sort by name, and newline-terminate
/// each line.
#[must_use]
pub fn build_canonical_headers(headers: &[(&str, &str)], signed_headers: &[&str]) -> String {
    let wanted: HashSet<String> = signed_headers.iter().map(|h| h.to_lowercase()).collect();
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        let lower = name.to_lowercase();
        if wanted.contains(&lower) {
            grouped.entry(lower).or_default().push(collapse_whitespace(value));
        }
    }
    let mut out = String::new();
    for (name, values) in grouped {
        out.push_str(&name);
        out.push(':');
        out.push_str(&values.join(","));
        out.push('\n');
    }
    out
}

/// Build the `SignedHeaders` string: lowercased header names, sorted,
/// semicolon-joined.
#[must_use]
pub fn build_signed_headers_string(signed_headers: &[&str]) -> String {
    let mut lowered: Vec<String> = signed_headers.iter().map(|h| h.to_lowercase()).collect();
    lowered.sort();
    lowered.join(";")
}

/// Assemble the full canonical request per AWS Signature V4:
///
/// ```text
/// <Method>\n
/// <CanonicalURI>\n
/// <CanonicalQueryString>\n
/// <CanonicalHeaders>\n
/// <SignedHeaders>\n
/// <HashedPayload>
/// ```
#[must_use]
pub fn build_canonical_request(
    method: &str,
    uri: &str,
    query_string: &str,
    headers: &[(&str, &str)],
    signed_headers: &[&str],
    payload_hash: &str,
) -> String {
    format!(
        "{method}\n{}\n{}\n{}\n{}\n{payload_hash}",
        build_canonical_uri(uri),
        build_canonical_query_string(query_string),
        build_canonical_headers(headers, signed_headers),
        build_signed_headers_string(signed_headers),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    #[test]
    fn test_should_pass_through_root_path() {
        assert_eq!(build_canonical_uri(""), "/");
    }

    #[test]
    fn test_should_percent_encode_path_segments_but_not_slashes() {
        assert_eq!(build_canonical_uri("/a b/c"), "/a%20b/c");
    }

    #[test]
    fn test_should_sort_query_string_by_name_then_value() {
        let query = "b=2&a=2&a=1";
        assert_eq!(build_canonical_query_string(query), "a=1&a=2&b=2");
    }

    #[test]
    fn test_should_collapse_whitespace_and_lowercase_header_names() {
        let headers = [("Host", "example.com"), ("X-Amz-Date", "  20180101T000000Z  ")];
        let signed = ["host", "x-amz-date"];
        let canonical = build_canonical_headers(&headers, &signed);
        assert_eq!(canonical, "host:example.com\nx-amz-date:20180101T000000Z\n");
    }

    #[test]
    fn test_should_comma_join_duplicate_headers() {
        let headers = [("X-Amz-Meta", "a"), ("x-amz-meta", "b")];
        let canonical = build_canonical_headers(&headers, &["x-amz-meta"]);
        assert_eq!(canonical, "x-amz-meta:a,b\n");
    }

    #[test]
    fn test_should_build_signed_headers_string_sorted() {
        assert_eq!(
            build_signed_headers_string(&["X-Amz-Date", "host"]),
            "host;x-amz-date"
        );
    }

    /// Reproduces the canonical-request hash from AWS's published SigV4
    /// documentation example: `GET /test.txt` against `examplebucket`.
    #[test]
    fn test_should_match_aws_documented_canonical_request_hash() {
        let headers = [
            ("host", "examplebucket.s3.amazonaws.com"),
            ("range", "bytes=0-9"),
            (
                "x-amz-content-sha256",
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ),
            ("x-amz-date", "20130524T000000Z"),
        ];
        let signed = ["host", "range", "x-amz-content-sha256", "x-amz-date"];
        let canonical = build_canonical_request(
            "GET",
            "/test.txt",
            "",
            &headers,
            &signed,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        );

        let hash = hex::encode(Sha256::digest(canonical.as_bytes()));
        assert_eq!(
            hash,
            "7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972"
        );
    }
}
