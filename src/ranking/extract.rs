//! Extraction of the JSON object embedded in the ranking stream
//!
//! The ranking endpoint answers a server-action call with a line-oriented
//! stream where each line is `<id>:<json>`:
//!
//! ```text
//! 0:["$@1",["development",null]]
//! 1:{"data":[...],"total":123}
//! ```
//!
//! Only the object after the payload marker is of interest. Format drift
//! upstream should only ever need changes in this file.

use regex::Regex;

/// Compiled patterns for one payload marker
///
/// Built once per client; `extract` is called for every response body.
#[derive(Debug, Clone)]
pub struct PayloadExtractor {
    marker: String,
    anchored: Regex,
    anywhere: Regex,
}

impl PayloadExtractor {
    pub fn new(marker: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(marker);
        Ok(Self {
            marker: marker.to_string(),
            anchored: Regex::new(&format!(r"(?m)^{}:(\{{.*\}})", escaped))?,
            anywhere: Regex::new(&format!(r"{}:(\{{.*\}})", escaped))?,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Return the `{...}` text that follows `<marker>:`
    ///
    /// A line starting with the marker is preferred; the capture runs from the
    /// first `{` after the marker to the last `}` on that same line, so trailing
    /// bytes and later lines are ignored. If no line starts with the marker, the
    /// first occurrence anywhere in the body is used instead.
    pub fn extract<'a>(&self, body: &'a str) -> Option<&'a str> {
        self.anchored
            .captures(body)
            .or_else(|| self.anywhere.captures(body))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_embedded_object<'a>(body: &'a str, marker: &str) -> Option<&'a str> {
        PayloadExtractor::new(marker).unwrap().extract(body)
    }

    #[test]
    fn test_extracts_object_between_marker_lines() {
        let body = "0:[\"meta\"]\n1:{\"data\":[{\"token_name\":\"X\",\"progress_buy\":90}]}\n2:...";
        assert_eq!(
            extract_embedded_object(body, "1"),
            Some("{\"data\":[{\"token_name\":\"X\",\"progress_buy\":90}]}")
        );
    }

    #[test]
    fn test_ignores_later_object_lines() {
        let body = "0:[\"$@1\"]\n1:{\"data\":[]}\n2:{\"other\":true}\n3:{\"more\":1}\n";
        assert_eq!(extract_embedded_object(body, "1"), Some("{\"data\":[]}"));
    }

    #[test]
    fn test_trailing_content_on_marker_line() {
        let body = "1:{\"data\":[{\"token_name\":\"X\"}]}   trailing junk\n";
        assert_eq!(
            extract_embedded_object(body, "1"),
            Some("{\"data\":[{\"token_name\":\"X\"}]}")
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let body = "0:[]\r\n1:{\"data\":[]}\r\n2:[]\r\n";
        assert_eq!(extract_embedded_object(body, "1"), Some("{\"data\":[]}"));
    }

    #[test]
    fn test_single_line_body_spans_to_end() {
        let body = "1:{\"data\":[],\"total\":0}";
        assert_eq!(
            extract_embedded_object(body, "1"),
            Some("{\"data\":[],\"total\":0}")
        );
    }

    #[test]
    fn test_prefers_line_start_over_embedded_marker() {
        let body = "0:\"see 1:{fake}\"\n11:{\"wrong\":true}\n1:{\"data\":[]}\n";
        assert_eq!(extract_embedded_object(body, "1"), Some("{\"data\":[]}"));
    }

    #[test]
    fn test_falls_back_to_unanchored_marker() {
        let body = "garbage 1:{\"data\":[]}";
        assert_eq!(extract_embedded_object(body, "1"), Some("{\"data\":[]}"));
    }

    #[test]
    fn test_missing_marker() {
        assert_eq!(extract_embedded_object("0:[\"meta\"]\n2:[]", "1"), None);
        assert_eq!(extract_embedded_object("", "1"), None);
        assert_eq!(extract_embedded_object("1:[\"array, not object\"]", "1"), None);
    }

    #[test]
    fn test_custom_marker_is_escaped() {
        let body = "a:[]\n$b:{\"data\":[]}\n";
        assert_eq!(extract_embedded_object(body, "$b"), Some("{\"data\":[]}"));
    }

    #[test]
    fn test_extractor_reused_across_bodies() {
        let extractor = PayloadExtractor::new("1").unwrap();
        assert_eq!(extractor.marker(), "1");
        assert_eq!(extractor.extract("1:{\"a\":1}\n"), Some("{\"a\":1}"));
        assert_eq!(extractor.extract("0:[]\n1:{\"b\":2}\n"), Some("{\"b\":2}"));
        assert_eq!(extractor.extract("0:[]\n"), None);
    }
}
