//! GDAL private TIFF tags
//!
//! GDAL stores per-band descriptions as an XML blob in tag 42112:
//!
//! ```xml
//! <GDALMetadata>
//!   <Item name="DESCRIPTION" sample="3" role="description">B8</Item>
//! </GDALMetadata>
//! ```
//!
//! `sample` is zero-based. The nodata value lives in tag 42113 as ASCII text.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `GDAL_METADATA` tag number
pub const GDAL_METADATA_TAG: u16 = 42112;
/// `GDAL_NODATA` tag number
pub const GDAL_NODATA_TAG: u16 = 42113;

static ITEM_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)<Item\b([^>]*)>(.*?)</Item>").ok());

static ATTRIBUTE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(\w+)\s*=\s*"([^"]*)""#).ok());

/// Band descriptions recovered from a `GDAL_METADATA` blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GdalMetadata {
    descriptions: BTreeMap<usize, String>,
}

impl GdalMetadata {
    /// Parse the XML blob; unknown or malformed items are skipped
    pub fn parse(xml: &str) -> Self {
        let (Some(item_re), Some(attribute_re)) = (ITEM_RE.as_ref(), ATTRIBUTE_RE.as_ref()) else {
            return Self::default();
        };

        let mut descriptions = BTreeMap::new();
        for item in item_re.captures_iter(xml) {
            let attributes = item.get(1).map_or("", |m| m.as_str());
            let value = item.get(2).map_or("", |m| m.as_str());

            let mut sample = None;
            let mut is_description = false;
            for attribute in attribute_re.captures_iter(attributes) {
                let key = attribute.get(1).map_or("", |m| m.as_str());
                let attr_value = attribute.get(2).map_or("", |m| m.as_str());
                match key {
                    "sample" => sample = attr_value.parse::<usize>().ok(),
                    "role" if attr_value.eq_ignore_ascii_case("description") => {
                        is_description = true;
                    }
                    "name" if attr_value.eq_ignore_ascii_case("DESCRIPTION") => {
                        is_description = true;
                    }
                    _ => {}
                }
            }

            let text = unescape(value.trim());
            match sample {
                Some(sample) if is_description && !text.is_empty() => {
                    descriptions.insert(sample, text);
                }
                _ => {}
            }
        }

        Self { descriptions }
    }

    /// Description of the 1-based `band`, if one was recorded
    pub fn description(&self, band: usize) -> Option<&str> {
        band.checked_sub(1)
            .and_then(|sample| self.descriptions.get(&sample))
            .map(String::as_str)
    }

    /// Number of bands that carry a description
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// True when no band carries a description
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

/// Parse a `GDAL_NODATA` value such as `"0"`, `"-9999"` or `"nan"`
pub fn parse_nodata(text: &str) -> Option<f64> {
    let trimmed = text.trim().trim_end_matches('\0').trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    trimmed.parse::<f64>().ok()
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
