//! Tests for GDAL band descriptions and nodata parsing

#[cfg(test)]
mod tests {
    use crate::support::gdal_descriptions;
    use sitescout::raster::metadata::{GdalMetadata, parse_nodata};

    // Tests zero-based samples map to one-based bands
    // Verified by using the sample index directly
    #[test]
    fn test_descriptions_by_band() {
        let metadata = GdalMetadata::parse(&gdal_descriptions(&["B2", "B3", "B4", "B8"]));

        assert_eq!(metadata.len(), 4);
        assert_eq!(metadata.description(1), Some("B2"));
        assert_eq!(metadata.description(4), Some("B8"));
        assert_eq!(metadata.description(0), None);
        assert_eq!(metadata.description(5), None);
    }

    // Tests non-description items and empty values are ignored
    // Verified by accepting every item with a sample attribute
    #[test]
    fn test_ignores_other_items() {
        let xml = r#"<GDALMetadata>
  <Item name="STATISTICS_MEAN" sample="0">812.5</Item>
  <Item name="DESCRIPTION" sample="1" role="description"> </Item>
  <Item name="AREA_OR_POINT">Area</Item>
  <Item name="DESCRIPTION" sample="2" role="description">Near &amp; far &lt;NIR&gt;</Item>
</GDALMetadata>"#;
        let metadata = GdalMetadata::parse(xml);

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.description(3), Some("Near & far <NIR>"));
    }

    // Tests malformed XML yields no descriptions
    // Verified by panicking on unmatched tags
    #[test]
    fn test_malformed() {
        assert!(GdalMetadata::parse("<GDALMetadata><Item sample=").is_empty());
        assert!(GdalMetadata::parse("").is_empty());
    }

    // Tests nodata text forms
    // Verified by rejecting NUL-terminated values
    #[test]
    fn test_parse_nodata() {
        assert_eq!(parse_nodata("0"), Some(0.0));
        assert_eq!(parse_nodata(" -9999\0"), Some(-9999.0));
        assert!(parse_nodata("nan").is_some_and(f64::is_nan));
        assert!(parse_nodata("NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_nodata("none"), None);
    }
}
