//! Tests for spinner and download progress construction

#[cfg(test)]
mod tests {
    use sitescout::io::progress::ProgressFactory;

    // Tests suppressed output yields hidden indicators
    // Verified by always returning visible bars
    #[test]
    fn test_hidden_when_not_visible() {
        let factory = ProgressFactory::new(false);

        assert!(factory.spinner("waiting").is_hidden());
        assert!(factory.download("downloading", Some(1024)).is_hidden());
    }

    // Tests sized downloads track total length
    // Verified by ignoring the content length
    #[test]
    fn test_download_length() {
        let factory = ProgressFactory::default();

        let sized = factory.download("downloading", Some(2048));
        assert_eq!(sized.length(), Some(2048));
        sized.inc(1024);
        assert_eq!(sized.position(), 1024);
        sized.finish_and_clear();

        let unsized_bar = factory.download("downloading", None);
        unsized_bar.inc(10);
        assert_eq!(unsized_bar.position(), 10);
        unsized_bar.finish_and_clear();
    }
}
