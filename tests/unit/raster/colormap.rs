//! Tests for the viridis lookup

#[cfg(test)]
mod tests {
    use sitescout::raster::colormap::viridis;

    // Tests the endpoints hit the first and last stops exactly
    // Verified by offsetting the segment index
    #[test]
    fn test_endpoints() {
        assert_eq!(viridis(0.0), [0x44, 0x01, 0x54, 255]);
        assert_eq!(viridis(1.0), [0xfd, 0xe7, 0x25, 255]);
    }

    // Tests out-of-range and NaN input is clamped
    // Verified by indexing without clamping
    #[test]
    fn test_clamping() {
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.5), viridis(1.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    // Tests interpolation between stops and monotone brightening in green
    // Verified by snapping to the nearest stop
    #[test]
    fn test_interpolation() {
        let midpoint = viridis(0.5 / 7.0);
        assert_eq!(midpoint, [0x45, 0x1a, 0x69, 255]);

        let greens: Vec<u8> = (0..=20).map(|i| viridis(f64::from(i) / 20.0)[1]).collect();
        assert!(greens.windows(2).all(|w| w[0] <= w[1]));
    }
}
