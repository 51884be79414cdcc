//! Size measurement and display.

use flate2::{Compression, write::GzEncoder};
use std::io::{self, Write};

/// Metric units, each 1000 times the previous one.
const UNITS: &[&str] = &["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Byte length of `bytes` once gzipped at the highest compression level,
/// header and trailer included.
pub fn gzip_size(bytes: &[u8]) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;
    Ok(compressed.len() as u64)
}

/// Format bytes as a human-readable metric size.
///
/// Values under 1000 are printed as whole bytes; larger values use one
/// decimal place in the largest unit that keeps the value under 1000.
///
/// # Examples
///
/// ```
/// use depsize_core::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1500), "1.5 kB");
/// assert_eq!(format_size(2_000_000), "2.0 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut unit = 0;
    let mut scale = 1u128;
    while unit + 1 < UNITS.len() && u128::from(bytes) >= scale * 1000 {
        scale *= 1000;
        unit += 1;
    }

    if unit == 0 {
        return format!("{} {}", bytes, UNITS[0]);
    }
    format!("{} {}", one_decimal(bytes as f64 / scale as f64), UNITS[unit])
}

/// `value` with one decimal place. Exact ties round up rather than to even.
fn one_decimal(value: f64) -> String {
    // The only values exactly halfway between tenths are odd multiples of 0.25.
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (value * 10.0).ceil() as u64;
        format!("{}.{}", tenths / 10, tenths % 10)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(999), "999 B");
    }

    #[test]
    fn test_format_size_metric_units() {
        assert_eq!(format_size(1000), "1.0 kB");
        assert_eq!(format_size(1500), "1.5 kB");
        assert_eq!(format_size(1024), "1.0 kB");
        assert_eq!(format_size(999_999), "1000.0 kB");
        assert_eq!(format_size(1_000_000), "1.0 MB");
        assert_eq!(format_size(2_500_000_000), "2.5 GB");
    }

    #[test]
    fn test_format_size_exact_ties_round_up() {
        assert_eq!(format_size(1250), "1.3 kB");
        assert_eq!(format_size(2250), "2.3 kB");
        assert_eq!(format_size(1750), "1.8 kB");
        assert_eq!(format_size(999_750), "999.8 kB");
        assert_eq!(format_size(3_250_000), "3.3 MB");
    }

    #[test]
    fn test_format_size_near_ties_follow_binary_value() {
        // 1.15 is stored just below the halfway point, 1.05 and 1.35 just above
        assert_eq!(format_size(1150), "1.1 kB");
        assert_eq!(format_size(1050), "1.1 kB");
        assert_eq!(format_size(1350), "1.4 kB");
    }

    #[test]
    fn test_format_size_largest_value() {
        assert_eq!(format_size(u64::MAX), "18.4 EB");
    }

    #[test]
    fn test_gzip_size_matches_encoded_stream() {
        let input = "export default function add(a, b) { return a + b; }\n".repeat(50);
        let size = gzip_size(input.as_bytes()).unwrap();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(input.as_bytes()).unwrap();
        let encoded = encoder.finish().unwrap();
        assert_eq!(size, encoded.len() as u64);

        let mut decoded = String::new();
        GzDecoder::new(encoded.as_slice()).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_gzip_size_compresses_repetitive_input() {
        let input = "a".repeat(10_000);
        let size = gzip_size(input.as_bytes()).unwrap();
        assert!(size < 100, "expected strong compression, got {} bytes", size);
    }
}
