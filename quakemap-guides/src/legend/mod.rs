pub mod swatch;

/// Formats a legend bound without a trailing `.0`
pub fn format_bound(value: f64) -> String {
    if value == 0.0 {
        // Avoid rendering negative zero as "-0"
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_bound;

    #[test]
    fn test_format_bound() {
        assert_eq!(format_bound(10.0), "10");
        assert_eq!(format_bound(2.5), "2.5");
        assert_eq!(format_bound(-0.0), "0");
        assert_eq!(format_bound(-15.0), "-15");
    }
}
