//! SI-prefixed display of measured values.

/// Format a measurement with an SI prefix and unit, e.g.
/// `format_value(0.00857, "A")` is `"8.570 mA"`.
pub fn format_value(value: f64, unit: &str) -> String {
    let abs = value.abs();

    let (scaled, prefix) = if abs == 0.0 {
        (0.0, "")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "k")
    } else if abs >= 1.0 {
        (value, "")
    } else if abs >= 1e-3 {
        (value * 1e3, "m")
    } else if abs >= 1e-6 {
        (value * 1e6, "u")
    } else if abs >= 1e-9 {
        (value * 1e9, "n")
    } else {
        (value * 1e12, "p")
    };

    format!("{scaled:.3} {prefix}{unit}")
}

/// Volts.
pub fn format_volts(value: f64) -> String {
    format_value(value, "V")
}

/// Amperes.
pub fn format_amps(value: f64) -> String {
    format_value(value, "A")
}

/// Ohms.
pub fn format_ohms(value: f64) -> String {
    format_value(value, "\u{3a9}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_range() {
        assert_eq!(format_volts(4.0), "4.000 V");
        assert_eq!(format_volts(0.0), "0.000 V");
    }

    #[test]
    fn test_milli_micro() {
        assert_eq!(format_amps(0.00857), "8.570 mA");
        assert_eq!(format_amps(-2e-6), "-2.000 uA");
    }

    #[test]
    fn test_kilo_mega() {
        assert_eq!(format_ohms(3300.0), "3.300 k\u{3a9}");
        assert_eq!(format_ohms(2.2e6), "2.200 M\u{3a9}");
    }
}
