//! Number-to-text conversion for the calculator display.

use crate::config::Config;

/// Renders a computed value the way the display shows it: integral values
/// without a fraction, no negative zero, and `0` for anything non-finite.
pub fn number_to_text(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Display-only transform: text longer than `config.display_max_chars`
/// switches to scientific notation with `config.exponent_digits` fractional
/// digits (`1.235e+9`). The calculator state is never touched.
pub fn format_for_display(text: &str, config: &Config) -> String {
    if text.chars().count() <= config.display_max_chars {
        return text.to_string();
    }
    match text.parse::<f64>() {
        Ok(value) => to_exponential(value, config.exponent_digits),
        Err(_) => text.to_string(),
    }
}

fn to_exponential(value: f64, digits: usize) -> String {
    let raw = format!("{value:.digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_drop_fraction() {
        assert_eq!(number_to_text(10.0), "10");
        assert_eq!(number_to_text(-2.5), "-2.5");
        assert_eq!(number_to_text(-0.0), "0");
        assert_eq!(number_to_text(f64::INFINITY), "0");
    }

    #[test]
    fn short_text_is_untouched() {
        let config = Config::default();
        assert_eq!(format_for_display("123456789", &config), "123456789");
        assert_eq!(format_for_display("0.", &config), "0.");
    }

    #[test]
    fn long_text_switches_to_scientific() {
        let config = Config::default();
        assert_eq!(format_for_display("1234567890", &config), "1.235e+9");
        assert_eq!(
            format_for_display("0.30000000000000004", &config),
            "3.000e-1"
        );
        assert_eq!(format_for_display("-1234567890", &config), "-1.235e+9");
    }
}
