//! Literal text forms of scalar values as they appear in tool output.

/// Shortest round-trip rendering of a float, always with a fractional part or an
/// exponent: `1.5`, `10.0`, `1e+16`, `1.5e-05`.
///
/// Positional notation is used for decimal exponents in `-4..16`, scientific
/// notation with a signed two-digit exponent otherwise.
pub fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = format!("{value}");
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Numeric cell text: integral values below 1e16 print without a fractional part,
/// everything else goes through [`float_text`].
pub fn number_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{}", value as i64)
    } else {
        float_text(value)
    }
}

pub fn bool_text(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Quoted string literal. Single quotes unless the text holds a single quote and
/// no double quote.
pub fn quoted(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Bracketed list of quoted strings, e.g. `['A1>3']` or `[]`.
pub fn quoted_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let inner = items.into_iter().map(quoted).collect::<Vec<_>>().join(", ");
    format!("[{inner}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_switch_to_exponent_outside_positional_window() {
        assert_eq!(float_text(1.5), "1.5");
        assert_eq!(float_text(129_600.0), "129600.0");
        assert_eq!(float_text(1e16), "1e+16");
        assert_eq!(float_text(1.5e-5), "1.5e-05");
        assert_eq!(float_text(0.0001), "0.0001");
        assert_eq!(float_text(1e15), "1000000000000000.0");
        assert_eq!(float_text(-2.5e100), "-2.5e+100");
    }

    #[test]
    fn integral_numbers_drop_the_fraction_below_1e16() {
        assert_eq!(number_text(10.0), "10");
        assert_eq!(number_text(-3.0), "-3");
        assert_eq!(number_text(9_999_999_999_999_998.0), "1e+16");
        assert_eq!(number_text(1e16), "1e+16");
        assert_eq!(number_text(1e-5), "1e-05");
        assert_eq!(number_text(0.1), "0.1");
    }

    #[test]
    fn quoting_picks_the_other_quote_when_needed() {
        assert_eq!(quoted("abc"), "'abc'");
        assert_eq!(quoted("it's"), "\"it's\"");
        assert_eq!(quoted("a'b\"c"), "'a\\'b\"c'");
        assert_eq!(quoted_list(["3"]), "['3']");
        assert_eq!(quoted_list(Vec::<&str>::new()), "[]");
    }
}
