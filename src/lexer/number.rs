//! Semantic decoding of numeric literals (spec.md §4.3).
//!
//!     `logos` captures the raw digit-and-underscore text permissively; every
//!     rule that actually constitutes a valid literal (underscore placement,
//!     no leading zero, float requires a fraction or exponent, big-integer
//!     fallback on overflow) is enforced here, where it produces a precise
//!     `NumberError` instead of a silent partial lex.

use crate::lexer::token::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
    Octal,
    Binary,
}

/// Decodes a raw decimal-number token (`[+-]?digits(.digits)?([eE][+-]?digits)?`).
pub fn decode_decimal(raw: &str) -> Result<Literal, String> {
    let (sign, unsigned) = match raw.strip_prefix(['+', '-']) {
        Some(rest) => (&raw[..1], rest),
        None => ("", raw),
    };

    let (int_part, rest) = split_at_first(unsigned, |c| c == '.' || c == 'e' || c == 'E');
    validate_underscore_run(int_part)?;
    reject_leading_zero(int_part)?;

    let mut is_float = false;
    let mut frac_part = "";
    let mut exp_part = "";
    let mut remaining = rest;

    if let Some(after_dot) = remaining.strip_prefix('.') {
        is_float = true;
        let (frac, after_frac) = split_at_first(after_dot, |c| c == 'e' || c == 'E');
        frac_part = frac;
        validate_underscore_run(frac_part)?;
        if frac_part.is_empty() {
            return Err("fraction part must have at least one digit".into());
        }
        remaining = after_frac;
    }

    if let Some(after_e) = remaining.strip_prefix(['e', 'E']) {
        is_float = true;
        let exp_body = after_e.strip_prefix(['+', '-']).unwrap_or(after_e);
        exp_part = exp_body;
        validate_underscore_run(exp_part)?;
        if exp_part.is_empty() {
            return Err("exponent must have at least one digit".into());
        }
    } else if !remaining.is_empty() {
        return Err(format!("malformed numeric literal `{raw}`"));
    }

    let _ = frac_part;
    let _ = exp_part;

    if is_float {
        let text = raw.replace('_', "");
        let f: f64 = text
            .parse()
            .map_err(|_| format!("malformed float literal `{raw}`"))?;
        Ok(Literal::Float(f))
    } else {
        let digits = format!("{sign}{}", int_part.replace('_', ""));
        decode_integer(&digits, 10)
    }
}

pub fn decode_radix(raw: &str, radix: Radix) -> Result<Literal, String> {
    let (prefix_len, base) = match radix {
        Radix::Hex => (2, 16),
        Radix::Octal => (2, 8),
        Radix::Binary => (2, 2),
        Radix::Decimal => unreachable!("decode_radix is only used for hex/octal/binary"),
    };
    let digits = &raw[prefix_len..];
    validate_underscore_run(digits)?;
    if digits.is_empty() {
        return Err(format!("`{raw}` has no digits"));
    }
    decode_integer(&digits.replace('_', ""), base)
}

fn decode_integer(digits: &str, radix: u32) -> Result<Literal, String> {
    match i64::from_str_radix(digits.trim_start_matches('+'), radix) {
        Ok(n) => Ok(Literal::Int(n)),
        Err(_) => {
            // Outside i64 range: fall back to an arbitrary-precision decimal
            // string rather than failing outright (spec.md §4.3, §9).
            if radix == 10 {
                Ok(Literal::BigInt(digits.trim_start_matches('+').to_string()))
            } else {
                Err(format!("`{digits}` does not fit in a 64-bit integer"))
            }
        }
    }
}

fn split_at_first(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    match s.find(pred) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

fn validate_underscore_run(digits: &str) -> Result<(), String> {
    if digits.starts_with('_') || digits.ends_with('_') {
        return Err(format!("`{digits}` has a leading or trailing underscore"));
    }
    if digits.contains("__") {
        return Err(format!("`{digits}` has adjacent underscores"));
    }
    Ok(())
}

fn reject_leading_zero(int_part: &str) -> Result<(), String> {
    let stripped = int_part.replace('_', "");
    if stripped.len() > 1 && stripped.starts_with('0') {
        return Err(format!("`{int_part}` has a leading zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_int() {
        assert_eq!(decode_decimal("8080").unwrap(), Literal::Int(8080));
    }

    #[test]
    fn signed_int() {
        assert_eq!(decode_decimal("-42").unwrap(), Literal::Int(-42));
    }

    #[test]
    fn float_requires_fraction_or_exponent() {
        assert_eq!(decode_decimal("1.5").unwrap(), Literal::Float(1.5));
        assert_eq!(decode_decimal("1e3").unwrap(), Literal::Float(1000.0));
    }

    #[test]
    fn underscore_separators() {
        assert_eq!(decode_decimal("1_000").unwrap(), Literal::Int(1000));
        assert!(decode_decimal("_1000").is_err());
        assert!(decode_decimal("1000_").is_err());
        assert!(decode_decimal("1__000").is_err());
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(decode_decimal("007").is_err());
        assert_eq!(decode_decimal("0").unwrap(), Literal::Int(0));
        assert_eq!(decode_decimal("0.5").unwrap(), Literal::Float(0.5));
    }

    #[test]
    fn overflow_falls_back_to_bigint() {
        let lit = decode_decimal("99999999999999999999").unwrap();
        assert_eq!(lit, Literal::BigInt("99999999999999999999".to_string()));
    }

    #[test]
    fn hex_octal_binary() {
        assert_eq!(decode_radix("0xFF", Radix::Hex).unwrap(), Literal::Int(255));
        assert_eq!(decode_radix("0o17", Radix::Octal).unwrap(), Literal::Int(15));
        assert_eq!(decode_radix("0b101", Radix::Binary).unwrap(), Literal::Int(5));
    }
}
