// Number helpers shared by the ledger service and any client of it.

/// Spanish/Colombian number formats as they appear in the budget spreadsheet.
///
/// Cells are typed by hand, so the same column can hold `"1.000"`,
/// `"1.234,56"`, `"$ 25.000"` or a plain `"1500"` written back by the ledger.
pub mod spanish_format {
    /// How a lone `.` in a cleaned amount is read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SingleDot {
        /// The dot groups thousands and is dropped.
        Thousands,
        /// The dot is a decimal point and is kept.
        Decimal,
    }

    /// Decides what a single `.` means when no `,` is present.
    ///
    /// `cleaned` only holds digits and exactly one `.`.
    ///
    /// | digits after the dot | cleaned length | reading   | example             |
    /// |----------------------|----------------|-----------|---------------------|
    /// | 3                    | > 4            | thousands | `"25.000"` → 25000  |
    /// | 3                    | <= 4           | decimal   | `".123"` → 0.123    |
    /// | more than 3          | any            | thousands | `"1.0000"` → 10000  |
    /// | 0 to 2               | any            | decimal   | `"1.5"` → 1.5       |
    ///
    /// A short value such as `"1.234"` is therefore read as 1234 even when the
    /// author meant 1.234. That ambiguity is inherent to the sheet data.
    pub fn classify_single_dot(cleaned: &str) -> SingleDot {
        let after_dot = match cleaned.rfind('.') {
            Some(pos) => cleaned.len() - pos - 1,
            None => return SingleDot::Decimal,
        };

        if (after_dot == 3 && cleaned.len() > 4) || after_dot > 3 {
            SingleDot::Thousands
        } else {
            SingleDot::Decimal
        }
    }

    /// Parses a free-form amount into a number, returning `0.0` when nothing
    /// numeric can be recovered.
    ///
    /// Everything except ASCII digits, `.` and `,` is discarded first. Then:
    /// - with both separators, `.` groups thousands and `,` is the decimal mark;
    /// - with only `,`, it is the decimal mark;
    /// - with only `.`, several dots group thousands and a single dot is
    ///   resolved by [`classify_single_dot`].
    pub fn parse_amount(s: &str) -> f64 {
        let cleaned: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .collect();
        if cleaned.is_empty() {
            return 0.0;
        }

        let has_dot = cleaned.contains('.');
        let has_comma = cleaned.contains(',');

        let normalized = if has_dot && has_comma {
            cleaned.replace('.', "").replacen(',', ".", 1)
        } else if has_comma {
            cleaned.replacen(',', ".", 1)
        } else if has_dot {
            let dots = cleaned.matches('.').count();
            if dots > 1 {
                cleaned.replace('.', "")
            } else {
                match classify_single_dot(&cleaned) {
                    SingleDot::Thousands => cleaned.replace('.', ""),
                    SingleDot::Decimal => cleaned,
                }
            }
        } else {
            cleaned
        };

        parse_float_prefix(&normalized)
    }

    /// Same as [`parse_amount`] for cells that may be missing.
    pub fn parse_amount_opt(s: Option<&str>) -> f64 {
        s.map(parse_amount).unwrap_or(0.0)
    }

    // The normalized string can still be malformed ("1.2.3" after a single
    // comma swap, or a bare "."). Read the longest valid leading literal,
    // the way a lenient float reader does, and fall back to zero.
    fn parse_float_prefix(s: &str) -> f64 {
        let mut end = 0;
        let mut seen_dot = false;
        for (i, c) in s.char_indices() {
            if c.is_ascii_digit() {
                end = i + 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
        }

        match s[..end].parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    /// Canonical form used when writing an amount back to the sheet: no
    /// thousands separators, no trailing `.0`, and `,` as the decimal mark so
    /// that `parse_amount` reads the value back unchanged.
    pub fn format_number(value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            // f64 Display never uses exponent notation.
            format!("{}", value).replacen('.', ",", 1)
        }
    }

    /// Peso display format: `"$ 1.234.567"`. Fractions are rounded away.
    pub fn format_currency(value: f64) -> String {
        let rounded = value.round();
        let digits = format!("{}", rounded.abs() as u64);

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if rounded < 0.0 {
            format!("-$ {}", grouped)
        } else {
            format!("$ {}", grouped)
        }
    }

}
