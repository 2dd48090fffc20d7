//! EAN-13 symbol encoding.

/// Left-hand odd parity (L) patterns; G is the reversed R pattern and R is
/// the complement of L.
const L_CODES: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];

/// Parity of the six left digits, selected by the first digit.
const PARITY: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG", "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL",
    "LGGLGL",
];

const GUARD: &str = "101";
const CENTRE: &str = "01010";

/// Normalise field data to 13 digits.
///
/// Up to 12 digits are taken and padded with leading zeros; the check digit
/// is always computed.
pub(crate) fn normalize(data: &str) -> Result<String, String> {
    if let Some(bad) = data.chars().find(|c| !c.is_ascii_digit()) {
        return Err(format!("EAN-13 data must be digits, found '{bad}'"));
    }
    let digits: String = data.chars().take(12).collect();
    let mut code = format!("{digits:0>12}");
    code.push(char::from(b'0' + checksum(&code)));
    Ok(code)
}

/// Check digit over 12 digits: odd positions weigh 1, even positions 3.
fn checksum(digits: &str) -> u8 {
    let mut sum = 0u32;
    for (i, ch) in digits.chars().enumerate() {
        let d = ch.to_digit(10).unwrap_or(0);
        if (i % 2) == 0 {
            sum += d;
        } else {
            sum += d * 3;
        }
    }
    let modulo = sum % 10;
    let check = if modulo == 0 { 0 } else { 10 - modulo };
    check as u8
}

/// The 95 module pattern of a normalised 13 digit code, `true` for a bar.
pub(crate) fn modules(code: &str) -> Vec<bool> {
    let digits: Vec<usize> = code
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as usize)
        .collect();
    let Some((&first, rest)) = digits.split_first() else {
        return Vec::new();
    };

    let mut pattern = String::with_capacity(95);
    pattern.push_str(GUARD);
    for (digit, parity) in rest.iter().take(6).zip(PARITY[first].chars()) {
        let l = L_CODES[*digit];
        if parity == 'L' {
            pattern.push_str(l);
        } else {
            pattern.extend(l.chars().rev().map(invert));
        }
    }
    pattern.push_str(CENTRE);
    for digit in rest.iter().skip(6) {
        pattern.extend(L_CODES[*digit].chars().map(invert));
    }
    pattern.push_str(GUARD);

    pattern.chars().map(|c| c == '1').collect()
}

fn invert(c: char) -> char {
    if c == '1' {
        '0'
    } else {
        '1'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(modules: &[bool]) -> String {
        modules.iter().map(|&bar| if bar { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(normalize("590123412345").unwrap(), "5901234123457");
        assert_eq!(normalize("400638133393").unwrap(), "4006381333931");
    }

    #[test]
    fn test_normalize_pads_and_truncates() {
        assert_eq!(normalize("12345").unwrap(), "0000000123457");
        assert_eq!(normalize("5901234123450").unwrap(), "5901234123457");
    }

    #[test]
    fn test_normalize_rejects_letters() {
        assert!(normalize("12A4").is_err());
    }

    #[test]
    fn test_modules_structure() {
        let modules = modules("5901234123457");
        assert_eq!(modules.len(), 95);

        let pattern = bits(&modules);
        assert_eq!(&pattern[..3], GUARD);
        assert_eq!(&pattern[45..50], CENTRE);
        assert_eq!(&pattern[92..], GUARD);
    }

    #[test]
    fn test_modules_parity() {
        // First digit 0: all six left digits use L codes.
        let pattern = bits(&modules("0000000000000"));
        assert_eq!(&pattern[3..10], L_CODES[0]);
        // Right digits use R codes, the complement of L.
        assert_eq!(&pattern[50..57], "1110010");

        // First digit 1: the third left digit uses a G code.
        let pattern = bits(&modules("1000000000000"));
        assert_eq!(&pattern[3..10], L_CODES[0]);
        assert_eq!(&pattern[17..24], "0100111");
    }
}
