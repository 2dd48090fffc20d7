//! Code 128 symbol encoding.
//!
//! Each symbol value is drawn as three bars and three spaces whose widths
//! (in modules) add up to 11. The stop pattern has an extra final bar.

use crate::zpl::Code128Mode;

/// Bar/space widths, indexed by symbol value.
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232", "2331112",
];

const CODE_C: u8 = 99;
const CODE_B: u8 = 100;
const CODE_A: u8 = 101;
const FNC1: u8 = 102;
const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 106;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subset {
    A,
    B,
    C,
}

impl Subset {
    fn start(self) -> u8 {
        match self {
            Subset::A => START_A,
            Subset::B => START_B,
            Subset::C => START_C,
        }
    }

    fn switch_code(self) -> u8 {
        match self {
            Subset::A => CODE_A,
            Subset::B => CODE_B,
            Subset::C => CODE_C,
        }
    }

    /// Symbol value of a single character in subset A or B.
    fn value_of(self, c: char) -> Option<u8> {
        let code = u32::from(c);
        match self {
            Subset::A if code < 32 => Some((code + 64) as u8),
            Subset::A if (32..96).contains(&code) => Some((code - 32) as u8),
            Subset::B if (32..128).contains(&code) => Some((code - 32) as u8),
            _ => None,
        }
    }
}

/// An encoded symbol: values from start code to check value (without stop),
/// and the human readable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Code128 {
    pub values: Vec<u8>,
    pub text: String,
}

impl Code128 {
    /// Module pattern including the stop code, `true` for a bar.
    pub fn modules(&self) -> Vec<bool> {
        let mut modules = Vec::with_capacity(self.values.len() * 11 + 13);
        for &value in self.values.iter().chain(std::iter::once(&STOP)) {
            let pattern = PATTERNS[value as usize];
            for (index, width) in pattern.bytes().enumerate() {
                let bar = index % 2 == 0;
                modules.extend(std::iter::repeat(bar).take((width - b'0') as usize));
            }
        }
        modules
    }
}

pub(crate) fn encode(data: &str, mode: Code128Mode) -> Result<Code128, String> {
    let (mut values, text) = match mode {
        Code128Mode::Normal => encode_with_invocations(data)?,
        Code128Mode::Automatic => (encode_automatic(data)?, data.to_string()),
    };
    values.push(checksum(&values));
    Ok(Code128 { values, text })
}

/// Mod 103 check value over the start code and data values.
fn checksum(values: &[u8]) -> u8 {
    let sum = values
        .iter()
        .enumerate()
        .fold(0usize, |sum, (position, &value)| {
            (sum + (position.max(1) % 103) * usize::from(value)) % 103
        });
    sum as u8
}

/// ZPL normal mode: subset B unless the data selects another with an
/// invocation code (`>9` start A, `>:` start B, `>;` start C, `>5`/`>6`/`>7`
/// switch to C/B/A, `>8` FNC1, `><` a literal `>`).
fn encode_with_invocations(data: &str) -> Result<(Vec<u8>, String), String> {
    let chars: Vec<char> = data.chars().collect();
    let mut i = 0;

    let mut subset = match (chars.first(), chars.get(1)) {
        (Some('>'), Some('9')) => Subset::A,
        (Some('>'), Some(';')) => Subset::C,
        (Some('>'), Some(':')) => Subset::B,
        _ => Subset::B,
    };
    if matches!((chars.first(), chars.get(1)), (Some('>'), Some('9' | ':' | ';'))) {
        i = 2;
    }

    let mut values = vec![subset.start()];
    let mut text = String::new();

    while i < chars.len() {
        let c = chars[i];
        if c == '>' {
            if let Some(&next) = chars.get(i + 1) {
                let switched = match next {
                    '5' => Some(Subset::C),
                    '6' => Some(Subset::B),
                    '7' => Some(Subset::A),
                    _ => None,
                };
                if let Some(target) = switched {
                    values.push(target.switch_code());
                    subset = target;
                    i += 2;
                    continue;
                }
                if next == '8' {
                    values.push(FNC1);
                    i += 2;
                    continue;
                }
                if next == '<' {
                    let value = subset
                        .value_of('>')
                        .ok_or_else(|| "'>' cannot be encoded in subset C".to_string())?;
                    values.push(value);
                    text.push('>');
                    i += 2;
                    continue;
                }
            }
        }

        if subset == Subset::C {
            let pair = chars.get(i..i + 2).filter(|p| p.iter().all(char::is_ascii_digit));
            let Some(pair) = pair else {
                return Err(format!("subset C needs digit pairs, found '{c}'"));
            };
            values.push(digit_pair(pair[0], pair[1]));
            text.extend(pair);
            i += 2;
            continue;
        }

        let value = subset
            .value_of(c)
            .ok_or_else(|| format!("character '{c}' cannot be encoded in Code 128"))?;
        values.push(value);
        text.push(c);
        i += 1;
    }

    Ok((values, text))
}

/// ZPL automatic mode: runs of four or more digits use subset C, control
/// characters use subset A, everything else subset B.
fn encode_automatic(data: &str) -> Result<Vec<u8>, String> {
    let chars: Vec<char> = data.chars().collect();
    if let Some(bad) = chars.iter().find(|c| !c.is_ascii()) {
        return Err(format!("character '{bad}' cannot be encoded in Code 128"));
    }

    let digit_run = |from: usize| {
        chars[from..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count()
    };
    let text_subset = |c: char| {
        if (c as u32) < 32 {
            Subset::A
        } else {
            Subset::B
        }
    };

    let first_run = digit_run(0);
    let all_digit_pairs = first_run == chars.len() && first_run >= 2 && first_run % 2 == 0;
    let mut subset = if first_run >= 4 || all_digit_pairs {
        Subset::C
    } else {
        chars.first().map(|&c| text_subset(c)).unwrap_or(Subset::B)
    };
    let mut values = vec![subset.start()];

    let mut i = 0;
    while i < chars.len() {
        if subset == Subset::C {
            if digit_run(i) >= 2 {
                values.push(digit_pair(chars[i], chars[i + 1]));
                i += 2;
                continue;
            }
            subset = text_subset(chars[i]);
            values.push(subset.switch_code());
        }

        let run = digit_run(i);
        if run >= 4 {
            if run % 2 == 1 {
                push_text(&mut values, &mut subset, chars[i])?;
                i += 1;
            }
            subset = Subset::C;
            values.push(CODE_C);
            continue;
        }

        push_text(&mut values, &mut subset, chars[i])?;
        i += 1;
    }

    Ok(values)
}

/// Encode one character in subset A or B, switching if needed.
fn push_text(values: &mut Vec<u8>, subset: &mut Subset, c: char) -> Result<(), String> {
    if let Some(value) = subset.value_of(c) {
        values.push(value);
        return Ok(());
    }
    let other = if *subset == Subset::A {
        Subset::B
    } else {
        Subset::A
    };
    let value = other
        .value_of(c)
        .ok_or_else(|| format!("character '{c}' cannot be encoded in Code 128"))?;
    values.push(other.switch_code());
    values.push(value);
    *subset = other;
    Ok(())
}

fn digit_pair(tens: char, ones: char) -> u8 {
    let digit = |c: char| c.to_digit(10).unwrap_or(0) as u8;
    digit(tens) * 10 + digit(ones)
}
