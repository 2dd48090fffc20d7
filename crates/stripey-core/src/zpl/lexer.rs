//! Splits ZPL text into commands.
//!
//! A command is a prefix (`^` or `~`), a two letter code and everything up
//! to the next prefix. `^A` is the exception: its code is the single letter
//! and the font name becomes the first parameter character (`^A0N,30` ->
//! code `A`, params `0N,30`). Field data and comments only end at the next
//! `^`, so they may contain `~`.

/// One tokenized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    pub prefix: char,
    /// Upper-cased command code.
    pub code: String,
    /// Parameters with line breaks removed.
    pub params: String,
}

pub fn tokenize(input: &str) -> Vec<RawCommand> {
    let chars: Vec<char> = input.chars().collect();
    let mut commands = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let prefix = chars[i];
        if !is_prefix(prefix) {
            i += 1;
            continue;
        }

        let Some(&first) = chars.get(i + 1) else {
            break;
        };
        let first = first.to_ascii_uppercase();
        let (code, params_start) = if prefix == '^' && first == 'A' {
            ("A".to_string(), i + 2)
        } else {
            let second = chars.get(i + 2).map(|c| c.to_ascii_uppercase());
            match second {
                Some(second) if !is_prefix(second) => (format!("{first}{second}"), i + 3),
                _ => {
                    i += 2;
                    continue;
                }
            }
        };

        let runs_to_caret = matches!(code.as_str(), "FD" | "FV" | "FX");
        let mut end = params_start;
        while end < chars.len() {
            let c = chars[end];
            if c == '^' || (c == '~' && !runs_to_caret) {
                break;
            }
            end += 1;
        }

        let params = chars[params_start.min(end)..end]
            .iter()
            .filter(|c| **c != '\r' && **c != '\n')
            .collect();
        commands.push(RawCommand {
            prefix,
            code,
            params,
        });
        i = end;
    }

    commands
}

#[inline]
fn is_prefix(c: char) -> bool {
    c == '^' || c == '~'
}
