//! Emitted-text formatting — deterministic, idempotent reindentation.
//!
//! The emitter assembles blocks with no indentation; this pass reindents by
//! brace depth (two spaces per level), collapses runs of blank lines and
//! normalizes the trailing newline. Braces inside string literals and line
//! comments are ignored so opaque test bodies cannot skew the result.

const INDENT: &str = "  ";

/// Reformat emitted JavaScript. Pure and idempotent: formatting the same
/// text twice yields byte-identical output.
pub fn format(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut depth: usize = 0;
    let mut blank_pending = false;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            // Collapse runs of blanks; drop blanks before the first content.
            blank_pending = !out.is_empty();
            continue;
        }
        if blank_pending {
            out.push(String::new());
            blank_pending = false;
        }
        let scan = scan_line(line);
        let level = depth.saturating_sub(scan.leading_closes);
        out.push(format!("{}{}", INDENT.repeat(level), line));
        depth = (depth + scan.opens).saturating_sub(scan.closes);
    }

    if out.is_empty() {
        return String::new();
    }
    let mut result = out.join("\n");
    result.push('\n');
    result
}

struct BraceScan {
    opens: usize,
    closes: usize,
    /// Closing braces at the start of the line (before any other
    /// meaningful character) — they outdent the line itself.
    leading_closes: usize,
}

fn scan_line(line: &str) -> BraceScan {
    let chars: Vec<char> = line.chars().collect();
    let mut opens = 0;
    let mut closes = 0;
    let mut in_single = false;
    let mut in_double = false;
    let mut in_template = false;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let in_string = in_single || in_double || in_template;

        // Count consecutive preceding backslashes. Odd = escaped.
        let escaped = {
            let mut backslashes = 0;
            let mut j = i;
            while j > 0 && chars[j - 1] == '\\' {
                backslashes += 1;
                j -= 1;
            }
            backslashes % 2 == 1
        };

        match ch {
            '\'' if !in_double && !in_template && !escaped => in_single = !in_single,
            '"' if !in_single && !in_template && !escaped => in_double = !in_double,
            '`' if !in_single && !in_double && !escaped => in_template = !in_template,
            '/' if !in_string && i + 1 < chars.len() && chars[i + 1] == '/' => break,
            '{' if !in_string => opens += 1,
            '}' if !in_string => closes += 1,
            _ => {}
        }
        i += 1;
    }

    let mut leading_closes = 0;
    for &ch in &chars {
        match ch {
            '}' => leading_closes += 1,
            ')' | ']' | ';' | ',' | ' ' | '\t' => {}
            _ => break,
        }
    }

    BraceScan {
        opens,
        closes,
        leading_closes,
    }
}
