//! Whitespace repair inside nominal-value lists.
//!
//! Some published ARFF files (the NSL-KDD sets among them) declare nominal
//! attributes as `{ 'tcp', 'udp' }`. The reader requires quoted nominal
//! values to touch their delimiters, so the gaps are removed before parsing.
//! Only the brace section of `@attribute` lines is touched.

use std::sync::LazyLock;

use regex::Regex;

/// `{ 'x'` -> `{'x'`
static OPEN_BRACE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\s+(['"])"#).expect("Invalid open-brace regex"));

/// `, 'x'` -> `,'x'`
static COMMA_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#",\s+(['"])"#).expect("Invalid comma regex"));

/// `'x' }` -> `'x'}`
static CLOSE_BRACE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(['"])\s+\}"#).expect("Invalid close-brace regex"));

const ATTRIBUTE_KEYWORD: &str = "@attribute";

/// Repair nominal-list whitespace in ARFF text.
///
/// Pure and idempotent. Line endings and every line other than
/// `@attribute` declarations are returned unchanged.
pub fn normalize_nominal_lists(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        match nominal_section_start(line) {
            Some(start) => {
                out.push_str(&line[..start]);
                out.push_str(&repair_list(&line[start..]));
            }
            None => out.push_str(line),
        }
    }
    out
}

/// Byte offset of the first `{` on an `@attribute` line.
fn nominal_section_start(line: &str) -> Option<usize> {
    let body = line.trim_start();
    let keyword = body.get(..ATTRIBUTE_KEYWORD.len())?;
    if !keyword.eq_ignore_ascii_case(ATTRIBUTE_KEYWORD) {
        return None;
    }
    line.find('{')
}

fn repair_list(section: &str) -> String {
    let step = OPEN_BRACE_GAP.replace_all(section, "{$1");
    let step = COMMA_GAP.replace_all(&step, ",$1");
    CLOSE_BRACE_GAP.replace_all(&step, "$1}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_all_three_gaps() {
        assert_eq!(
            normalize_nominal_lists("@attribute protocol_type { 'tcp', 'udp',  'icmp' }\n"),
            "@attribute protocol_type {'tcp','udp','icmp'}\n"
        );
    }

    #[test]
    fn handles_double_quotes_and_case() {
        assert_eq!(
            normalize_nominal_lists("@ATTRIBUTE flag {\t\"S0\",\t\"SF\" }"),
            "@ATTRIBUTE flag {\"S0\",\"SF\"}"
        );
    }

    #[test]
    fn leaves_data_rows_and_comments_alone() {
        let text = "% a comment, 'quoted' }\n@data\n1, 'a b', 'c'\n";
        assert_eq!(normalize_nominal_lists(text), text);
    }

    #[test]
    fn leaves_attribute_names_and_unquoted_lists_alone() {
        let text = "@attribute  'odd name'   {a, b}\r\n@relation 'x' \n";
        assert_eq!(normalize_nominal_lists(text), text);
    }

    #[test]
    fn correct_input_is_unchanged() {
        let text = "@attribute class {'normal','anomaly'}\n";
        assert_eq!(normalize_nominal_lists(text), text);
    }
}
