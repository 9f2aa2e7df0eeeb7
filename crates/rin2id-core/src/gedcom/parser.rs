use crate::error::ParseError;
use crate::model::{NodeId, Record, XREF_DELIMITER};
use crate::tree::RecordTree;

/// Build a record tree from decoded GEDCOM text.
///
/// Blank lines are skipped. Each level may be at most one deeper than the
/// line before it, and the first line must be level 0.
pub(crate) fn parse_records(text: &str) -> Result<RecordTree, ParseError> {
    let mut tree = RecordTree::new();
    // parents[level] is the node a record at `level` attaches to.
    let mut parents: Vec<NodeId> = vec![NodeId::ROOT];

    for (idx, raw) in split_lines(text).enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_start();
        if line.trim_end().is_empty() {
            continue;
        }

        let record = parse_line(line, line_no)?;
        let level = record.level as usize;
        if level >= parents.len() {
            return Err(ParseError::InvalidLevel {
                line: line_no,
                text: raw.to_string(),
            });
        }

        let id = tree.append(parents[level], record);
        parents.truncate(level + 1);
        parents.push(id);
    }

    Ok(tree)
}

/// Split on `\r\n`, `\n` or `\r`. A trailing terminator does not yield an empty line.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(&['\r', '\n'][..]) {
            Some(pos) => {
                let line = &rest[..pos];
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

fn parse_line(line: &str, line_no: usize) -> Result<Record, ParseError> {
    let invalid_level = || ParseError::InvalidLevel {
        line: line_no,
        text: line.to_string(),
    };
    let missing_tag = || ParseError::MissingTag {
        line: line_no,
        text: line.to_string(),
    };

    let (level_str, rest) = split_field(line);
    if level_str.is_empty() || !level_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_level());
    }
    let level: u32 = level_str.parse().map_err(|_| invalid_level())?;

    let (mut token, mut rest) = split_field(rest.unwrap_or(""));
    let mut xref = None;
    if let Some(inner) = token
        .strip_prefix(XREF_DELIMITER)
        .and_then(|t| t.strip_suffix(XREF_DELIMITER))
    {
        xref = Some(inner.to_string());
        (token, rest) = split_field(rest.unwrap_or(""));
    }

    if token.is_empty() {
        return Err(missing_tag());
    }

    let value = rest
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Ok(Record {
        level,
        xref,
        tag: token.to_string(),
        value,
    })
}

/// Next space-delimited field and whatever follows the single separating space.
fn split_field(s: &str) -> (&str, Option<&str>) {
    match s.split_once(' ') {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}
