//! Splitting outline text into literal runs and `<name>` placeholders.

/// A run of outline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    Literal(&'a str),
    /// The name between `<` and `>`.
    Placeholder(&'a str),
}

/// Split `text` at placeholders.
///
/// A placeholder is `<` followed by a non-empty name free of `<`, `>` and
/// line breaks, then `>`. Unmatched angle brackets stay literal.
pub(crate) fn split_placeholders(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut search = 0;
    while let Some(open) = text
        .get(search..)
        .and_then(|rest| rest.find('<'))
        .map(|index| search + index)
    {
        let name_start = open + 1;
        let stop = text
            .get(name_start..)
            .and_then(|rest| rest.find(['<', '>', '\n', '\r']))
            .map(|index| name_start + index);
        match stop {
            Some(close) if close > name_start && text.get(close..=close) == Some(">") => {
                if open > literal_start {
                    pieces.extend(text.get(literal_start..open).map(Piece::Literal));
                }
                pieces.extend(text.get(name_start..close).map(Piece::Placeholder));
                literal_start = close + 1;
                search = close + 1;
            }
            _ => search = name_start,
        }
    }
    if literal_start < text.len() {
        pieces.extend(text.get(literal_start..).map(Piece::Literal));
    }
    pieces
}
