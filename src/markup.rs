//! Line-oriented reading of the light markdown the services return.
//!
//! Only `## ` headings, `* `/`- ` bullets and `**bold**` runs are recognized.

/// Inline run of a paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
}

/// One displayable line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    ListItem(String),
    Paragraph(Vec<Span>),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bold(text) => text,
        }
    }
}

impl Block {
    /// Flattens the block into display text, dropping emphasis markers.
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Heading(text) => text.clone(),
            Self::ListItem(text) => format!("• {text}"),
            Self::Paragraph(spans) => spans.iter().map(Span::text).collect(),
        }
    }
}

pub fn parse_markup(text: &str) -> Vec<Block> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Renders the whole text as plain lines joined by newlines.
pub fn to_plain_text(text: &str) -> String {
    parse_markup(text)
        .iter()
        .map(Block::to_plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_line(line: &str) -> Block {
    if let Some(heading) = line.strip_prefix("## ") {
        return Block::Heading(heading.trim().to_owned());
    }
    if let Some(item) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
        return Block::ListItem(item.trim().to_owned());
    }
    Block::Paragraph(parse_spans(line))
}

fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        if open > 0 {
            spans.push(Span::Plain(rest[..open].to_owned()));
        }
        spans.push(Span::Bold(after_open[..close].to_owned()));
        rest = &after_open[close + 2..];
    }

    if !rest.is_empty() {
        spans.push(Span::Plain(rest.to_owned()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::{parse_markup, to_plain_text, Block, Span};

    #[test]
    fn recognizes_headings_bullets_and_paragraphs() {
        let blocks = parse_markup("## Irrigation\n\n* water early\n- mulch\nplain line\n");
        assert_eq!(
            blocks,
            vec![
                Block::Heading("Irrigation".to_owned()),
                Block::ListItem("water early".to_owned()),
                Block::ListItem("mulch".to_owned()),
                Block::Paragraph(vec![Span::Plain("plain line".to_owned())]),
            ]
        );
    }

    #[test]
    fn splits_bold_runs() {
        let blocks = parse_markup("**المرض:** Late Blight");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Span::Bold("المرض:".to_owned()),
                Span::Plain(" Late Blight".to_owned()),
            ])]
        );
    }

    #[test]
    fn unmatched_marker_stays_plain() {
        let blocks = parse_markup("a **b");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![Span::Plain("a **b".to_owned())])]
        );
    }

    #[test]
    fn plain_text_drops_markers() {
        let text = to_plain_text("**Disease:** Rust\n\n**Suggested treatment:**\nSpray");
        assert_eq!(text, "Disease: Rust\nSuggested treatment:\nSpray");
    }
}
