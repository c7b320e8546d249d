//! Text Reflow
//!
//! Splits a text node into lines of whole words that fit the width left
//! beside floats, moving below a float when a line cannot fit beside it.

use crate::error::{LayoutError, LayoutResult};
use crate::fixed::FixedPoint;
use crate::float::FloatLedger;
use crate::font::FontHandle;
use crate::geometry::Point;

/// Collapse whitespace in text according to CSS rules
/// - Multiple whitespace characters become a single space
/// - Preserves a single space at start/end if there was any whitespace
pub fn collapse_whitespace(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let has_leading_space = text.starts_with(char::is_whitespace);
    let has_trailing_space = text.ends_with(char::is_whitespace);

    let words: Vec<&str> = text.split_whitespace().collect();

    if words.is_empty() {
        // All whitespace - collapse to single space
        return " ".to_string();
    }

    let mut result = String::new();

    if has_leading_space {
        result.push(' ');
    }

    result.push_str(&words.join(" "));

    if has_trailing_space {
        result.push(' ');
    }

    result
}

/// A unit of a text run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Space,
}

/// Tokenised text of one text node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    tokens: Vec<Token>,
}

impl TextRun {
    /// Collapse whitespace and split `text` into words and spaces
    pub fn new(text: &str) -> Self {
        let collapsed = collapse_whitespace(text);
        let mut tokens = Vec::new();
        for (i, part) in collapsed.split(' ').enumerate() {
            if i > 0 {
                tokens.push(Token::Space);
            }
            if !part.is_empty() {
                tokens.push(Token::Word(part.to_string()));
            }
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A measured word
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    /// Cumulative glyph advances, from zero to the word width
    pub advances: Vec<FixedPoint>,
}

impl Word {
    pub fn width(&self) -> FixedPoint {
        self.advances.last().copied().unwrap_or(FixedPoint::ZERO)
    }
}

/// Words placed on one line
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<Word>,
    pub space_advance: FixedPoint,
    /// Line starts with a space that takes room
    pub leading_space: bool,
    /// Line ends with a space that takes room
    pub trailing_space: bool,
    /// The line is broken here, as opposed to more inline content
    /// possibly continuing on it
    pub is_end_line: bool,
}

impl Line {
    pub fn new(space_advance: FixedPoint) -> Self {
        Self {
            words: Vec::new(),
            space_advance,
            leading_space: false,
            trailing_space: false,
            is_end_line: false,
        }
    }

    /// Measured width, counting spaces between words and at either end
    pub fn width(&self) -> FixedPoint {
        let words: FixedPoint = self.words.iter().map(Word::width).sum();
        let mut spaces = self.words.len().saturating_sub(1) as i32;
        if self.leading_space {
            spaces += 1;
        }
        if self.trailing_space {
            spaces += 1;
        }
        words + self.space_advance * spaces
    }

    /// Words concatenated without separators, as glyph runs draw them
    pub fn glyph_text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

/// Room beside floats for a vertical band
pub trait FloatQuery {
    /// Width left for content in `[y, y + line_height)`
    fn available_width(&self, y: FixedPoint, line_height: FixedPoint) -> FixedPoint;

    /// Where the free space starts in that band
    fn left_offset(&self, y: FixedPoint, line_height: FixedPoint) -> FixedPoint;

    fn has_floats_at(&self, y: FixedPoint, line_height: FixedPoint) -> bool;

    /// Nearest bottom edge of the floats intruding on the band
    fn next_float_bottom(&self, y: FixedPoint, line_height: FixedPoint) -> Option<FixedPoint>;
}

/// [`FloatQuery`] over a container's ledger
#[derive(Debug, Clone, Copy)]
pub struct BandQuery<'l> {
    pub ledger: &'l FloatLedger,
    pub container_width: FixedPoint,
}

impl FloatQuery for BandQuery<'_> {
    fn available_width(&self, y: FixedPoint, line_height: FixedPoint) -> FixedPoint {
        self.ledger.available_width(y, line_height, self.container_width)
    }

    fn left_offset(&self, y: FixedPoint, line_height: FixedPoint) -> FixedPoint {
        self.ledger.available_left_offset(y, line_height)
    }

    fn has_floats_at(&self, y: FixedPoint, line_height: FixedPoint) -> bool {
        self.ledger.has_floats_at(y, line_height)
    }

    fn next_float_bottom(&self, y: FixedPoint, line_height: FixedPoint) -> Option<FixedPoint> {
        self.ledger.next_float_bottom(y, line_height)
    }
}

/// A line and where reflow put it
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: Line,
    /// Offset from the start of the line box
    pub x: FixedPoint,
    /// Top of the band, in the container's coordinates
    pub y: FixedPoint,
    /// Left float offset of the band
    pub left: FixedPoint,
}

/// Greedily pack whole words from `tokens[start..]` into `budget`.
///
/// The first word of a line that is empty and starts at the line start is
/// always taken, even when it overflows. Returns the line and the index of
/// the first token not consumed.
pub fn break_line(
    tokens: &[Token],
    start: usize,
    budget: FixedPoint,
    font: &dyn FontHandle,
    at_line_start: bool,
) -> (Line, usize) {
    let space = font.space_advance();
    let mut line = Line::new(space);
    let mut pos = start;

    if matches!(tokens.get(pos), Some(Token::Space)) {
        pos += 1;
        line.leading_space = !at_line_start;
    }

    let mut width = line.width();
    let mut pending_space = false;
    while let Some(token) = tokens.get(pos) {
        match token {
            Token::Space => {
                pending_space = true;
                pos += 1;
            }
            Token::Word(text) => {
                let advances = font.advances(text);
                let word_width = advances.last().copied().unwrap_or(FixedPoint::ZERO);
                let gap = if line.words.is_empty() { FixedPoint::ZERO } else { space };
                let forced = line.words.is_empty() && at_line_start;
                if !forced && width + gap + word_width > budget {
                    line.is_end_line = true;
                    return (line, pos);
                }
                width += gap + word_width;
                line.words.push(Word { text: text.clone(), advances });
                pending_space = false;
                pos += 1;
            }
        }
    }

    line.trailing_space = pending_space && !line.words.is_empty();
    (line, pos)
}

/// Break a text run into lines starting at `start` (x within the current
/// line box, y in the container), flowing around floats.
///
/// A line that overflows its band while floats are present is retried at
/// the nearest bottom edge of those floats, where the room changes.
pub fn reflow_text(
    run: &TextRun,
    font: &dyn FontHandle,
    start: Point,
    line_height: FixedPoint,
    floats: &dyn FloatQuery,
) -> LayoutResult<Vec<PlacedLine>> {
    let tokens = run.tokens();
    let mut placed = Vec::new();
    let mut x = start.x;
    let mut y = start.y;
    let mut pos = 0;

    while pos < tokens.len() {
        let budget = (floats.available_width(y, line_height) - x).non_negative();
        let (line, next) = break_line(tokens, pos, budget, font, x == FixedPoint::ZERO);
        let width = line.width();

        if width > budget && floats.has_floats_at(y, line_height) {
            let below = floats
                .next_float_bottom(y, line_height)
                .filter(|&bottom| bottom > y)
                .ok_or(LayoutError::NoFloatClearance(y))?;
            log::trace!("line of width {} does not fit beside floats at y={}, moving to {}", width, y, below);
            y = below;
            x = FixedPoint::ZERO;
            continue;
        }

        let is_end_line = line.is_end_line;
        if !line.words.is_empty() || width > FixedPoint::ZERO {
            let left = floats.left_offset(y, line_height);
            placed.push(PlacedLine { line, x, y, left });
            x += width;
        }
        pos = next;

        if is_end_line {
            y += line_height;
            x = FixedPoint::ZERO;
        }
    }

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxId;
    use crate::float::FloatEntry;
    use crate::font::{FontProvider, SimpleFontProvider};
    use std::rc::Rc;

    fn px(v: i32) -> FixedPoint {
        FixedPoint::from_px(v)
    }

    /// Glyphs 10 wide, spaces 5 wide
    fn font() -> Rc<dyn FontHandle> {
        SimpleFontProvider::fixed(10.0, 5.0).font(&[], 16.0)
    }

    fn left_float(top: i32, width: i32, height: i32) -> FloatLedger {
        let mut ledger = FloatLedger::new();
        ledger.add_left(FloatEntry {
            owner: BoxId::new(0),
            top: px(top),
            mbp_height: FixedPoint::ZERO,
            mbp_width: FixedPoint::ZERO,
            content_height: px(height),
            content_width: px(width),
        });
        ledger
    }

    fn words(line: &Line) -> Vec<&str> {
        line.words.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("hello    world"), "hello world");
        assert_eq!(collapse_whitespace(" hello\n"), " hello ");
        assert_eq!(collapse_whitespace("\t\n"), " ");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_tokenize() {
        let run = TextRun::new("  one\ttwo ");
        assert_eq!(
            run.tokens(),
            &[
                Token::Space,
                Token::Word("one".to_string()),
                Token::Space,
                Token::Word("two".to_string()),
                Token::Space,
            ]
        );
        assert_eq!(TextRun::new(" \n ").tokens(), &[Token::Space]);
        assert!(TextRun::new("").is_empty());
    }

    #[test]
    fn test_line_width() {
        let run = TextRun::new("ab cde");
        let (line, next) = break_line(run.tokens(), 0, px(1000), font().as_ref(), true);
        assert_eq!(next, 3);
        assert_eq!(words(&line), vec!["ab", "cde"]);
        assert_eq!(line.width(), px(55));
        assert_eq!(line.glyph_text(), "abcde");
        assert!(!line.is_end_line);
    }

    #[test]
    fn test_four_words_break_three_and_one() {
        let run = TextRun::new("aaa aaa aaa aaa");
        let ledger = FloatLedger::new();
        let floats = BandQuery { ledger: &ledger, container_width: px(100) };

        let lines = reflow_text(&run, font().as_ref(), Point::default(), px(20), &floats).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line.words.len(), 3);
        assert_eq!(lines[0].line.width(), px(100));
        assert!(lines[0].line.is_end_line);
        assert_eq!(lines[0].y, FixedPoint::ZERO);
        assert_eq!(lines[1].line.words.len(), 1);
        assert!(!lines[1].line.is_end_line);
        assert_eq!(lines[1].y, px(20));
        assert_eq!(lines[1].x, FixedPoint::ZERO);
    }

    #[test]
    fn test_reflow_is_deterministic() {
        let run = TextRun::new("the quick brown fox jumps over the lazy dog");
        let ledger = left_float(0, 30, 40);
        let floats = BandQuery { ledger: &ledger, container_width: px(120) };
        let f = font();

        let first = reflow_text(&run, f.as_ref(), Point::default(), px(16), &floats).unwrap();
        let second = reflow_text(&run, f.as_ref(), Point::default(), px(16), &floats).unwrap();
        assert_eq!(first, second);

        // every word appears exactly once, in order
        let all: Vec<&str> = first.iter().flat_map(|p| words(&p.line)).collect();
        assert_eq!(all, vec!["the", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog"]);
    }

    #[test]
    fn test_overlong_first_word_is_taken() {
        let run = TextRun::new("abcdefghijkl xy");
        let ledger = FloatLedger::new();
        let floats = BandQuery { ledger: &ledger, container_width: px(50) };

        let lines = reflow_text(&run, font().as_ref(), Point::default(), px(10), &floats).unwrap();
        assert_eq!(words(&lines[0].line), vec!["abcdefghijkl"]);
        assert!(lines[0].line.width() > px(50));
        assert_eq!(words(&lines[1].line), vec!["xy"]);
    }

    #[test]
    fn test_continues_after_inline_content() {
        let run = TextRun::new(" bb cccccc");
        let ledger = FloatLedger::new();
        let floats = BandQuery { ledger: &ledger, container_width: px(100) };

        // 60 already used on the line: " bb" fits, "cccccc" moves down
        let start = Point::new(px(60), FixedPoint::ZERO);
        let lines = reflow_text(&run, font().as_ref(), start, px(10), &floats).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].line.leading_space);
        assert_eq!(lines[0].x, px(60));
        assert_eq!(lines[0].line.width(), px(25));
        assert_eq!(words(&lines[1].line), vec!["cccccc"]);
        assert_eq!(lines[1].x, FixedPoint::ZERO);
        assert_eq!(lines[1].y, px(10));
    }

    #[test]
    fn test_word_that_does_not_fit_after_inline_content_wraps() {
        let run = TextRun::new("cccccc");
        let ledger = FloatLedger::new();
        let floats = BandQuery { ledger: &ledger, container_width: px(100) };

        let start = Point::new(px(90), FixedPoint::ZERO);
        let lines = reflow_text(&run, font().as_ref(), start, px(10), &floats).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].x, FixedPoint::ZERO);
        assert_eq!(lines[0].y, px(10));
    }

    #[test]
    fn test_text_flows_beside_float() {
        let run = TextRun::new("aaa aaa");
        let ledger = left_float(0, 50, 100);
        let floats = BandQuery { ledger: &ledger, container_width: px(150) };

        let lines = reflow_text(&run, font().as_ref(), Point::default(), px(20), &floats).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].left, px(50));
        assert_eq!(lines[0].line.width(), px(65));
    }

    #[test]
    fn test_retry_below_float() {
        let run = TextRun::new("aaa");
        let ledger = left_float(0, 90, 20);
        let floats = BandQuery { ledger: &ledger, container_width: px(100) };

        // bands at 0 and 10 only have 10 free; the word moves to y=20
        let lines = reflow_text(&run, font().as_ref(), Point::default(), px(10), &floats).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].y, px(20));
        assert_eq!(lines[0].left, FixedPoint::ZERO);
    }

    #[test]
    fn test_moves_below_tall_float() {
        let run = TextRun::new("aaaaaa");
        let ledger = left_float(0, 100, 2000);
        let floats = BandQuery { ledger: &ledger, container_width: px(150) };

        let lines = reflow_text(&run, font().as_ref(), Point::default(), px(20), &floats).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].y, px(2000));
        assert_eq!(lines[0].left, FixedPoint::ZERO);
        assert_eq!(lines[0].line.width(), px(60));
    }

    #[test]
    fn test_stops_at_nearest_float_bottom() {
        let run = TextRun::new("aaaaaa");
        let mut ledger = left_float(0, 100, 300);
        ledger.add_right(FloatEntry {
            owner: BoxId::new(1),
            top: FixedPoint::ZERO,
            mbp_height: FixedPoint::ZERO,
            mbp_width: FixedPoint::ZERO,
            content_height: px(40),
            content_width: px(20),
        });
        let floats = BandQuery { ledger: &ledger, container_width: px(170) };

        // 50 free beside both floats: too narrow until the right one ends
        let lines = reflow_text(&run, font().as_ref(), Point::default(), px(20), &floats).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].y, px(40));
        assert_eq!(lines[0].left, px(100));
    }

    /// Reports a float everywhere that never ends
    struct EndlessFloat;

    impl FloatQuery for EndlessFloat {
        fn available_width(&self, _: FixedPoint, _: FixedPoint) -> FixedPoint {
            px(10)
        }

        fn left_offset(&self, _: FixedPoint, _: FixedPoint) -> FixedPoint {
            px(90)
        }

        fn has_floats_at(&self, _: FixedPoint, _: FixedPoint) -> bool {
            true
        }

        fn next_float_bottom(&self, _: FixedPoint, _: FixedPoint) -> Option<FixedPoint> {
            None
        }
    }

    #[test]
    fn test_no_float_clearance() {
        let run = TextRun::new("aaa");
        let result = reflow_text(&run, font().as_ref(), Point::default(), px(10), &EndlessFloat);
        assert!(matches!(result, Err(LayoutError::NoFloatClearance(y)) if y == FixedPoint::ZERO));
    }

    #[test]
    fn test_whitespace_only_at_line_start_places_nothing() {
        let run = TextRun::new("\n   ");
        let ledger = FloatLedger::new();
        let floats = BandQuery { ledger: &ledger, container_width: px(100) };

        let lines = reflow_text(&run, font().as_ref(), Point::default(), px(10), &floats).unwrap();
        assert!(lines.is_empty());

        // after other inline content the space is kept
        let start = Point::new(px(20), FixedPoint::ZERO);
        let lines = reflow_text(&run, font().as_ref(), start, px(10), &floats).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line.width(), px(5));
    }
}
