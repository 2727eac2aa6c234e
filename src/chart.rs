use crate::{
    letters::{Letter, LetterCounts},
    scoring::FREQUENCIES,
};
use ratatui::{prelude::*, widgets::Paragraph};

/// Rows a bar occupies when its letter appears exactly as often as English
/// text would predict.
const UNIT_ROWS: f64 = 4.0;

const COLUMN_WIDTH: u16 = 3;

const EIGHTHS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Letter is balanced.
    Empty,
    /// Letter is used by the anagram but missing from the source.
    Extra,
    /// Fewer letters left than the letter's frequency would suggest.
    Scarce,
    Plenty,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Empty => Color::DarkGray,
            Tone::Extra => Color::Red,
            Tone::Scarce => Color::Yellow,
            Tone::Plenty => Color::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub letter: Letter,
    /// Number of stacked segments.
    pub segments: u32,
    /// Height of one segment, in units of the expected frequency.
    pub increment: f64,
    pub tone: Tone,
}

impl Bar {
    fn new(letter: Letter, count: i32, total: u32) -> Self {
        let expected = FREQUENCIES[letter] * f64::from(total);
        let increment = 1.0 / expected;
        let tone = if count < 0 {
            Tone::Extra
        } else if count == 0 {
            Tone::Empty
        } else if increment * f64::from(count) < 0.5 {
            Tone::Scarce
        } else {
            Tone::Plenty
        };
        Self {
            letter,
            segments: count.unsigned_abs(),
            increment,
            tone,
        }
    }

    /// Total height, in units of the expected frequency.
    pub fn height(&self) -> f64 {
        self.increment * f64::from(self.segments)
    }
}

/// Per-letter bars comparing the residual against English letter frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    bars: Vec<Bar>,
}

impl Chart {
    /// `None` once the texts are anagrams of each other.
    pub fn new(counts: &LetterCounts) -> Option<Self> {
        let total = counts.total();
        if total == 0 {
            return None;
        }
        let bars = Letter::all()
            .map(|letter| Bar::new(letter, counts.get(letter), total))
            .collect();
        Some(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }
}

impl Widget for &Chart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < 26 {
            return;
        }
        let column_width = (area.width / 26).clamp(1, COLUMN_WIDTH);
        let baseline = area.bottom() - 2;
        let plot_rows = area.height - 1;

        let guide = f64::from(baseline) + 1.0 - UNIT_ROWS;
        if guide >= f64::from(area.top()) {
            let y = guide as u16;
            for x in area.left()..area.left() + column_width * 26 {
                buf.get_mut(x, y).set_symbol("┈").set_fg(Color::DarkGray);
            }
        }

        for (i, bar) in self.bars().iter().enumerate() {
            let left = area.left() + i as u16 * column_width;
            render_bar(bar, left, column_width, baseline, plot_rows, buf);
            buf.get_mut(left + column_width / 2, area.bottom() - 1)
                .set_symbol(&bar.letter.to_string())
                .set_fg(bar.tone.color());
        }
    }
}

fn render_bar(bar: &Bar, left: u16, width: u16, baseline: u16, rows: u16, buf: &mut Buffer) {
    // extra letters get a one-cell bar shifted right of where others stand
    let (left, width) = match bar.tone {
        Tone::Extra if width >= 2 => (left + 1, 1),
        _ if width >= 2 => (left, width - 1),
        _ => (left, width),
    };
    let segment_rows = bar.increment * UNIT_ROWS;
    let height = bar.height() * UNIT_ROWS;
    let style = Style::new().fg(bar.tone.color());

    for row in 0..rows {
        let fill = (height - f64::from(row)).clamp(0.0, 1.0);
        if fill <= 0.0 {
            break;
        }
        let mut symbol = EIGHTHS[(fill * 8.0).round() as usize];
        if fill >= 1.0 && segment_rows >= 2.0 && is_segment_top(row, segment_rows, bar.segments) {
            symbol = EIGHTHS[7];
        }
        let y = baseline - row;
        for x in left..left + width {
            buf.get_mut(x, y).set_symbol(symbol).set_style(style);
        }
    }
}

/// Whether a segment boundary falls inside `row`.
fn is_segment_top(row: u16, segment_rows: f64, segments: u32) -> bool {
    let k = ((f64::from(row) + 1.0) / segment_rows).floor();
    k >= 1.0 && k <= f64::from(segments) && k * segment_rows > f64::from(row)
}

/// Shown instead of the chart once the texts are anagrams of each other.
pub fn anagrammed() -> Paragraph<'static> {
    Paragraph::new("Anagrammed!".green().bold())
}
