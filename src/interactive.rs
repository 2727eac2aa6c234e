use crate::{
    chart::{self, Chart},
    debounce::Debouncer,
    letters::LetterCounts,
    tui::{Event, Tui},
    words::WordList,
};
use color_eyre::eyre::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Padding, Paragraph, Wrap},
};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct App {
    fields: [TextField; 2],
    focus: Focus,
    words: WordList,
    limit: usize,
    delay: Duration,
    counts: LetterCounts,
    chart: Option<Chart>,
    suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Source,
    Anagram,
}

impl Focus {
    fn index(self) -> usize {
        match self {
            Focus::Source => 0,
            Focus::Anagram => 1,
        }
    }

    fn other(self) -> Self {
        match self {
            Focus::Source => Focus::Anagram,
            Focus::Anagram => Focus::Source,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Draw,
    /// A text changed; redraw and look for new words later.
    Edit,
    Exit,
    Fail(String),
}

impl App {
    pub fn new(words: WordList, limit: usize, delay: Duration) -> Self {
        let mut app = App {
            fields: [TextField::new("Source"), TextField::new("Anagram")],
            focus: Focus::Source,
            words,
            limit,
            delay,
            counts: LetterCounts::default(),
            chart: None,
            suggestions: Vec::new(),
        };
        app.update();
        app
    }

    pub fn with_texts(mut self, source: &str, anagram: &str) -> Self {
        self.fields[Focus::Source.index()].text = source.to_owned();
        self.fields[Focus::Anagram.index()].text = anagram.to_owned();
        if !anagram.is_empty() && source.is_empty() {
            self.focus = Focus::Anagram;
        }
        self.update();
        self
    }

    /// runs the application's main loop until the user quits
    #[tokio::main(flavor = "current_thread")]
    pub async fn run(&mut self) -> Result<()> {
        let tui = &mut Tui::start()?;
        let mut debouncer = Debouncer::new(self.delay, tui.sender());

        debouncer.schedule(Event::Suggest);
        self.draw(tui)?;

        while let Some(evt) = tui.next().await {
            match self.handle_event(evt) {
                Some(Action::Draw) => self.draw(tui)?,
                Some(Action::Edit) => {
                    debouncer.schedule(Event::Suggest);
                    self.draw(tui)?;
                }
                Some(Action::Exit) => break,
                Some(Action::Fail(reason)) => bail!("terminal input failed: {reason}"),
                None => {}
            }
        }

        Ok(())
    }

    fn draw(&self, tui: &mut Tui) -> Result<()> {
        tui.draw(|f| self.render(f.size(), f.buffer_mut()))?;
        Ok(())
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let [_, main, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(82),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [source_area, anagram_area, remaining_area, chart_area, suggest_area, help_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .areas(main);

        let field_areas = [source_area, anagram_area];
        for (i, (field, area)) in self.fields.iter().zip(field_areas).enumerate() {
            field.render(i == self.focus.index(), area, buf);
        }

        let remaining = self.counts.remaining();
        let remaining_line = Line::from(
            remaining
                .chars()
                .chunk_by(char::is_ascii_uppercase)
                .into_iter()
                .map(|(extra, chars)| {
                    let span = Span::raw(chars.collect::<String>());
                    if extra {
                        span.red()
                    } else {
                        span
                    }
                })
                .collect_vec(),
        );
        Paragraph::new(remaining_line)
            .block(titled("Remaining", Some(self.counts.total())))
            .render(remaining_area, buf);

        let chart_block = titled("Letters", None);
        let chart_inner = chart_block.inner(chart_area);
        chart_block.render(chart_area, buf);
        match &self.chart {
            Some(chart) => chart.render(chart_inner, buf),
            None => chart::anagrammed().render(chart_inner, buf),
        }

        Paragraph::new(self.suggestions.join(" "))
            .wrap(Wrap { trim: true })
            .block(titled("Suggestions", None))
            .render(suggest_area, buf);

        Paragraph::new(
            "Tab switch text · Enter take first suggestion · Ctrl-U clear · Esc quit".dark_gray(),
        )
        .alignment(Alignment::Center)
        .render(help_area, buf);
    }

    /// updates the application's state based on user input
    fn handle_event(&mut self, evt: Event) -> Option<Action> {
        match evt {
            Event::Key(key_event) => self.handle_key(key_event),
            Event::Paste(text) => {
                let text = text.replace(['\r', '\n', '\t'], " ");
                self.focused_mut().text.push_str(&text);
                self.edited()
            }
            Event::Resize => Some(Action::Draw),
            Event::Suggest => {
                self.suggest();
                Some(Action::Draw)
            }
            Event::Closed => Some(Action::Exit),
            Event::Error(reason) => Some(Action::Fail(reason)),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Action::Exit),
            KeyCode::Char('c') if control => Some(Action::Exit),
            KeyCode::Char('u') if control => {
                self.focused_mut().text.clear();
                self.edited()
            }
            KeyCode::Char(ch) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.focused_mut().text.push(ch);
                self.edited()
            }
            KeyCode::Backspace => {
                self.focused_mut().text.pop()?;
                self.edited()
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.other();
                Some(Action::Draw)
            }
            KeyCode::Enter => self.take_suggestion(),
            _ => None,
        }
    }

    fn edited(&mut self) -> Option<Action> {
        self.update();
        Some(Action::Edit)
    }

    /// Appends the best suggestion to the anagram text.
    fn take_suggestion(&mut self) -> Option<Action> {
        if self.suggestions.is_empty() {
            return None;
        }
        let word = self.suggestions.remove(0);
        let anagram = &mut self.fields[Focus::Anagram.index()].text;
        if !anagram.is_empty() && !anagram.ends_with(char::is_whitespace) {
            anagram.push(' ');
        }
        anagram.push_str(&word);
        self.suggestions.clear();
        self.edited()
    }

    fn update(&mut self) {
        let [source, anagram] = &self.fields;
        self.counts = LetterCounts::between(&source.text, &anagram.text);
        self.chart = Chart::new(&self.counts);
    }

    fn suggest(&mut self) {
        let start = Instant::now();
        self.suggestions = self
            .words
            .suggest(&self.counts, self.limit)
            .iter()
            .map(ToString::to_string)
            .collect();
        tracing::debug!(
            remaining = %self.counts.remaining(),
            found = self.suggestions.len(),
            elapsed = ?start.elapsed(),
            "suggested words"
        );
    }

    fn focused_mut(&mut self) -> &mut TextField {
        &mut self.fields[self.focus.index()]
    }
}

fn titled(title: &str, count: Option<u32>) -> Block<'_> {
    let mut spans: Vec<Span> = vec!["╢".into(), title.into()];
    if let Some(count) = count {
        spans.push(" ".into());
        spans.push(count.to_string().dark_gray());
    }
    spans.push("╟".into());
    const {
        Block::bordered()
            .border_type(BorderType::Plain)
            .padding(Padding::horizontal(1))
    }
    .title(Line::from(spans))
}

#[derive(Debug, Clone)]
struct TextField {
    title: &'static str,
    text: String,
}

impl TextField {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            text: String::new(),
        }
    }

    fn render(&self, focused: bool, area: Rect, buf: &mut Buffer) {
        let block = self.block(focused);
        // keep the end of the text, where typing happens, in view
        let room = block.inner(area).width.saturating_sub(1) as usize;
        let skip = self.text.chars().count().saturating_sub(room);
        let mut spans = vec![Span::raw(self.text.chars().skip(skip).collect::<String>())];
        if focused {
            spans.push("▏".slow_blink());
        }
        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }

    fn block(&self, focused: bool) -> Block<'static> {
        if focused {
            const {
                Block::bordered()
                    .border_type(BorderType::Thick)
                    .padding(Padding::horizontal(1))
            }
            .title(self.title.bold())
        } else {
            const {
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .padding(Padding::horizontal(1))
            }
            .title(self.title)
        }
    }
}
