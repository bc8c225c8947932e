use std::collections::VecDeque;

use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use mood_engine::{DisplayList, FrameMetrics, Paint, Primitive};

/// Ellipses smaller than this (in canvas units) are drawn as a single dot.
const MIN_CIRCLE_RADIUS: f64 = 3.0;

pub struct UiState {
    pub label: String,
    /// Archetype blurb shown in the header title, when known.
    pub description: Option<String>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub metrics: FrameMetrics,
    pub logs: VecDeque<String>,
    pub max_logs: usize,
}

impl UiState {
    pub fn new(label: String, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            label,
            description: None,
            canvas_width: canvas_width as f64,
            canvas_height: canvas_height as f64,
            metrics: FrameMetrics::default(),
            logs: VecDeque::new(),
            max_logs: 5,
        }
    }

    pub fn observe(&mut self, metrics: &FrameMetrics) {
        self.metrics.clone_from(metrics);
    }

    pub fn header_title(&self) -> String {
        match &self.description {
            Some(description) => format!("Mood Stone: {description}"),
            None => "Mood Stone".to_owned(),
        }
    }

    pub fn push_log<S: Into<String>>(&mut self, line: S) {
        let mut text: String = line.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        if text.is_empty() {
            return;
        }
        self.logs.push_front(text);
        while self.logs.len() > self.max_logs {
            self.logs.pop_back();
        }
    }
}

pub fn draw_ui(frame: &mut Frame, state: &UiState, display: &DisplayList) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], state);
    draw_stone(frame, chunks[1], state, display);
    draw_logs(frame, chunks[2], state);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(state.header_title());
    let line = Line::from(vec![
        Span::styled(state.label.as_str(), Style::default().fg(Color::Cyan)),
        Span::raw(" | frame "),
        Span::styled(
            format!("{:>6}", state.metrics.frame),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" | primitives "),
        Span::styled(
            format!("{:>4}", state.metrics.primitives),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw(" | respawns "),
        Span::raw(format!("{:>3}", state.metrics.respawns)),
        Span::raw(" | q or Esc to exit"),
    ]);
    let text = Paragraph::new(line).wrap(Wrap { trim: true });
    frame.render_widget(block, area);
    frame.render_widget(
        text,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_stone(frame: &mut Frame, area: Rect, state: &UiState, display: &DisplayList) {
    let width = state.canvas_width;
    let height = state.canvas_height;
    let units_per_column = width / area.width.saturating_sub(2).max(1) as f64;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .background_color(Color::Black)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            let mut current = None;
            for (tag, primitive) in display.iter() {
                if current.is_some_and(|previous| previous != tag) {
                    ctx.layer();
                }
                current = Some(tag);
                paint_primitive(ctx, primitive, height, units_per_column);
            }
        });
    frame.render_widget(canvas, area);
}

/// Screen coordinates grow downward; the canvas grows upward.
fn paint_primitive(ctx: &mut Context, primitive: &Primitive, height: f64, units_per_column: f64) {
    match primitive {
        Primitive::Polyline { points, paint, .. } => {
            let color = paint_color(paint);
            for pair in points.windows(2) {
                ctx.draw(&CanvasLine::new(
                    pair[0].x as f64,
                    height - pair[0].y as f64,
                    pair[1].x as f64,
                    height - pair[1].y as f64,
                    color,
                ));
            }
        }
        Primitive::Ellipse {
            center,
            radii,
            paint,
        } => {
            let x = center.x as f64;
            let y = height - center.y as f64;
            let radius = ((radii.x + radii.y) / 2.0) as f64;
            let color = paint_color(paint);
            if radius < MIN_CIRCLE_RADIUS {
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
            } else {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius,
                    color,
                });
            }
        }
        Primitive::Text {
            position,
            text,
            paint,
            font,
        } => {
            let mut style = Style::default().fg(paint_color(paint));
            if font.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            // Centered on the anchor like the engine's text placement.
            let half_width = text.chars().count() as f64 * units_per_column / 2.0;
            ctx.print(
                position.x as f64 - half_width,
                height - position.y as f64,
                Span::styled(text.clone(), style),
            );
        }
    }
}

pub fn paint_color(paint: &Paint) -> Color {
    match paint {
        Paint::Rgb(rgb) => Color::Rgb(rgb.r, rgb.g, rgb.b),
        Paint::Raw(raw) => raw.parse::<Color>().unwrap_or(Color::White),
    }
}

fn draw_logs(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let lines: Vec<Line> = state
        .logs
        .iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}
