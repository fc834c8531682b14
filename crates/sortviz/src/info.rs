#![forbid(unsafe_code)]

//! The algorithm reference overlay.

use sortviz_runtime::{Color, Frame, Style};

pub const TITLE: &str = "Insertion Sort";

/// Overlay body, one entry per line.
pub const LINES: &[&str] = &[
    "Builds the sorted array one item at a time, like sorting",
    "playing cards in your hand: take the next card and slide",
    "it left past every larger card.",
    "",
    "Time     best O(n)   average O(n²)   worst O(n²)",
    "Space    O(1), in place",
    "Stable   equal keys keep their input order",
    "Adaptive nearly sorted input needs few shifts",
    "",
    "for i = 1 to n - 1",
    "    key = a[i]; j = i - 1",
    "    while j >= 0 and a[j] > key",
    "        a[j + 1] = a[j]; j = j - 1",
    "    a[j + 1] = key",
    "",
    "[i] or [Esc] to close",
];

/// Draw the overlay box centered in `frame`, clipped if it does not fit.
pub fn render_overlay(frame: &mut Frame) {
    let inner_width = LINES
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(TITLE.len()) as u16;
    let width = (inner_width + 4).min(frame.width());
    let height = (LINES.len() as u16 + 4).min(frame.height());
    let x = (frame.width() - width) / 2;
    let y = (frame.height() - height) / 2;

    let border = Style::new().fg(Color::Cyan);
    frame.fill(x, y, width, height, ' ', Style::new());
    let right = x + width - 1;
    let bottom = y + height - 1;
    for col in x + 1..right {
        frame.set(col, y, '─', border);
        frame.set(col, bottom, '─', border);
    }
    for row in y + 1..bottom {
        frame.set(x, row, '│', border);
        frame.set(right, row, '│', border);
    }
    frame.set(x, y, '┌', border);
    frame.set(right, y, '┐', border);
    frame.set(x, bottom, '└', border);
    frame.set(right, bottom, '┘', border);

    let title = format!(" {TITLE} ");
    let title_width = title.len() as u16;
    if title_width + 2 <= width {
        frame.put_str(x + (width - title_width) / 2, y, &title, border.bold());
    }

    for (i, line) in LINES.iter().enumerate() {
        let row = y + 2 + i as u16;
        if row >= bottom {
            break;
        }
        frame.put_str(x + 2, row, line, Style::new());
    }
}
