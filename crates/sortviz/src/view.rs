#![forbid(unsafe_code)]

//! Rendering of the bar chart, status lines and key hints.

use sortviz_core::limits::MAX_ARRAY_SIZE;
use sortviz_core::{Snapshot, Status};
use sortviz_runtime::{Color, Frame, Style};

use crate::app::App;
use crate::info;

/// Rows reserved below the chart.
const FOOTER_ROWS: u16 = 6;
/// Smallest frame the chart is drawn into; one column per bar at the largest size.
pub const MIN_WIDTH: u16 = MAX_ARRAY_SIZE as u16 + 2;
pub const MIN_HEIGHT: u16 = 16;

const TITLE: &str = "Insertion Sort Visualizer";
const HINTS: &str =
    "[Space] play/pause  [←/→] step  [Home/End] jump  [r] reset  [n] new  [v] values  [+/-] size  [f/s] speed  [i] info  [q] quit";

/// Bar color for an element status.
#[must_use]
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Unsorted => Color::Grey,
        Status::Sorting => Color::Yellow,
        Status::Comparing => Color::Red,
        Status::Sorted => Color::Green,
    }
}

/// Draw the whole screen for `app`.
pub fn render(app: &App, frame: &mut Frame) {
    if frame.width() < MIN_WIDTH || frame.height() < MIN_HEIGHT {
        let y = frame.height() / 2;
        frame.put_centered(y, "Terminal too small", Style::new().fg(Color::Red).bold());
        return;
    }

    frame.put_centered(0, TITLE, Style::new().bold());

    let playback = app.playback();
    let chart_bottom = frame.height() - FOOTER_ROWS - 1;
    draw_bars(playback.current(), frame, 2, chart_bottom);

    let plain = Style::new();
    let dim = Style::new().fg(Color::DarkGrey);
    let mut y = frame.height() - FOOTER_ROWS;

    let state = if playback.is_running() {
        "Playing"
    } else if playback.is_generated() && playback.position() >= playback.total_steps() {
        "Done"
    } else {
        "Paused"
    };
    let line = format!(
        "Step: {} / {}   Iterations: {}   [{state}]",
        playback.position(),
        playback.total_steps(),
        playback.iterations(),
    );
    frame.put_str(1, y, &line, plain);
    y += 1;

    let line = format!(
        "Speed: {} steps/s ({} ms)   Size: {}",
        playback.steps_per_second(),
        playback.interval().as_millis(),
        app.size_setting(),
    );
    frame.put_str(1, y, &line, plain);
    y += 1;

    let caption = if playback.is_generated() {
        playback.current_step().to_string()
    } else {
        String::from("Press Space to sort")
    };
    frame.put_str(1, y, &caption, Style::new().fg(Color::Cyan));
    y += 1;

    draw_legend(frame, 1, y);
    y += 2;
    frame.put_str(1, y, HINTS, dim);

    if app.show_info() {
        info::render_overlay(frame);
    }
}

fn draw_legend(frame: &mut Frame, x: u16, y: u16) {
    let mut col = x;
    for status in [Status::Unsorted, Status::Sorting, Status::Comparing, Status::Sorted] {
        col = frame.put_str(col, y, "█", Style::new().fg(status_color(status)));
        col = frame.put_str(col + 1, y, status.label(), Style::new());
        col += 3;
    }
}

/// Bars for `snapshot` between rows `top` and `bottom` (inclusive).
///
/// The bottom row holds index labels. A lifted element is drawn one row
/// higher than its resting position.
fn draw_bars(snapshot: &Snapshot, frame: &mut Frame, top: u16, bottom: u16) {
    let n = snapshot.len();
    if n == 0 || bottom <= top + 3 {
        return;
    }
    let usable = usize::from(frame.width() - 2);
    let slot = (usable / n).max(1);
    let bar_width = if slot > 2 { slot - 1 } else { slot };
    let offset = 1 + (usable - (slot * n).min(usable)) / 2;

    // One row for the value label and one for the lift.
    let base = bottom - 1;
    let max_height = i128::from(base - top - 2).max(1);
    let lo = i128::from(snapshot.iter().map(|e| e.value).min().unwrap_or(0).min(0));
    let hi = i128::from(snapshot.max_value().unwrap_or(1));
    let span = (hi - lo).max(1);

    for (i, element) in snapshot.iter().enumerate() {
        let x = offset + i * slot;
        if x + bar_width > usize::from(frame.width()) {
            break;
        }
        let x = x as u16;
        let width = bar_width as u16;
        let height = (1 + (i128::from(element.value) - lo) * (max_height - 1) / span) as u16;
        let raise = u16::from(element.is_lifted());
        let bar_bottom = base - raise;
        let bar_top = bar_bottom + 1 - height;
        let style = Style::new().fg(status_color(element.status));
        frame.fill(x, bar_top, width, height, '█', style);

        let value = element.value.to_string();
        if value.len() <= usize::from(width) {
            let vx = x + (width - value.len() as u16) / 2;
            frame.put_str(vx, bar_top - 1, &value, style.bold());
        }
        let index = i.to_string();
        if index.len() <= usize::from(width) {
            let ix = x + (width - index.len() as u16) / 2;
            frame.put_str(ix, bottom, &index, Style::new().fg(Color::DarkGrey));
        }
    }
}
