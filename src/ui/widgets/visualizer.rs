// src/ui/widgets/visualizer.rs
//! Blits the braille canvas into the terminal buffer, and maps terminal
//! cells back to canvas coordinates.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
    Frame,
};

use crate::visual::{Canvas, CanvasSize};

/// Paint `canvas` into `area` on a black background.
pub fn render_canvas(f: &mut Frame<'_>, area: Rect, canvas: &Canvas) {
    let background = Style::default().bg(Color::Black);
    let buf = f.buffer_mut();
    buf.set_style(area, background);

    let cols = canvas.cols().min(area.width as usize);
    let rows = canvas.rows().min(area.height as usize);
    for row in 0..rows {
        for col in 0..cols {
            let Some(cell) = buf.cell_mut((area.x + col as u16, area.y + row as u16)) else {
                continue;
            };
            match canvas.cell(col, row) {
                Some((glyph, color)) => {
                    cell.set_char(glyph);
                    cell.set_fg(color);
                }
                None => {
                    cell.set_char(' ');
                }
            }
        }
    }

    // Labels go on top, centered on their cell
    for label in canvas.labels() {
        let Some((col, row)) = canvas.cell_at(label.x, label.y) else {
            continue;
        };
        let width = Span::raw(label.text.as_str()).width();
        let col = col.saturating_sub(width / 2);
        if col >= cols || row >= rows {
            continue;
        }
        buf.set_string(
            area.x + col as u16,
            area.y + row as u16,
            &label.text,
            background.fg(label.color),
        );
    }
}

/// Canvas coordinates at the center of terminal cell `(column, row)`, or
/// `None` when the cell is outside `area`.
pub fn cell_to_canvas(area: Rect, size: CanvasSize, column: u16, row: u16) -> Option<(f64, f64)> {
    let inside_x = column >= area.x && column < area.x + area.width;
    let inside_y = row >= area.y && row < area.y + area.height;
    if !inside_x || !inside_y {
        return None;
    }
    let x = (column - area.x) as f64 + 0.5;
    let y = (row - area.y) as f64 + 0.5;
    Some((
        x * size.width / area.width as f64,
        y * size.height / area.height as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_canvas_maps_cell_centers() {
        let area = Rect::new(1, 1, 90, 45);
        assert_eq!(
            cell_to_canvas(area, CanvasSize::DEFAULT, 1, 1),
            Some((5.0, 5.0))
        );
        assert_eq!(
            cell_to_canvas(area, CanvasSize::DEFAULT, 90, 45),
            Some((895.0, 445.0))
        );
    }

    #[test]
    fn test_cell_to_canvas_rejects_outside() {
        let area = Rect::new(1, 1, 90, 45);
        assert_eq!(cell_to_canvas(area, CanvasSize::DEFAULT, 0, 5), None);
        assert_eq!(cell_to_canvas(area, CanvasSize::DEFAULT, 91, 5), None);
        assert_eq!(cell_to_canvas(area, CanvasSize::DEFAULT, 5, 46), None);
    }
}
