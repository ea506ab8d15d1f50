// src/visual/layers/sparkles.rs
//! A single flickering dot per frame.

use super::warm_hue;
use crate::visual::canvas::Canvas;
use crate::visual::color::vivid;
use crate::visual::scene::{FrameInput, Layer};

pub struct SparkleLayer;

impl Layer for SparkleLayer {
    fn name(&self) -> &'static str {
        "sparkles"
    }

    fn draw(&self, canvas: &mut Canvas, frame: &FrameInput) {
        let s = frame.sparkle;
        canvas.fill_ellipse(s.x, s.y, s.size, s.size, vivid(warm_hue(frame.phase.angle)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::canvas::CanvasSize;
    use crate::visual::scene::Sparkle;

    #[test]
    fn test_one_small_dot_where_the_sparkle_is() {
        let mut canvas = Canvas::new(CanvasSize::DEFAULT, 90, 45);
        let frame = FrameInput {
            sparkle: Sparkle {
                x: 300.0,
                y: 120.0,
                size: 3.0,
            },
            ..FrameInput::default()
        };
        SparkleLayer.draw(&mut canvas, &frame);
        assert!(canvas.is_lit(300.0, 120.0));
        assert!(canvas.lit_dots() <= 4);
    }
}
