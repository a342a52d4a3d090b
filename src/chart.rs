//! Bar charts drawn with turtle graphics.
//!
//! The chart is scaled into a square of `CANVAS_SIZE` x `CANVAS_SIZE` units in
//! screen coordinates (y grows downwards). The turtle heading is measured in
//! degrees clockwise from "up".

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

pub const CANVAS_SIZE: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

pub trait Turtle {
    /// Moves to an absolute position without drawing.
    fn goto(&mut self, x: f64, y: f64);
    fn forward(&mut self, distance: f64);
    fn backward(&mut self, distance: f64) {
        self.forward(-distance);
    }
    /// Turns counterclockwise.
    fn left(&mut self, degrees: f64);
    fn right(&mut self, degrees: f64) {
        self.left(-degrees);
    }
    fn pen_up(&mut self);
    fn pen_down(&mut self);
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("cannot draw a chart without values")]
    Empty,
    #[error("cannot scale a chart whose values are all zero")]
    ZeroScale,
}

fn stripe_color(k: usize) -> Color {
    match k % 3 {
        0 => Color::RED,
        1 => Color::GREEN,
        _ => Color::BLUE,
    }
}

/// Draws one stripe per value. Negative values are drawn below the x axis,
/// which is moved up accordingly.
pub fn draw_bar_chart(values: &[f64], turtle: &mut impl Turtle) -> Result<(), ChartError> {
    if values.is_empty() {
        return Err(ChartError::Empty);
    }
    let x_size = CANVAS_SIZE;
    let y_size = CANVAS_SIZE;

    let val_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let val_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut y_scale = val_max / (y_size - 1.0);
    let mut y_axis = y_size - 1.0; // Distance of the x axis from the top
    if val_min < 0.0 {
        if val_max > 0.0 {
            y_axis = val_max * y_size / (val_max - val_min);
            y_scale = (val_max - val_min) / (y_size - 1.0);
        } else {
            y_axis = 1.0;
            y_scale = -val_min / (y_size - 1.0);
        }
    }
    if y_scale == 0.0 {
        return Err(ChartError::ZeroScale);
    }

    // Coordinate axes
    turtle.goto(1.0, y_size - 1.0);
    let saved = turtle.color();
    turtle.set_color(Color::BLACK);
    turtle.pen_down();
    turtle.forward(y_size - 1.0);
    turtle.pen_up();
    turtle.backward(y_axis);
    turtle.right(90.0);
    turtle.pen_down();
    turtle.forward(x_size - 1.0);
    turtle.pen_up();
    turtle.backward(x_size - 1.0);
    turtle.set_color(saved);

    let stripe_width = x_size / values.len() as f64;
    for (k, value) in values.iter().enumerate() {
        let stripe_height = value / y_scale;
        turtle.set_color(stripe_color(k));
        turtle.forward(1.0);
        turtle.left(90.0);
        turtle.pen_down();
        turtle.forward(stripe_height);
        turtle.right(90.0);
        turtle.forward(stripe_width - 1.0);
        turtle.right(90.0);
        turtle.forward(stripe_height);
        turtle.left(90.0);
        turtle.pen_up();
    }
    turtle.set_color(saved);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Color,
}

/// A turtle that keeps the drawn line segments and can render them as SVG.
#[derive(Debug, Clone)]
pub struct SvgTurtle {
    x: f64,
    y: f64,
    heading: f64,
    pen_is_down: bool,
    color: Color,
    segments: Vec<Segment>,
}

impl Default for SvgTurtle {
    fn default() -> Self {
        SvgTurtle {
            x: CANVAS_SIZE / 2.0,
            y: CANVAS_SIZE / 2.0,
            heading: 0.0,
            pen_is_down: true,
            color: Color::BLACK,
            segments: Vec::new(),
        }
    }
}

impl SvgTurtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">",
            CANVAS_SIZE
        );
        for s in &self.segments {
            let _ = writeln!(
                svg,
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"rgb({},{},{})\"/>",
                s.from.0, s.from.1, s.to.0, s.to.1, s.color.r, s.color.g, s.color.b
            );
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_svg())
    }
}

impl Turtle for SvgTurtle {
    fn goto(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn forward(&mut self, distance: f64) {
        let radians = self.heading.to_radians();
        let to = (self.x + distance * radians.sin(), self.y - distance * radians.cos());
        if self.pen_is_down && distance != 0.0 {
            self.segments.push(Segment {
                from: (self.x, self.y),
                to,
                color: self.color,
            });
        }
        self.x = to.0;
        self.y = to.1;
    }

    fn left(&mut self, degrees: f64) {
        self.heading = (self.heading - degrees).rem_euclid(360.0);
    }

    fn pen_up(&mut self) {
        self.pen_is_down = false;
    }

    fn pen_down(&mut self) {
        self.pen_is_down = true;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6
    }

    #[test]
    fn test_turtle_moves() {
        let mut t = SvgTurtle::new();
        t.goto(10.0, 10.0);
        t.forward(5.0); // Heading up
        assert!(close(t.position(), (10.0, 5.0)));
        t.right(90.0);
        t.forward(3.0);
        assert!(close(t.position(), (13.0, 5.0)));
        t.pen_up();
        t.backward(3.0);
        assert!(close(t.position(), (10.0, 5.0)));
        assert_eq!(t.segments().len(), 2);
        assert_eq!(t.heading(), 90.0);
    }

    #[test]
    fn test_bar_chart_positive() {
        let mut t = SvgTurtle::new();
        draw_bar_chart(&[2.0, 4.0], &mut t).unwrap();
        // Two axes plus three lines per stripe
        assert_eq!(t.segments().len(), 2 + 2 * 3);

        let y_axis = t.segments()[0];
        assert!(close(y_axis.from, (1.0, 499.0)));
        assert!(close(y_axis.to, (1.0, 0.0)));
        assert_eq!(y_axis.color, Color::BLACK);

        // The tallest stripe reaches the top of the canvas
        let second_stripe_up = t.segments()[5];
        assert_eq!(second_stripe_up.color, Color::GREEN);
        assert!((second_stripe_up.to.1 - 0.0).abs() < 1e-6);
        // The turtle ends on the x axis at the right end
        assert!(close(t.position(), (501.0, 499.0)));
    }

    #[test]
    fn test_bar_chart_mixed_signs() {
        let mut t = SvgTurtle::new();
        draw_bar_chart(&[3.0, -1.0], &mut t).unwrap();
        let x_axis = t.segments()[1];
        // The x axis sits at 3/4 of the height from the top
        assert!((x_axis.from.1 - 375.0).abs() < 1e-6);
        // The negative stripe goes down to the bottom edge
        let down = t.segments()[5];
        assert_eq!(down.color, Color::GREEN);
        assert!(down.to.1 > 499.0);
    }

    #[test]
    fn test_bar_chart_errors() {
        let mut t = SvgTurtle::new();
        assert_eq!(draw_bar_chart(&[], &mut t), Err(ChartError::Empty));
        assert_eq!(draw_bar_chart(&[0.0, 0.0], &mut t), Err(ChartError::ZeroScale));
        assert!(t.segments().is_empty());
    }

    #[test]
    fn test_svg_output() {
        let mut t = SvgTurtle::new();
        draw_bar_chart(&[1.0], &mut t).unwrap();
        let svg = t.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("stroke=\"rgb(255,0,0)\""));
        assert_eq!(svg.matches("<line").count(), 5);
    }
}
