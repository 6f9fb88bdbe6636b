/*! Live chart of the reading history.

The chart spans the sample index on the x axis, `[0, len]`, and the temperature on the y axis with a margin of [`Y_MARGIN`] degrees on either side of the observed range.
An empty history shows the band `[0, 50]` plus margins.
 */

use std::fmt;
use std::fmt::Display;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Polyline, PrimitiveStyle},
    text::{Baseline, Text},
};

use crate::history::History;
use crate::Result;

/// Degrees added above and below the observed temperature range.
pub const Y_MARGIN: f64 = 5.0;

const EMPTY_MIN: f64 = 0.0;
const EMPTY_MAX: f64 = 50.0;

/// Visible ranges of the chart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axes {
    /// Sample index range.
    pub x: (f64, f64),
    /// Temperature range in degrees Celsius.
    pub y: (f64, f64),
}

impl Axes {
    /// Axes fitted to the contents of `history`.
    pub fn fit(history: &History) -> Axes {
        let lo = history.min().unwrap_or(EMPTY_MIN);
        let hi = history.max().unwrap_or(EMPTY_MAX);

        Axes {
            x: (0.0, history.len() as f64),
            y: (lo - Y_MARGIN, hi + Y_MARGIN),
        }
    }

    /// Position of a reading on a target of the given size.
    pub fn to_point(&self, size: Size, index: usize, temperature: f64) -> Point {
        let right = size.width.saturating_sub(1) as f64;
        let bottom = size.height.saturating_sub(1) as f64;

        let x_span = self.x.1 - self.x.0;
        let x = if x_span > 0.0 {
            (index as f64 - self.x.0) / x_span * right
        } else {
            0.0
        };

        let y_span = self.y.1 - self.y.0;
        let y = if y_span > 0.0 {
            bottom - (temperature - self.y.0) / y_span * bottom
        } else {
            bottom / 2.0
        };

        Point::new(x.round() as i32, y.round() as i32)
    }
}

impl Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x [{:.0}, {:.0}] y [{:.2}, {:.2}]", self.x.0, self.x.1, self.y.0, self.y.1)
    }
}

/// Draw the history as a line chart with the latest reading in the top-left corner.
pub fn draw_chart<D>(target: &mut D, history: &History) -> std::result::Result<Axes, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let axes = Axes::fit(history);
    let size = target.bounding_box().size;

    target.clear(BinaryColor::Off)?;

    let points: Vec<Point> = history.temperatures()
        .enumerate()
        .map(|(i, t)| axes.to_point(size, i, t))
        .collect();
    let line_style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    match points.len() {
        0 => (),
        1 => Pixel(points[0], BinaryColor::On).draw(target)?,
        _ => Polyline::new(&points).into_styled(line_style).draw(target)?,
    }

    if let Some((_when, latest)) = history.latest() {
        let label = format!("{:.1}C", latest);
        let text_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(&label, Point::zero(), text_style, Baseline::Top)
            .draw(target)?;
    }

    Ok(axes)
}

/// Destination for the live chart.
pub trait Renderer {
    /// Redraw the chart from the current history.
    fn update_plot(&mut self, history: &History) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn update_plot(&mut self, history: &History) -> Result<()> {
        (**self).update_plot(history)
    }
}

/// Renderer for machines without a panel; logs the chart axes.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl LogRenderer {
    /// Create a new `LogRenderer`.
    pub fn new() -> LogRenderer {
        LogRenderer
    }
}

impl Renderer for LogRenderer {
    fn update_plot(&mut self, history: &History) -> Result<()> {
        log::debug!("chart: {} readings, {}", history.len(), Axes::fit(history));
        Ok(())
    }
}
