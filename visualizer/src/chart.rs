use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, LineDash, Path, Stroke, Text},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};
use lifecore::{EventSeries, Point as SeriesPoint};

const MARGIN_LEFT: f32 = 48.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 12.0;
const MARGIN_BOTTOM: f32 = 32.0;
const GRID_LINES: usize = 5;

const PLOT_BLUE: Color = rgb(0.0, 0.0, 1.0);
const GRID_BLUE: Color = rgb(0.68, 0.85, 0.9);
const BACKGROUND: Color = rgb(0.83, 0.83, 0.83);

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

/// Maps series coordinates into the plot area of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub area: Rectangle,
}

impl Viewport {
    /// Autoscales to the points with a 5% margin; flat or empty data gets a
    /// unit-wide window so nothing divides by zero.
    pub fn fit(series: &EventSeries, bounds: Size) -> Self {
        let (x_min, x_max) = padded(series.index_range());
        let (y_min, y_max) = padded(series.value_range());
        let area = Rectangle {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: (bounds.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (bounds.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        };
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            area,
        }
    }

    pub fn project(&self, point: &SeriesPoint) -> Point {
        let fx = (point.index - self.x_min) / (self.x_max - self.x_min);
        let fy = (point.value - self.y_min) / (self.y_max - self.y_min);
        Point::new(
            self.area.x + fx as f32 * self.area.width,
            self.area.y + self.area.height - fy as f32 * self.area.height,
        )
    }
}

fn padded(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}

/// Line chart of the running value, one marker per point.
#[derive(Clone, Default)]
pub struct LifeChart {
    series: EventSeries,
}

impl LifeChart {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self {
            series: EventSeries::from_points(points),
        }
    }
}

impl<Message> canvas::Program<Message> for LifeChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let view = Viewport::fit(&self.series, bounds.size());
        let area = view.area;

        for step in 0..=GRID_LINES {
            let fraction = step as f32 / GRID_LINES as f32;
            let y = area.y + area.height * (1.0 - fraction);
            let grid = Path::line(Point::new(area.x, y), Point::new(area.x + area.width, y));
            frame.stroke(
                &grid,
                Stroke {
                    line_dash: LineDash {
                        segments: &[4.0, 4.0],
                        offset: 0,
                    },
                    ..Stroke::default().with_color(GRID_BLUE).with_width(1.0)
                },
            );

            let value = view.y_min + (view.y_max - view.y_min) * fraction as f64;
            frame.fill_text(Text {
                content: format!("{value:.2}"),
                position: Point::new(4.0, y - 6.0),
                color: PLOT_BLUE,
                size: Pixels(11.0),
                ..Text::default()
            });
        }

        let spines = Path::rectangle(Point::new(area.x, area.y), area.size());
        frame.stroke(
            &spines,
            Stroke::default().with_color(PLOT_BLUE).with_width(1.5),
        );

        frame.fill_text(Text {
            content: "Time".into(),
            position: Point::new(area.x + area.width / 2.0, bounds.height - 18.0),
            color: PLOT_BLUE,
            size: Pixels(13.0),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: "Life Event Value".into(),
            position: Point::new(area.x + 6.0, area.y + 2.0),
            color: PLOT_BLUE,
            size: Pixels(13.0),
            ..Text::default()
        });

        let points = self.series.snapshot();
        if !points.is_empty() {
            let line = Path::new(|builder| {
                for (i, point) in points.iter().enumerate() {
                    let projected = view.project(point);
                    if i == 0 {
                        builder.move_to(projected);
                    } else {
                        builder.line_to(projected);
                    }
                }
            });
            frame.stroke(&line, Stroke::default().with_width(2.0).with_color(PLOT_BLUE));

            for point in points {
                let marker = Path::circle(view.project(point), 3.0);
                frame.fill(&marker, PLOT_BLUE);
            }
        }

        vec![frame.into_geometry()]
    }
}
