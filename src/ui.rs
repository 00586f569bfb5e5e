use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Points},
        Widget,
    },
};

use ringcheck::session::StageView;

const TRACK_RADIUS: f64 = 1.0;
const CANVAS_BOUND: f64 = 1.4;
/// Sampling step for drawing arcs, in degrees.
const ARC_STEP: f64 = 1.5;
/// Angular half-size of the rendered marker.
const MARKER_HALF_WIDTH: f64 = 2.0;

const TRACK_COLOR: Color = Color::DarkGray;
const WINDOW_COLOR: Color = Color::Green;
const MARKER_COLOR: Color = Color::Red;

/// Point on the track for an angle in the wire convention: -90 is the top of
/// the track, increasing angles move clockwise.
fn track_point(angle_deg: f64, radius: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (radius * rad.cos(), -(radius * rad.sin()))
}

fn arc_points(start: f64, width: f64, radius: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity((width / ARC_STEP) as usize + 1);
    let mut offset = 0.0;
    while offset <= width {
        points.push(track_point(start + offset, radius));
        offset += ARC_STEP;
    }
    points
}

/// One frame of the skill check: track circle, hit window arc, marker, and
/// the expected key in the center. Pure display; judgment stays in the
/// session controller.
pub struct SkillCheckWidget<'a> {
    pub view: &'a StageView,
    pub show_key_hint: bool,
}

impl Widget for SkillCheckWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let window = arc_points(self.view.window_start, self.view.window_width, TRACK_RADIUS);
        let marker: Vec<(f64, f64)> = arc_points(
            self.view.position - MARKER_HALF_WIDTH,
            MARKER_HALF_WIDTH * 2.0,
            TRACK_RADIUS,
        )
        .into_iter()
        .chain(arc_points(
            self.view.position - MARKER_HALF_WIDTH,
            MARKER_HALF_WIDTH * 2.0,
            TRACK_RADIUS * 0.96,
        ))
        .collect();
        let key_hint = self.view.key_hint.to_uppercase();

        let canvas = Canvas::default()
            .marker(symbols::Marker::Braille)
            .x_bounds([-CANVAS_BOUND, CANVAS_BOUND])
            .y_bounds([-CANVAS_BOUND, CANVAS_BOUND])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: TRACK_RADIUS,
                    color: TRACK_COLOR,
                });
                ctx.draw(&Points {
                    coords: &window,
                    color: WINDOW_COLOR,
                });
                ctx.draw(&Points {
                    coords: &marker,
                    color: MARKER_COLOR,
                });
                if self.show_key_hint {
                    ctx.print(
                        0.0,
                        0.0,
                        Line::styled(
                            key_hint.clone(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            });

        canvas.render(area, buf);
    }
}
