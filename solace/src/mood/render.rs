use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use super::blob::{BlobSimulation, Vec2};
use super::palette::{MoodKey, Rgb};
use crate::error::Result;

pub const CANVAS_SIZE: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgb,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialGradient {
    pub center: [f64; 2],
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

/// One cubic Bézier segment ending at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicSegment {
    pub control1: [f64; 2],
    pub control2: [f64; 2],
    pub to: [f64; 2],
}

/// A drawable snapshot of the blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobFrame {
    pub frame: u64,
    pub mood: MoodKey,
    pub start: [f64; 2],
    pub segments: Vec<CubicSegment>,
    pub fill: RadialGradient,
    pub highlight: RadialGradient,
}

impl BlobSimulation {
    pub fn frame(&self) -> BlobFrame {
        self.frame_numbered(0)
    }

    pub(crate) fn frame_numbered(&self, frame: u64) -> BlobFrame {
        let positions: Vec<Vec2> = self.points().iter().map(|p| p.position).collect();
        let centroid = self.centroid();
        let radius = self.params().radius;
        let (from, to) = self.mood().sample().gradient;

        BlobFrame {
            frame,
            mood: self.mood(),
            start: xy(positions[0]),
            segments: closed_catmull_rom(&positions),
            fill: RadialGradient {
                center: xy(centroid),
                radius: radius * 1.2,
                stops: vec![
                    GradientStop { offset: 0.0, color: from, opacity: 1.0 },
                    GradientStop { offset: 1.0, color: to, opacity: 1.0 },
                ],
            },
            highlight: RadialGradient {
                center: xy(centroid + Vec2::new(-radius * 0.3, -radius * 0.3)),
                radius: radius * 0.6,
                stops: vec![
                    GradientStop { offset: 0.0, color: Rgb::WHITE, opacity: 0.45 },
                    GradientStop { offset: 1.0, color: Rgb::WHITE, opacity: 0.0 },
                ],
            },
        }
    }
}

/// Closed Catmull-Rom spline through `points`, as cubic Bézier segments.
fn closed_catmull_rom(points: &[Vec2]) -> Vec<CubicSegment> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let p0 = points[(i + n - 1) % n];
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            let p3 = points[(i + 2) % n];

            CubicSegment {
                control1: xy(p1 + (p2 - p0) * (1.0 / 6.0)),
                control2: xy(p2 - (p3 - p1) * (1.0 / 6.0)),
                to: xy(p2),
            }
        })
        .collect()
}

fn xy(v: Vec2) -> [f64; 2] {
    [v.x, v.y]
}

impl BlobFrame {
    pub fn path_data(&self) -> String {
        let mut d = format!("M{:.2},{:.2}", self.start[0], self.start[1]);
        for seg in &self.segments {
            let _ = write!(
                d,
                " C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                seg.control1[0], seg.control1[1], seg.control2[0], seg.control2[1], seg.to[0], seg.to[1]
            );
        }
        d.push_str(" Z");
        d
    }

    pub fn to_svg(&self) -> String {
        let path = self.path_data();
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            size = CANVAS_SIZE
        );
        svg.push_str("  <defs>\n");
        write_gradient(&mut svg, "blob-fill", &self.fill);
        write_gradient(&mut svg, "blob-highlight", &self.highlight);
        svg.push_str("  </defs>\n");
        let _ = writeln!(svg, r#"  <path d="{path}" fill="url(#blob-fill)"/>"#);
        let _ = writeln!(svg, r#"  <path d="{path}" fill="url(#blob-highlight)"/>"#);
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }
}

fn write_gradient(out: &mut String, id: &str, gradient: &RadialGradient) {
    let _ = writeln!(
        out,
        r#"    <radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{:.2}" cy="{:.2}" r="{:.2}">"#,
        gradient.center[0], gradient.center[1], gradient.radius
    );
    for stop in &gradient.stops {
        let _ = writeln!(
            out,
            r#"      <stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
            stop.offset, stop.color, stop.opacity
        );
    }
    out.push_str("    </radialGradient>\n");
}
