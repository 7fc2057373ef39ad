use crate::deck::{Frame, LineObject, Measure};
use crate::models::line::LineElement;
use crate::serializer::shape::line_spec;
use crate::serializer::units::FrameMapper;

/// Fraction of the slide used as the extent of a perfectly horizontal or vertical line.
const MIN_EXTENT_FRACTION: f64 = 0.001;

/// Origin and extent spanned by two coordinates, with a zero extent widened to `min`.
fn span(a: Measure, b: Measure, min: Measure) -> (Measure, Measure) {
    let origin = a.value().min(b.value());
    let extent = (b.value() - a.value()).abs();
    let extent = if extent > 0.0 { extent } else { min.value() };
    (a.with_value(origin), a.with_value(extent))
}

/// A line is a box between its end points; flips restore the direction.
pub fn serialize_line(element: &LineElement, mapper: &FrameMapper) -> LineObject {
    let (start, end) = (element.start, element.end);
    let min_w = mapper.x(mapper.viewport.width * MIN_EXTENT_FRACTION);
    let min_h = mapper.y(mapper.viewport.height * MIN_EXTENT_FRACTION);
    let (x, w) = span(mapper.x(start.left), mapper.x(end.left), min_w);
    let (y, h) = span(mapper.y(start.top), mapper.y(end.top), min_h);

    LineObject {
        frame: Frame { x, y, w, h },
        line: line_spec(&element.stroke),
        flip_h: end.left < start.left,
        flip_v: end.top < start.top,
        rotate: element.rotation.filter(|r| *r != 0.0),
    }
}
