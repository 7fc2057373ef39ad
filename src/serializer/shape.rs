use crate::deck::{FillSpec, ImageObject, ImageSizing, LineSpec, ShadowSpec, ShapeObject, SlideObject};
use crate::models::shape::ShapeElement;
use crate::models::shape_properties::{
    Fill, ImageFit, Shadow, ShadowType, ShapeType, Stroke, StrokeStyle,
};
use crate::serializer::image::sizing_name;
use crate::serializer::units::{px_to_inches, px_to_points, transparency, FrameMapper};

pub fn shape_name(shape_type: ShapeType) -> &'static str {
    match shape_type {
        ShapeType::Rect | ShapeType::Custom => "rect",
        ShapeType::RoundRect => "roundRect",
        ShapeType::Ellipse => "ellipse",
        ShapeType::Triangle => "triangle",
    }
}

pub fn dash_type(style: StrokeStyle) -> &'static str {
    match style {
        StrokeStyle::Solid => "solid",
        StrokeStyle::Dashed => "dash",
        StrokeStyle::Dotted => "sysDot",
    }
}

/// Solid color of a fill. Gradients collapse to their first stop; image fills have no color.
pub fn fill_spec(fill: &Fill) -> Option<FillSpec> {
    match fill {
        Fill::Solid { color, opacity } if !color.is_empty() => Some(FillSpec {
            color: Some(color.to_uppercase()),
            path: None,
            transparency: transparency(*opacity),
        }),
        Fill::Gradient { stops, .. } => stops.first().map(|stop| FillSpec {
            color: Some(stop.color.to_uppercase()),
            path: None,
            transparency: None,
        }),
        _ => None,
    }
}

pub fn line_spec(stroke: &Stroke) -> LineSpec {
    LineSpec {
        color: stroke.color.to_uppercase(),
        width: px_to_points(stroke.width),
        dash_type: dash_type(stroke.style).to_string(),
        transparency: transparency(stroke.opacity),
    }
}

/// Offset distance and direction of a shadow, the direction in degrees within `[0, 360)`.
fn shadow_spec(shadow: &Shadow) -> ShadowSpec {
    let (x, y) = (shadow.offset.x, shadow.offset.y);
    let angle = y.atan2(x).to_degrees().rem_euclid(360.0);
    ShadowSpec {
        shadow_type: match shadow.shadow_type {
            ShadowType::Outer => "outer".to_string(),
            ShadowType::Inner => "inner".to_string(),
        },
        color: shadow.color.to_uppercase(),
        blur: px_to_points(shadow.blur),
        offset: px_to_points((x * x + y * y).sqrt()),
        angle,
        opacity: shadow.opacity.unwrap_or(1.0),
    }
}

/// A shape and, for picture fills, the picture placed underneath it.
pub fn serialize_shape(element: &ShapeElement, mapper: &FrameMapper) -> Vec<SlideObject> {
    let base = &element.base;
    let frame = mapper.frame(base.position, base.dimensions);
    let mut objects = Vec::new();

    if let Some(Fill::Image { src, fit }) = &element.fill {
        let (data, path) = if src.starts_with("data:") {
            (Some(src.clone()), None)
        } else {
            (None, Some(src.clone()))
        };
        objects.push(SlideObject::Image(ImageObject {
            frame,
            data,
            path,
            alt_text: None,
            sizing: Some(ImageSizing {
                sizing_type: sizing_name(fit.unwrap_or(ImageFit::Cover)).to_string(),
                w: px_to_inches(base.dimensions.width),
                h: px_to_inches(base.dimensions.height),
            }),
            rotate: None,
            transparency: transparency(base.opacity),
        }));
    }

    let rect_radius = match (element.shape_type, element.border_radius) {
        (ShapeType::RoundRect, Some(radius)) => {
            let min_side = base.dimensions.width.min(base.dimensions.height);
            (min_side > 0.0).then(|| (radius / min_side).min(1.0))
        }
        _ => None,
    };

    objects.push(SlideObject::Shape(ShapeObject {
        shape_type: shape_name(element.shape_type).to_string(),
        frame,
        fill: element.fill.as_ref().and_then(fill_spec),
        line: element.stroke.as_ref().map(line_spec),
        rect_radius,
        shadow: element.shadow.as_ref().map(shadow_spec),
        rotate: base.rotation.filter(|r| *r != 0.0),
        transparency: transparency(base.opacity),
    }));
    objects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Dimensions, Position};
    use crate::models::elements::ElementBase;
    use crate::models::shape_properties::{GradientStop, GradientType, ShadowOffset};
    use crate::serializer::units::Units;

    fn shape(fill: Option<Fill>) -> ShapeElement {
        ShapeElement {
            base: ElementBase {
                id: "shape-1".into(),
                position: Position::new(0.0, 0.0),
                dimensions: Dimensions::new(200.0, 100.0),
                ..Default::default()
            },
            shape_type: ShapeType::RoundRect,
            fill,
            stroke: Some(Stroke {
                color: "00ff00".into(),
                width: 4.0,
                style: StrokeStyle::Dotted,
                opacity: None,
            }),
            border_radius: Some(25.0),
            shadow: Some(Shadow {
                shadow_type: ShadowType::Outer,
                color: "000000".into(),
                blur: 8.0,
                offset: ShadowOffset { x: 0.0, y: -4.0 },
                opacity: Some(0.3),
            }),
        }
    }

    fn mapper() -> FrameMapper {
        FrameMapper::new(Dimensions::new(1000.0, 500.0), Units::Percent)
    }

    #[test]
    fn test_solid_shape() {
        let objects = serialize_shape(
            &shape(Some(Fill::Solid {
                color: "abcdef".into(),
                opacity: Some(0.8),
            })),
            &mapper(),
        );
        assert_eq!(objects.len(), 1);
        let SlideObject::Shape(object) = &objects[0] else {
            panic!("expected a shape");
        };
        assert_eq!(object.shape_type, "roundRect");
        let fill = object.fill.as_ref().unwrap();
        assert_eq!(fill.color.as_deref(), Some("ABCDEF"));
        assert_eq!(fill.transparency, Some(20));
        assert_eq!(object.rect_radius, Some(0.25));
        let line = object.line.as_ref().unwrap();
        assert_eq!(line.dash_type, "sysDot");
        assert_eq!(line.width, 3.0);
        let shadow = object.shadow.as_ref().unwrap();
        assert_eq!(shadow.angle, 270.0);
        assert_eq!(shadow.offset, 3.0);
        assert_eq!(shadow.blur, 6.0);
    }

    #[test]
    fn test_gradient_uses_first_stop() {
        let fill = fill_spec(&Fill::Gradient {
            gradient_type: GradientType::Linear,
            angle: Some(90.0),
            stops: vec![
                GradientStop {
                    color: "112233".into(),
                    position: 0.0,
                },
                GradientStop {
                    color: "445566".into(),
                    position: 1.0,
                },
            ],
        });
        assert_eq!(fill.and_then(|f| f.color).as_deref(), Some("112233"));
    }

    #[test]
    fn test_image_fill_adds_picture_below_shape() {
        let objects = serialize_shape(
            &shape(Some(Fill::Image {
                src: "https://example.com/bg.png".into(),
                fit: None,
            })),
            &mapper(),
        );
        assert_eq!(objects.len(), 2);
        let SlideObject::Image(image) = &objects[0] else {
            panic!("expected the picture first");
        };
        assert_eq!(image.path.as_deref(), Some("https://example.com/bg.png"));
        assert_eq!(image.sizing.as_ref().map(|s| s.sizing_type.as_str()), Some("cover"));
        let SlideObject::Shape(object) = &objects[1] else {
            panic!("expected a shape");
        };
        assert!(object.fill.is_none());
    }
}
