use crate::deck::{ImageObject, ImageSizing};
use crate::models::image::ImageElement;
use crate::models::shape_properties::ImageFit;
use crate::serializer::units::{px_to_inches, transparency, FrameMapper};

/// Backend sizing mode. Stretching maps to `crop`, which fills the frame exactly.
pub fn sizing_name(fit: ImageFit) -> &'static str {
    match fit {
        ImageFit::Contain => "contain",
        ImageFit::Cover => "cover",
        ImageFit::Stretch => "crop",
    }
}

pub fn serialize_image(element: &ImageElement, mapper: &FrameMapper) -> ImageObject {
    let base = &element.base;
    let (data, path) = if element.is_data_uri() {
        (Some(element.src.clone()), None)
    } else {
        (None, Some(element.src.clone()))
    };
    ImageObject {
        frame: mapper.frame(base.position, base.dimensions),
        data,
        path,
        alt_text: element.alt.clone().filter(|a| !a.is_empty()),
        sizing: element.fit.map(|fit| ImageSizing {
            sizing_type: sizing_name(fit).to_string(),
            w: px_to_inches(base.dimensions.width),
            h: px_to_inches(base.dimensions.height),
        }),
        rotate: base.rotation.filter(|r| *r != 0.0),
        transparency: transparency(base.opacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Dimensions, Position};
    use crate::models::elements::ElementBase;
    use crate::serializer::units::Units;

    #[test]
    fn test_data_uri_and_sizing() {
        let element = ImageElement {
            base: ElementBase {
                id: "image-1".into(),
                position: Position::new(0.0, 0.0),
                dimensions: Dimensions::new(192.0, 96.0),
                ..Default::default()
            },
            src: "data:image/svg+xml;base64,PHN2Zy8+".into(),
            alt: Some("logo".into()),
            fit: Some(ImageFit::Stretch),
        };
        let mapper = FrameMapper::new(Dimensions::new(960.0, 480.0), Units::Inches);
        let object = serialize_image(&element, &mapper);
        assert!(object.data.is_some());
        assert!(object.path.is_none());
        assert_eq!(object.alt_text.as_deref(), Some("logo"));
        let sizing = object.sizing.unwrap();
        assert_eq!(sizing.sizing_type, "crop");
        assert_eq!((sizing.w, sizing.h), (2.0, 1.0));
    }
}
