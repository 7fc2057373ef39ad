use crate::constants::{BOLD_WEIGHT_THRESHOLD, DEFAULT_BULLET_INDENT, FONT_WEIGHT_SUFFIXES};
use crate::deck::{BulletSpec, TextObject, TextRunSpec, TextStyle};
use crate::models::bullet::{Bullet, BulletKind};
use crate::models::common::Padding;
use crate::models::properties::{TextAlign, Typography, VerticalAlign};
use crate::models::text_element::TextElement;
use crate::serializer::units::{px_to_points, transparency, FrameMapper};

/// Primary face of `family`, suffixed with the weight name when the weight has one.
/// Weight 400 (and any unlisted weight) keeps the bare face.
pub fn font_face(family: &str, weight: Option<&str>) -> String {
    let base = family.split(',').next().unwrap_or_default().trim();
    let Some(weight) = weight.and_then(|w| w.trim().parse::<u32>().ok()) else {
        return base.to_string();
    };
    match FONT_WEIGHT_SUFFIXES.iter().find(|(w, _)| *w == weight) {
        Some((_, suffix)) => format!("{base} {suffix}"),
        None => base.to_string(),
    }
}

pub fn align_name(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
        TextAlign::Justify => "justify",
    }
}

pub fn valign_name(align: VerticalAlign) -> &'static str {
    match align {
        VerticalAlign::Top => "top",
        VerticalAlign::Middle => "middle",
        VerticalAlign::Bottom => "bottom",
    }
}

/// Character formatting of a fully resolved typography.
pub fn text_style(typography: &Typography) -> TextStyle {
    TextStyle {
        font_face: typography
            .font_family
            .as_deref()
            .map(|family| font_face(family, typography.font_weight.as_deref())),
        font_size: typography.font_size.map(px_to_points),
        color: typography.color.as_ref().map(|c| c.to_uppercase()),
        bold: typography.weight() > BOLD_WEIGHT_THRESHOLD,
        italic: typography.font_style.is_some_and(|s| s.is_slanted()),
        underline: typography.underline.unwrap_or(false),
        strike: typography.strikethrough.unwrap_or(false),
        char_spacing: typography.letter_spacing.filter(|s| *s != 0.0),
    }
}

/// Points, in the backend's left/right/top/bottom order.
pub fn margin(padding: &Padding) -> [f64; 4] {
    [
        px_to_points(padding.left),
        px_to_points(padding.right),
        px_to_points(padding.top),
        px_to_points(padding.bottom),
    ]
}

fn bullet_spec(bullet: &Bullet) -> BulletSpec {
    BulletSpec {
        bullet_type: match bullet.kind {
            BulletKind::Bullet => "bullet".to_string(),
            BulletKind::Number => "number".to_string(),
        },
        indent: bullet.indent.unwrap_or(DEFAULT_BULLET_INDENT),
        start_at: match bullet.kind {
            BulletKind::Number => bullet.number_start_at,
            BulletKind::Bullet => None,
        },
    }
}

pub fn serialize_text(element: &TextElement, mapper: &FrameMapper) -> TextObject {
    let block = &element.typography;
    let runs = element
        .runs
        .flatten()
        .into_iter()
        .map(|run| TextRunSpec {
            style: text_style(&run.typography.merged_over(block)),
            text: run.text,
            hyperlink: run.href,
            break_line: run.line_break,
        })
        .collect();

    TextObject {
        frame: mapper.frame(element.base.position, element.base.dimensions),
        runs,
        style: text_style(block),
        align: align_name(block.text_align.unwrap_or(TextAlign::Left)).to_string(),
        valign: valign_name(block.vertical_align.unwrap_or(VerticalAlign::Top)).to_string(),
        line_spacing_multiple: 1.0,
        margin: element.padding.as_ref().map(margin),
        bullet: element.bullet.as_ref().map(bullet_spec),
        rotate: element.base.rotation.filter(|r| *r != 0.0),
        transparency: transparency(element.base.opacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Dimensions, Position};
    use crate::models::elements::ElementBase;
    use crate::models::properties::FontStyle;
    use crate::models::text::TextRuns;
    use crate::models::text_element::TextType;
    use crate::serializer::units::Units;

    #[test]
    fn test_font_face_suffixes() {
        assert_eq!(font_face("Inter", Some("600")), "Inter SemiBold");
        assert_eq!(font_face("Inter, sans-serif", Some("900")), "Inter Black");
        assert_eq!(font_face("Inter", Some("400")), "Inter");
        assert_eq!(font_face("Inter", Some("450")), "Inter");
        assert_eq!(font_face("Inter", None), "Inter");
    }

    #[test]
    fn test_text_style_flags() {
        let style = text_style(&Typography {
            font_family: Some("Roboto".into()),
            font_size: Some(32.0),
            font_weight: Some("700".into()),
            font_style: Some(FontStyle::Oblique),
            color: Some("1a2b3c".into()),
            underline: Some(true),
            ..Default::default()
        });
        assert_eq!(style.font_face.as_deref(), Some("Roboto Bold"));
        assert_eq!(style.font_size, Some(24.0));
        assert_eq!(style.color.as_deref(), Some("1A2B3C"));
        assert!(style.bold && style.italic && style.underline);
        assert!(!style.strike);
    }

    #[test]
    fn test_any_weight_above_regular_is_bold() {
        let weighted = |w: &str| Typography {
            font_weight: Some(w.to_string()),
            ..Default::default()
        };
        assert!(!text_style(&weighted("400")).bold);
        assert!(text_style(&weighted("450")).bold);
        assert!(text_style(&weighted("500")).bold);
        assert!(!text_style(&weighted("300")).bold);
    }

    #[test]
    fn test_runs_inherit_block_typography() {
        let mut runs = TextRuns::new();
        let bold = runs.push_text(
            "Bold",
            Typography {
                font_weight: Some("700".into()),
                ..Default::default()
            },
            Some("https://example.com".into()),
        );
        let br = runs.push_line_break();
        let plain = runs.push_text("plain", Typography::default(), None);
        runs.add_root(bold);
        runs.add_root(br);
        runs.add_root(plain);

        let element = TextElement {
            base: ElementBase {
                id: "text-1".into(),
                position: Position::new(96.0, 48.0),
                dimensions: Dimensions::new(192.0, 96.0),
                opacity: Some(0.5),
                ..Default::default()
            },
            text_type: TextType::P,
            content: "Bold plain".into(),
            runs,
            typography: Typography {
                color: Some("ff0000".into()),
                text_align: Some(TextAlign::Center),
                ..Default::default()
            },
            padding: Some(Padding {
                left: 8.0,
                ..Default::default()
            }),
            bullet: None,
        };
        let mapper = FrameMapper::new(Dimensions::new(960.0, 480.0), Units::Percent);
        let object = serialize_text(&element, &mapper);

        assert_eq!(object.runs.len(), 3);
        assert!(object.runs[0].style.bold);
        assert_eq!(object.runs[0].style.color.as_deref(), Some("FF0000"));
        assert_eq!(object.runs[0].hyperlink.as_deref(), Some("https://example.com"));
        assert!(object.runs[1].break_line);
        assert!(!object.runs[2].style.bold);
        assert_eq!(object.align, "center");
        assert_eq!(object.valign, "top");
        assert_eq!(object.margin, Some([6.0, 0.0, 0.0, 0.0]));
        assert_eq!(object.transparency, Some(50));
    }
}
