use async_trait::async_trait;
use log::debug;

use crate::errors::Result;
use crate::models::elements::ElementDto;
use crate::models::page::SlideDto;
use crate::plugins::{Plugin, PluginCapabilities, PluginContext};

/// Replaces the font family of every text element with one fixed face.
///
/// Run-level families are cleared so that each run falls back to the new block font.
/// With `apply_to_all` (the default) table cells are rewritten as well.
#[derive(Debug, Clone)]
pub struct CustomFontPlugin {
    font_face: String,
    apply_to_all: bool,
}

impl CustomFontPlugin {
    pub fn new(font_face: impl Into<String>) -> Self {
        Self {
            font_face: font_face.into(),
            apply_to_all: true,
        }
    }

    /// Limits the rewrite to text elements.
    pub fn text_only(mut self) -> Self {
        self.apply_to_all = false;
        self
    }

    pub fn font_face(&self) -> &str {
        &self.font_face
    }
}

#[async_trait]
impl Plugin for CustomFontPlugin {
    fn name(&self) -> &str {
        "custom-font"
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new().with_on_slide()
    }

    async fn on_slide(&self, mut slide: SlideDto, _ctx: &mut PluginContext) -> Result<SlideDto> {
        let mut rewritten = 0usize;
        for element in slide.elements.iter_mut() {
            match element {
                ElementDto::Text(text) => {
                    text.typography.font_family = Some(self.font_face.clone());
                    for typography in text.runs.typographies_mut() {
                        typography.font_family = None;
                    }
                    rewritten += 1;
                }
                ElementDto::Table(table) if self.apply_to_all => {
                    for cell in table.rows.iter_mut().flatten() {
                        cell.typography.font_family = Some(self.font_face.clone());
                    }
                    rewritten += 1;
                }
                _ => {}
            }
        }
        debug!(
            "custom-font: set '{}' on {} element(s) of slide {}",
            self.font_face, rewritten, slide.order
        );
        Ok(slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::elements::ElementBase;
    use crate::models::properties::Typography;
    use crate::models::table::{TableCell, TableElement};
    use crate::models::text::TextRuns;
    use crate::models::text_element::{TextElement, TextType};

    fn text_element() -> ElementDto {
        let mut runs = TextRuns::new();
        let run = runs.push_text(
            "Hello",
            Typography {
                font_family: Some("Georgia".into()),
                font_size: Some(20.0),
                ..Default::default()
            },
            None,
        );
        runs.add_root(run);
        ElementDto::Text(TextElement {
            base: ElementBase {
                id: "text-1".into(),
                ..Default::default()
            },
            text_type: TextType::P,
            content: "Hello".into(),
            runs,
            typography: Typography {
                font_family: Some("Times".into()),
                ..Default::default()
            },
            padding: None,
            bullet: None,
        })
    }

    fn table_element() -> ElementDto {
        ElementDto::Table(TableElement {
            base: ElementBase::default(),
            rows: vec![vec![TableCell {
                text: "A".into(),
                typography: Typography::default(),
                fill: None,
                border: None,
                colspan: 1,
                rowspan: 1,
                padding: None,
                is_header: false,
            }]],
            header_row: false,
            column_widths: vec![],
        })
    }

    fn font_of_cell(element: &ElementDto) -> Option<String> {
        match element {
            ElementDto::Table(table) => table.rows[0][0].typography.font_family.clone(),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_rewrites_block_and_run_fonts() {
        let mut slide = SlideDto::new("slide-1", 0);
        slide.elements.push(text_element());
        slide.elements.push(table_element());

        let slide = CustomFontPlugin::new("Inter")
            .on_slide(slide, &mut PluginContext::default())
            .await
            .unwrap();

        let ElementDto::Text(text) = &slide.elements[0] else {
            panic!("expected text");
        };
        assert_eq!(text.typography.font_family.as_deref(), Some("Inter"));
        let flat = text.runs.flatten();
        assert_eq!(flat[0].typography.font_family, None);
        assert_eq!(flat[0].typography.font_size, Some(20.0));
        assert_eq!(font_of_cell(&slide.elements[1]).as_deref(), Some("Inter"));
    }

    #[tokio::test]
    async fn test_text_only_leaves_tables() {
        let mut slide = SlideDto::new("slide-1", 0);
        slide.elements.push(table_element());
        let slide = CustomFontPlugin::new("Inter")
            .text_only()
            .on_slide(slide, &mut PluginContext::default())
            .await
            .unwrap();
        assert_eq!(font_of_cell(&slide.elements[0]), None);
    }
}
