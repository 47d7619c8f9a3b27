use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

// ---------------------------------------------------------------------------
// Field name → Color32
// ---------------------------------------------------------------------------

/// Give each field its own hue, evenly spaced around the HSL wheel in the
/// order the fields are listed.
pub fn field_palette(fields: &[String]) -> BTreeMap<String, Color32> {
    let step = 360.0 / fields.len().max(1) as f32;
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let rgb: Srgb<u8> = Srgb::<f32>::from_color(Hsl::new(i as f32 * step, 0.75, 0.55))
                .into_format();
            (field.clone(), Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
        })
        .collect()
}

/// One stable colour per plotted field.
#[derive(Debug, Clone, Default)]
pub struct FieldColors {
    mapping: BTreeMap<String, Color32>,
}

impl FieldColors {
    pub fn new(fields: &[String]) -> Self {
        FieldColors {
            mapping: field_palette(fields),
        }
    }

    pub fn color_for(&self, field: &str) -> Color32 {
        self.mapping
            .get(field)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}
