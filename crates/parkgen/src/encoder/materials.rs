//! Fixed material palette written into every scene file.

use super::LineWriter;

/// A solid-colour material. Everything except the RGB triplet is constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub color: [u8; 3],
}

/// Geometry never references anything but index 0; the full palette is
/// still emitted so the file layout stays fixed.
pub const MATERIALS: [Material; 6] = [
    // ground concrete
    Material { color: [128, 128, 130] },
    // ramps
    Material { color: [100, 100, 105] },
    // pyramid
    Material { color: [85, 85, 90] },
    // rails
    Material { color: [180, 180, 180] },
    // kicker wood
    Material { color: [136, 85, 51] },
    // bench wood
    Material { color: [139, 69, 19] },
];

const SHADOW_COLOR: [u8; 4] = [180, 180, 180, 255];
const HIGHLIGHT_COLOR: [u8; 4] = [255, 255, 255, 255];

impl Material {
    pub(super) fn write(&self, w: &mut LineWriter) {
        w.text("#Material");
        w.tagged(1, "Material Type (Solid)");
        w.text("#Color");
        for c in self.color {
            w.int(c);
        }
        w.int(255);
        w.tagged_float(1.0, "Specular");
        w.tagged_float(5.0, "G Blend Sharpness");
        w.tagged_float(0.8, "G Blend Level");
        w.tagged_float(0.5, "G Blend Mode");
        w.text("#G Shadow Color");
        for c in SHADOW_COLOR {
            w.int(c);
        }
        w.text("#G Highlight Color");
        for c in HIGHLIGHT_COLOR {
            w.int(c);
        }
        w.tagged(0, "Texture index");
        w.int(0);
        w.int(0);
    }
}
