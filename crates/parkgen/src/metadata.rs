//! `_mod.json` world-info document.
//!
//! The consuming engine parses a fixed, loosely-JSON layout: sibling keys
//! are mostly not comma-separated and whitespace is irregular. The text is
//! assembled line by line rather than through a JSON serializer so that the
//! punctuation stays exactly as the engine expects.

use serde::{Deserialize, Serialize};

/// File name of the metadata entry inside the archive.
pub const MOD_FILE_NAME: &str = "_mod.json";

/// Spawn point in game units with a facing angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Lighting, sky and spawn values written into the world-info document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldInfo {
    /// Exactly two spawn points are written.
    pub start_positions: [StartPosition; 2],
    pub sky_angle: f64,
    pub gamma: f64,
    pub color_background: Rgb,
    pub color_lighting_direct: Rgb,
    pub color_lighting_ambient: Rgb,
    /// Euler angles in degrees.
    pub light_direction: [f64; 3],
}

impl Default for WorldInfo {
    fn default() -> Self {
        Self {
            start_positions: [
                StartPosition {
                    x: 0.0,
                    y: 0.0,
                    z: 5.0,
                    angle: 0.0,
                },
                StartPosition {
                    x: 10.0,
                    y: 0.0,
                    z: 0.0,
                    angle: 90.0,
                },
            ],
            sky_angle: 90.0,
            gamma: 1.0,
            color_background: Rgb::new(0.5, 0.7, 1.0),
            color_lighting_direct: Rgb::new(1.0, 0.95, 0.9),
            color_lighting_ambient: Rgb::new(0.4, 0.45, 0.5),
            light_direction: [45.0, 60.0, 180.0],
        }
    }
}

/// Sky box faces in document order. `Down` is only referenced by the sky box.
const SKY_BOX: [(&str, &str); 6] = [
    ("Up", "sky_top.jpg"),
    ("Forward", "sky_front.jpg"),
    ("Back", "sky_back.jpg"),
    ("Left", "sky_left.jpg"),
    ("Right", "sky_right.jpg"),
    ("Down", "sky_bottom.jpg"),
];
const SPECULAR_FACES: usize = 5;

/// Render the world-info document for a park.
///
/// `scene_file` is the geometry entry name (`<safe_name>.txt`). The display
/// name is JSON-escaped; everything else is numeric or fixed.
pub fn render_mod_json(park_name: &str, scene_file: &str, world: &WorldInfo) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(48);
    lines.push("\"modWorldInfo\":".into());
    lines.push("{".into());
    lines.push(format!("\t\"name\":{},", json_string(park_name)));
    lines.push(format!("\t\"fileName\":{}", json_string(scene_file)));

    lines.push("\t\"startPositions\":".into());
    lines.push("\t[".into());
    for p in &world.start_positions {
        lines.push("\t\t\t\"startPosition\":".into());
        lines.push("\t\t\t{ ".into());
        lines.push(format!("\t\t\t\t\"x\":{:?}, ", p.x));
        lines.push(format!("\t\t\t\t\"y\":{:?}, ", p.y));
        lines.push(format!("\t\t\t\t\"z\":{:?}", p.z));
        lines.push(format!("\t\t\t\t\"angle\":{:?}", p.angle));
        lines.push("\t\t\t}".into());
    }
    lines.push("\t],".into());

    for (face, file) in SKY_BOX {
        lines.push(format!("\t\"skyBox{face}\":\"{file}\""));
    }
    lines.push(String::new());
    for (face, file) in &SKY_BOX[..SPECULAR_FACES] {
        lines.push(format!("\t\"specularBox{face}\":\"{file}\""));
    }
    lines.push(String::new());

    lines.push(format!("\t\"skyAngle\":{:?}", world.sky_angle));
    lines.push(format!("\t\"gamma\":{:?}", world.gamma));
    lines.push(String::new());

    let bg = world.color_background;
    let direct = world.color_lighting_direct;
    let ambient = world.color_lighting_ambient;
    let [lx, ly, lz] = world.light_direction;
    lines.push(format!(
        "\t\"colorBackground\": {{ \"r\": {:?}, \"g\": {:?}, \"b\": {:?} }},",
        bg.r, bg.g, bg.b
    ));
    lines.push(format!(
        "\t\"colorLightingDirect\": {{ \"r\": {:?}, \"g\": {:?}, \"b\": {:?}}},",
        direct.r, direct.g, direct.b
    ));
    lines.push(format!(
        "\t\"colorLightingAmbient\": {{ \"r\": {:?}, \"g\": {:?}, \"b\": {:?}}},",
        ambient.r, ambient.g, ambient.b
    ));
    lines.push(format!(
        "\t\"lightDirection\": {{ \"x\": {lx:?}, \"y\": {ly:?}, \"z\":{lz:?} }}"
    ));
    lines.push("}".into());

    lines.join("\n")
}

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "\"modWorldInfo\":
{
\t\"name\":\"My Skatepark\",
\t\"fileName\":\"my_skatepark.txt\"
\t\"startPositions\":
\t[
\t\t\t\"startPosition\":
\t\t\t{\x20
\t\t\t\t\"x\":0.0,\x20
\t\t\t\t\"y\":0.0,\x20
\t\t\t\t\"z\":5.0
\t\t\t\t\"angle\":0.0
\t\t\t}
\t\t\t\"startPosition\":
\t\t\t{\x20
\t\t\t\t\"x\":10.0,\x20
\t\t\t\t\"y\":0.0,\x20
\t\t\t\t\"z\":0.0
\t\t\t\t\"angle\":90.0
\t\t\t}
\t],
\t\"skyBoxUp\":\"sky_top.jpg\"
\t\"skyBoxForward\":\"sky_front.jpg\"
\t\"skyBoxBack\":\"sky_back.jpg\"
\t\"skyBoxLeft\":\"sky_left.jpg\"
\t\"skyBoxRight\":\"sky_right.jpg\"
\t\"skyBoxDown\":\"sky_bottom.jpg\"

\t\"specularBoxUp\":\"sky_top.jpg\"
\t\"specularBoxForward\":\"sky_front.jpg\"
\t\"specularBoxBack\":\"sky_back.jpg\"
\t\"specularBoxLeft\":\"sky_left.jpg\"
\t\"specularBoxRight\":\"sky_right.jpg\"

\t\"skyAngle\":90.0
\t\"gamma\":1.0

\t\"colorBackground\": { \"r\": 0.5, \"g\": 0.7, \"b\": 1.0 },
\t\"colorLightingDirect\": { \"r\": 1.0, \"g\": 0.95, \"b\": 0.9},
\t\"colorLightingAmbient\": { \"r\": 0.4, \"g\": 0.45, \"b\": 0.5},
\t\"lightDirection\": { \"x\": 45.0, \"y\": 60.0, \"z\":180.0 }
}";

    #[test]
    fn test_reference_document() {
        let doc = render_mod_json("My Skatepark", "my_skatepark.txt", &WorldInfo::default());
        assert_eq!(doc, REFERENCE);
    }

    #[test]
    fn test_name_is_escaped() {
        let doc = render_mod_json("The \"Bowl\"", "the_\"bowl\".txt", &WorldInfo::default());
        assert!(doc.contains("\t\"name\":\"The \\\"Bowl\\\"\","));
    }

    #[test]
    fn test_counts_sky_references() {
        let doc = render_mod_json("x", "x.txt", &WorldInfo::default());
        assert_eq!(doc.matches("\"skyBox").count(), 6);
        assert_eq!(doc.matches("\"specularBox").count(), 5);
        assert!(!doc.contains("specularBoxDown"));
    }

    #[test]
    fn test_custom_world_values() {
        let mut world = WorldInfo::default();
        world.gamma = 1.2;
        world.start_positions[1].angle = 180.0;
        let doc = render_mod_json("x", "x.txt", &world);
        assert!(doc.contains("\t\"gamma\":1.2\n"));
        assert!(doc.contains("\t\t\t\t\"angle\":180.0\n"));
    }
}
