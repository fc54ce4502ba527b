//! The fixed object catalog: type id → display name and shape defaults.

use shared::CatalogItem;

use crate::generators::Shape;
use crate::mesh::Mesh;

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub shape: Shape,
}

impl CatalogEntry {
    pub fn generate(&self) -> Mesh {
        self.shape.generate()
    }
}

const STEP_HEIGHT: f64 = 0.4;
const STEP_DEPTH: f64 = 1.0;
const STEP_WIDTH: f64 = 3.0;

const fn stairs(steps: u32, hubba: bool) -> Shape {
    Shape::Stairs {
        steps,
        step_height: STEP_HEIGHT,
        step_depth: STEP_DEPTH,
        step_width: STEP_WIDTH,
        hubba,
    }
}

static CATALOG: [CatalogEntry; 15] = [
    CatalogEntry {
        id: "ground-flat",
        name: "Flat Ground",
        shape: Shape::Ground { size: 10.0 },
    },
    CatalogEntry {
        id: "ground-slope",
        name: "Bank",
        shape: Shape::Slope {
            length: 5.0,
            height: 2.0,
            width: 5.0,
        },
    },
    CatalogEntry {
        id: "quarter-pipe",
        name: "Quarter Pipe",
        shape: Shape::QuarterPipe {
            radius: 3.0,
            width: 6.0,
            segments: 12,
        },
    },
    CatalogEntry {
        id: "half-pipe",
        name: "Half Pipe",
        shape: Shape::HalfPipe {
            radius: 3.0,
            width: 6.0,
            flat: 4.0,
            segments: 12,
        },
    },
    CatalogEntry {
        id: "kicker",
        name: "Kicker",
        shape: Shape::Kicker {
            length: 2.0,
            height: 1.5,
            width: 3.0,
            segments: 8,
        },
    },
    CatalogEntry {
        id: "pyramid",
        name: "Pyramid",
        shape: Shape::Pyramid {
            base_half: 3.0,
            top_half: 1.0,
            height: 2.0,
        },
    },
    CatalogEntry {
        id: "rail-flat",
        name: "Flat Rail",
        shape: Shape::Rail {
            length: 6.0,
            height: 0.8,
            drop: 0.0,
            radius: 0.08,
            segments: 8,
        },
    },
    CatalogEntry {
        id: "rail-down",
        name: "Down Rail",
        shape: Shape::Rail {
            length: 6.0,
            height: 0.6,
            drop: 1.0,
            radius: 0.08,
            segments: 8,
        },
    },
    CatalogEntry {
        id: "ledge",
        name: "Ledge",
        shape: Shape::Ledge {
            length: 5.0,
            height: 0.6,
            depth: 0.8,
        },
    },
    CatalogEntry {
        id: "manual-pad",
        name: "Manual Pad",
        shape: Shape::Block {
            width: 4.0,
            height: 0.3,
            depth: 2.0,
        },
    },
    CatalogEntry {
        id: "stairs-3",
        name: "3 Stair",
        shape: stairs(3, false),
    },
    CatalogEntry {
        id: "stairs-5",
        name: "5 Stair",
        shape: stairs(5, false),
    },
    CatalogEntry {
        id: "stairs-hubba",
        name: "Hubba Stair",
        shape: stairs(4, true),
    },
    CatalogEntry {
        id: "bench",
        name: "Bench",
        shape: Shape::Bench,
    },
    CatalogEntry {
        id: "trash-can",
        name: "Trash Can",
        shape: Shape::Prop {
            radius: 0.3,
            height: 0.8,
            segments: 12,
        },
    },
];

/// All catalog entries in palette order.
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Look up a type id.
pub fn lookup(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Palette listing for the editor.
pub fn items() -> Vec<CatalogItem> {
    CATALOG
        .iter()
        .map(|e| CatalogItem {
            id: e.id.to_string(),
            name: e.name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = entries().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), entries().len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("ledge").map(|e| e.name), Some("Ledge"));
        assert!(lookup("loop-de-loop").is_none());
    }

    #[test]
    fn test_ledge_vertex_count() {
        assert_eq!(lookup("ledge").unwrap().generate().vertex_count(), 28);
    }

    #[test]
    fn test_items_follow_catalog_order() {
        let items = items();
        assert_eq!(items.len(), 15);
        assert_eq!(items[0].id, "ground-flat");
        assert_eq!(items[14].name, "Trash Can");
    }
}
