//! Procedural geometry for the skatepark catalog.
//!
//! Every generator is a pure function of its parameters and returns a mesh
//! in local object space: pivot at the origin, ground plane at y = 0.

mod curves;
mod solids;

pub use curves::{cylinder, half_pipe, kicker, prop, quarter_pipe, rail};
pub use solids::{
    bench, block, box_mesh, extrude_profile, ground, ledge, pyramid, slope, stairs, ExtrudeAxis,
};

use crate::mesh::Mesh;

/// Shape parameters of one catalog piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Ground {
        size: f64,
    },
    Slope {
        length: f64,
        height: f64,
        width: f64,
    },
    QuarterPipe {
        radius: f64,
        width: f64,
        segments: u32,
    },
    HalfPipe {
        radius: f64,
        width: f64,
        flat: f64,
        segments: u32,
    },
    Kicker {
        length: f64,
        height: f64,
        width: f64,
        segments: u32,
    },
    Pyramid {
        base_half: f64,
        top_half: f64,
        height: f64,
    },
    Rail {
        length: f64,
        height: f64,
        drop: f64,
        radius: f64,
        segments: u32,
    },
    Ledge {
        length: f64,
        height: f64,
        depth: f64,
    },
    Block {
        width: f64,
        height: f64,
        depth: f64,
    },
    Stairs {
        steps: u32,
        step_height: f64,
        step_depth: f64,
        step_width: f64,
        hubba: bool,
    },
    Bench,
    Prop {
        radius: f64,
        height: f64,
        segments: u32,
    },
}

impl Shape {
    /// Generate the local-space mesh for this shape.
    pub fn generate(&self) -> Mesh {
        match *self {
            Shape::Ground { size } => ground(size),
            Shape::Slope {
                length,
                height,
                width,
            } => slope(length, height, width),
            Shape::QuarterPipe {
                radius,
                width,
                segments,
            } => quarter_pipe(radius, width, segments),
            Shape::HalfPipe {
                radius,
                width,
                flat,
                segments,
            } => half_pipe(radius, width, flat, segments),
            Shape::Kicker {
                length,
                height,
                width,
                segments,
            } => kicker(length, height, width, segments),
            Shape::Pyramid {
                base_half,
                top_half,
                height,
            } => pyramid(base_half, top_half, height),
            Shape::Rail {
                length,
                height,
                drop,
                radius,
                segments,
            } => rail(length, height, drop, radius, segments),
            Shape::Ledge {
                length,
                height,
                depth,
            } => ledge(length, height, depth),
            Shape::Block {
                width,
                height,
                depth,
            } => block(width, height, depth),
            Shape::Stairs {
                steps,
                step_height,
                step_depth,
                step_width,
                hubba,
            } => stairs(steps, step_height, step_depth, step_width, hubba),
            Shape::Bench => bench(),
            Shape::Prop {
                radius,
                height,
                segments,
            } => prop(radius, height, segments),
        }
    }
}
