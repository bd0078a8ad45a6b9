//! Specula Core - Scene model, scene description parsing, and image I/O.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Primitive`, `Shape`, `Light`, `Material`
//! - **Scene parsing**: the comma-separated `key: value` scene description format
//! - **Frame buffers**: `Pixel` and `FrameBuffer`, plus PPM (and other raster) I/O
//!
//! # Example
//!
//! ```ignore
//! use specula_core::{load_scene, write_image, FrameBuffer, OutputFormat, Pixel};
//!
//! let mut scene = load_scene("scene.txt")?;
//! scene.camera.set_resolution(640, 480);
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.light_count());
//! ```

pub mod frame;
pub mod image_io;
pub mod parse;
pub mod scene;

// Re-export commonly used types
pub use frame::{FrameBuffer, Pixel};
pub use image_io::{read_image, write_image, ImageIoError, ImageIoResult, OutputFormat};
pub use parse::{load_scene, parse_scene, ParseError, ParseResult};
pub use scene::{
    Camera, Color, Light, LightKind, Material, Primitive, RadialAttenuation, Scene, Shape,
    DEFAULT_NS,
};
