//! # Tigger — A Tiny 3D Arcade Scene
//!
//! Tigger flies over an infinite meadow full of bouncing spheres and falling
//! bombs. Shoot every sphere to win; lose too many bombs and Tigger tumbles
//! away. Everything casts a flat shadow on the grass.
//!
//! The simulation ([`scene`], [`entity`], [`camera`]) is plain data and runs
//! without a GPU. It describes each frame to a [`draw::DrawSink`]; the wgpu
//! renderer behind the `render3d` feature is one such sink's consumer.

pub mod asset;
pub mod camera;
pub mod config;
pub mod draw;
pub mod entity;
pub mod error;
pub mod input;
pub mod light;
pub mod material;
pub mod math;
pub mod scene;
pub mod time;
pub mod transform;

#[cfg(feature = "render3d")]
pub mod render;
#[cfg(feature = "render3d")]
pub mod render3d;
#[cfg(feature = "render3d")]
pub mod window;

pub use error::{Error, Result};
