//! # Config — JSON Game Settings
//!
//! All tunables that are not gameplay rules live here: window size, camera
//! lens, light placement, the RNG seed, and where each model's files are.
//! Every field has a default, so a config file only needs the keys it wants to
//! change:
//!
//! ```json
//! {
//!   "window": { "width": 1280, "height": 720 },
//!   "gameplay": { "seed": 7 },
//!   "assets": { "root": "Meshes", "bomb": { "texture": "lava.png" } }
//! }
//! ```
//!
//! The file is found via the first command-line argument, else the
//! `TIGGER_CONFIG` environment variable, else built-in defaults are used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::ModelId;
use crate::error::{Error, Result};
use crate::material::Material;
use crate::math::Vec3;

/// Environment variable consulted when no config path is given on the command line.
pub const CONFIG_ENV: &str = "TIGGER_CONFIG";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub gameplay: GameplayConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// RGBA background.
    pub clear_color: [f64; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tigger".into(),
            width: 800,
            height: 800,
            clear_color: [0.0, 0.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.01,
            far: 10.0,
            eye: Vec3::new(0.0, 0.0, 2.0),
            look_at: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Direction *toward* the directional key light.
    pub key_direction: Vec3,
    pub key_ambient: Vec3,
    pub key_emitted: Vec3,
    /// Point light the planar shadows are cast from.
    pub shadow_light: Vec3,
    /// Height of the plane shadows are flattened onto (just above the ground).
    pub shadow_plane_y: f32,
    /// Height the player's spotlight hovers at.
    pub spot_height: f32,
    pub spot_emitted: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            key_direction: Vec3::new(0.0, 20.0, 15.0),
            key_ambient: Vec3::ONE,
            key_emitted: Vec3::ONE,
            shadow_light: Vec3::new(0.0, 100.0, 0.0),
            shadow_plane_y: -0.999,
            spot_height: 10.0,
            spot_emitted: Vec3::splat(0.5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Seed for the randomly scattered red spheres.
    pub seed: u64,
    /// How many frames the win camera shake lasts.
    pub shake_frames: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            seed: 0x7166_6572,
            shake_frames: 100,
        }
    }
}

/// Files for one drawable, plus what to draw if they are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSpec {
    /// `.obj`, `.gltf` or `.glb`, relative to [`AssetsConfig::root`].
    pub mesh: Option<PathBuf>,
    /// PNG or JPEG, relative to [`AssetsConfig::root`].
    pub texture: Option<PathBuf>,
    /// Solid colour used when the texture is missing.
    pub fallback_color: [u8; 4],
    /// Radius of the sphere drawn when the mesh is missing.
    pub fallback_radius: f32,
    pub material: Material,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            mesh: None,
            texture: None,
            fallback_color: [255, 255, 255, 255],
            fallback_radius: 15.0,
            material: Material::default(),
        }
    }
}

impl ModelSpec {
    fn files(mesh: Option<&str>, texture: &str, fallback_color: [u8; 4], fallback_radius: f32) -> Self {
        Self {
            mesh: mesh.map(PathBuf::from),
            texture: Some(PathBuf::from(texture)),
            fallback_color,
            fallback_radius,
            material: Material::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub root: PathBuf,
    pub player: ModelSpec,
    pub blue_sphere: ModelSpec,
    pub yellow_sphere: ModelSpec,
    pub red_sphere: ModelSpec,
    pub bomb: ModelSpec,
    pub ground: ModelSpec,
    pub projectile: ModelSpec,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            player: ModelSpec::files(Some("tigger.obj"), "tigger.png", [240, 150, 40, 255], 10.0),
            blue_sphere: ModelSpec::files(Some("sphere.obj"), "blue.png", [40, 80, 230, 255], 15.0),
            yellow_sphere: ModelSpec::files(Some("sphere.obj"), "yellow.png", [240, 220, 40, 255], 15.0),
            red_sphere: ModelSpec::files(Some("sphere.obj"), "red.png", [220, 40, 40, 255], 15.0),
            bomb: ModelSpec::files(Some("sphere.obj"), "sky.jpg", [90, 170, 240, 255], 15.0),
            // The ground's geometry is built in; only its texture is loaded.
            ground: ModelSpec::files(None, "grass.png", [60, 150, 50, 255], 1.0),
            projectile: ModelSpec::files(
                Some("thunderbolt_airscrew.obj"),
                "heliait.png",
                [200, 200, 200, 255],
                4.0,
            ),
        }
    }
}

impl AssetsConfig {
    pub fn spec(&self, id: ModelId) -> &ModelSpec {
        match id {
            ModelId::Player => &self.player,
            ModelId::BlueSphere => &self.blue_sphere,
            ModelId::YellowSphere => &self.yellow_sphere,
            ModelId::RedSphere => &self.red_sphere,
            ModelId::Bomb => &self.bomb,
            ModelId::Ground => &self.ground,
            ModelId::Projectile => &self.projectile,
        }
    }

    /// Resolve a config-relative asset path.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

impl GameConfig {
    /// Parse settings from JSON text. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| Error::Config {
            path: path.to_owned(),
            source,
        })
    }

    /// Pick the config file from an explicit path or [`CONFIG_ENV`], falling
    /// back to defaults. Returns the path that was used, if any.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let path = explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }
}
