//! # Entities — The Closed Set of Game Objects
//!
//! Every object in the scene is an [`Entity`]: a shared kinematic state plus a
//! [`Role`] that says which of the five kinds it is and carries that kind's
//! extra state.
//!
//! ```text
//! Entity
//! ├── id, model, scale, alive
//! ├── Kinematics  position · velocity · acceleration
//! │               orientation · angular velocity · angular acceleration
//! └── Role
//!     ├── Player(PlayerState)          movement, heli-cam, won/lost, roll
//!     ├── StaticHazard                 the collectible spheres
//!     ├── FallingHazard                the bombs
//!     ├── Ground
//!     └── Projectile(ProjectileState)  flying, spin
//! ```
//!
//! Per-kind behaviour is a `match` on the role. Adding a kind is a compile
//! error everywhere it matters. The interaction rules live in
//! [`interact`](self::interact).
//!
//! ## Integration
//!
//! Semi-implicit Euler, one step per frame:
//!
//! ```text
//! velocity         += acceleration · dt
//! position         += velocity · dt
//! angular_velocity += angular_acceleration · dt
//! orientation      += angular_velocity · dt
//! ```
//!
//! Orientation is a yaw in degrees. The angular terms use the same unit per
//! second, so a hazard with `angular_velocity = 0.4` turns 0.4° per second.

pub mod interact;

use crate::asset::ModelId;
use crate::error::{Error, Result};
use crate::input::Controls;
use crate::math::{heading, Vec3};
use crate::transform::Pose;

pub use interact::{Contact, CONTACT_DISTANCE};

/// Player turn rate under aim controls, degrees per second.
pub const PLAYER_TURN_RATE: f32 = 20.0;
/// Per-axis shrink rate of the losing player, per second.
pub const LOSE_SHRINK_RATE: f32 = 0.006;
/// The losing player never shrinks below this scale.
pub const MIN_SCALE: f32 = 1e-4;

/// Stable identity for an entity within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// The kind tag, without per-kind state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Player,
    StaticHazard,
    FallingHazard,
    Ground,
    Projectile,
}

/// Linear and angular motion state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Yaw, degrees.
    pub orientation: f32,
    pub angular_velocity: f32,
    pub angular_acceleration: f32,
}

impl Kinematics {
    pub fn at(position: Vec3, orientation: f32) -> Self {
        Self {
            position,
            orientation,
            ..Self::default()
        }
    }

    /// Advance velocity then position.
    pub fn integrate_linear(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance angular velocity and return the angle turned this step.
    pub fn integrate_angular(&mut self, dt: f32) -> f32 {
        self.angular_velocity += self.angular_acceleration * dt;
        self.angular_velocity * dt
    }

    /// Full step: linear motion plus yaw.
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_linear(dt);
        self.orientation += self.integrate_angular(dt);
    }
}

/// Player-only state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Whether aim controls turn the player.
    pub movement: bool,
    /// Whether the camera follows the player.
    pub heli_cam: bool,
    pub won: bool,
    pub lost: bool,
    /// Roll about +Z in degrees, used instead of yaw while losing.
    pub roll: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            movement: true,
            heli_cam: true,
            won: false,
            lost: false,
            roll: 30.0,
        }
    }
}

/// Projectile-only state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileState {
    /// Integrates only once launched.
    pub flying: bool,
    /// Roll about +Z in degrees; the propeller spin.
    pub spin: f32,
}

impl Default for ProjectileState {
    fn default() -> Self {
        Self {
            flying: false,
            spin: 60.0,
        }
    }
}

/// Kind plus kind-specific state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Player(PlayerState),
    StaticHazard,
    FallingHazard,
    Ground,
    Projectile(ProjectileState),
}

impl Role {
    pub fn kind(&self) -> Kind {
        match self {
            Role::Player(_) => Kind::Player,
            Role::StaticHazard => Kind::StaticHazard,
            Role::FallingHazard => Kind::FallingHazard,
            Role::Ground => Kind::Ground,
            Role::Projectile(_) => Kind::Projectile,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    pub role: Role,
    pub kinematics: Kinematics,
    scale: Vec3,
    pub model: ModelId,
    alive: bool,
}

impl Entity {
    /// Build an entity, rejecting any zero scale component.
    pub fn new(id: EntityId, role: Role, model: ModelId, kinematics: Kinematics, scale: Vec3) -> Result<Self> {
        if scale.cmpeq(Vec3::ZERO).any() || !scale.is_finite() {
            return Err(Error::ZeroScale { kind: role.kind() });
        }
        Ok(Self {
            id,
            role,
            kinematics,
            scale,
            model,
            alive: true,
        })
    }

    /// The player with its initial flight kinematics.
    pub fn player(id: EntityId, position: Vec3, scale: f32, orientation: f32) -> Result<Self> {
        let kinematics = Kinematics {
            velocity: Vec3::splat(10.0),
            acceleration: Vec3::new(0.0, 0.0, -0.6),
            angular_acceleration: 270.0,
            angular_velocity: 2.0,
            ..Kinematics::at(position, orientation)
        };
        Self::new(
            id,
            Role::Player(PlayerState::default()),
            ModelId::Player,
            kinematics,
            Vec3::splat(scale),
        )
    }

    /// A collectible sphere that bounces on the ground.
    pub fn static_hazard(id: EntityId, model: ModelId, position: Vec3, scale: f32, orientation: f32) -> Result<Self> {
        let kinematics = Kinematics {
            acceleration: Vec3::new(0.0, -0.6, 0.0),
            angular_velocity: 0.4,
            ..Kinematics::at(position, orientation)
        };
        Self::new(id, Role::StaticHazard, model, kinematics, Vec3::splat(scale))
    }

    /// A bomb: falls a little faster than the spheres.
    pub fn falling_hazard(id: EntityId, position: Vec3, scale: f32, orientation: f32) -> Result<Self> {
        let kinematics = Kinematics {
            acceleration: Vec3::new(0.0, -0.8, 0.0),
            angular_velocity: 0.6,
            ..Kinematics::at(position, orientation)
        };
        Self::new(id, Role::FallingHazard, ModelId::Bomb, kinematics, Vec3::splat(scale))
    }

    pub fn ground(id: EntityId, position: Vec3) -> Result<Self> {
        Self::new(id, Role::Ground, ModelId::Ground, Kinematics::at(position, 0.0), Vec3::ONE)
    }

    /// A projectile waiting to launch, drifting along `heading`.
    pub fn projectile(id: EntityId, position: Vec3, heading: Vec3, scale: f32, orientation: f32) -> Result<Self> {
        let kinematics = Kinematics {
            velocity: heading * 0.5,
            acceleration: Vec3::new(0.0, 0.0, -0.6),
            angular_acceleration: 270.0,
            angular_velocity: 2.0,
            ..Kinematics::at(position, orientation)
        };
        Self::new(
            id,
            Role::Projectile(ProjectileState::default()),
            ModelId::Projectile,
            kinematics,
            Vec3::splat(scale),
        )
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> Kind {
        self.role.kind()
    }

    pub fn position(&self) -> Vec3 {
        self.kinematics.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Unit heading in the XZ plane derived from the orientation.
    pub fn heading(&self) -> Vec3 {
        heading(self.kinematics.orientation)
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.role {
            Role::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.role {
            Role::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn projectile_state_mut(&mut self) -> Option<&mut ProjectileState> {
        match &mut self.role {
            Role::Projectile(state) => Some(state),
            _ => None,
        }
    }

    /// One integration step, per kind:
    ///
    /// - hazards always integrate;
    /// - the player only integrates on its win trajectory;
    /// - the projectile only once launched, spinning instead of yawing;
    /// - the ground never moves.
    pub fn integrate(&mut self, dt: f32) {
        match &mut self.role {
            Role::StaticHazard | Role::FallingHazard => self.kinematics.integrate(dt),
            Role::Player(state) => {
                if state.won {
                    self.kinematics.integrate(dt);
                }
            }
            Role::Projectile(state) => {
                if state.flying {
                    self.kinematics.integrate_linear(dt);
                    state.spin += self.kinematics.integrate_angular(dt);
                }
            }
            Role::Ground => {}
        }
    }

    /// The losing player's tumble: roll faster and faster while shrinking.
    /// No-op for anything else.
    pub fn lose_animation(&mut self, dt: f32) {
        let Role::Player(state) = &mut self.role else {
            return;
        };
        if !state.lost {
            return;
        }
        state.roll += self.kinematics.integrate_angular(dt);
        if self.scale.x > MIN_SCALE {
            self.scale = (self.scale - Vec3::splat(LOSE_SHRINK_RATE * dt)).max(Vec3::splat(MIN_SCALE));
        }
    }

    /// Player turning under the aim controls. No-op for anything else.
    pub fn aim(&mut self, controls: &Controls, dt: f32) {
        let Role::Player(state) = &self.role else {
            return;
        };
        if !state.movement {
            return;
        }
        if controls.turn_right {
            self.kinematics.orientation += PLAYER_TURN_RATE * dt;
        } else if controls.turn_left {
            self.kinematics.orientation -= PLAYER_TURN_RATE * dt;
        }
    }

    /// Only the ground, which receives shadows, does not cast one.
    pub fn casts_shadow(&self) -> bool {
        !matches!(self.role, Role::Ground)
    }

    /// Rendering pose. The losing player rolls instead of yawing; the
    /// projectile yaws and spins.
    pub fn pose(&self) -> Pose {
        let pose = Pose::new(self.kinematics.position, self.scale, self.kinematics.orientation);
        match &self.role {
            Role::Player(state) if state.lost => Pose {
                yaw: 0.0,
                ..pose.with_roll(state.roll)
            },
            Role::Projectile(state) => pose.with_roll(state.spin),
            _ => pose,
        }
    }

    /// Put the player in its end pose. Callers check the kind.
    pub(crate) fn set_pose(&mut self, position: Vec3, orientation: f32, scale: Option<f32>) {
        self.kinematics.position = position;
        self.kinematics.orientation = orientation;
        if let Some(scale) = scale {
            self.scale = Vec3::splat(scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;

    fn bare(role: Role) -> Entity {
        Entity::new(EntityId(0), role, ModelId::RedSphere, Kinematics::default(), Vec3::ONE).unwrap()
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = Entity::new(
            EntityId(1),
            Role::FallingHazard,
            ModelId::Bomb,
            Kinematics::default(),
            Vec3::new(1.0, 0.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ZeroScale { kind: Kind::FallingHazard }));
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let mut e = bare(Role::StaticHazard);
        e.kinematics = Kinematics {
            position: Vec3::new(1.0, 2.0, 3.0),
            velocity: Vec3::new(0.5, -1.0, 0.25),
            orientation: 12.0,
            angular_velocity: 3.0,
            ..Kinematics::default()
        };
        let before = e.kinematics;
        e.integrate(0.0);
        assert_eq!(e.kinematics, before);
    }

    #[test]
    fn two_half_steps_equal_one_full_step_without_acceleration() {
        let start = Kinematics {
            position: Vec3::new(-1.0, 0.5, 2.0),
            velocity: Vec3::new(0.3, 1.2, -0.7),
            orientation: 45.0,
            angular_velocity: -8.0,
            ..Kinematics::default()
        };
        let mut once = start;
        once.integrate(0.1);
        let mut twice = start;
        twice.integrate(0.05);
        twice.integrate(0.05);
        assert!(once.position.abs_diff_eq(twice.position, 1e-6));
        assert!((once.orientation - twice.orientation).abs() < 1e-4);
    }

    #[test]
    fn acceleration_feeds_velocity_before_position() {
        let mut k = Kinematics {
            acceleration: Vec3::new(0.0, -0.8, 0.0),
            ..Kinematics::default()
        };
        k.integrate(0.5);
        assert!(k.velocity.abs_diff_eq(Vec3::new(0.0, -0.4, 0.0), 1e-6));
        assert!(k.position.abs_diff_eq(Vec3::new(0.0, -0.2, 0.0), 1e-6));
    }

    #[test]
    fn player_only_integrates_after_winning() {
        let mut player = Entity::player(EntityId(0), Vec3::new(0.0, 0.0, 1.7), 0.04, 93.63).unwrap();
        player.integrate(0.1);
        assert_eq!(player.position(), Vec3::new(0.0, 0.0, 1.7));

        player.player_state_mut().unwrap().won = true;
        player.integrate(0.1);
        assert_ne!(player.position(), Vec3::new(0.0, 0.0, 1.7));
    }

    #[test]
    fn projectile_spins_instead_of_yawing() {
        let mut p = Entity::projectile(EntityId(0), Vec3::ZERO, Vec3::NEG_Z, 0.05, 0.0).unwrap();
        p.integrate(0.1);
        assert_eq!(p.position(), Vec3::ZERO, "grounded projectile stays put");

        p.projectile_state_mut().unwrap().flying = true;
        p.integrate(0.1);
        assert_eq!(p.kinematics.orientation, 0.0);
        let Role::Projectile(state) = p.role else { unreachable!() };
        assert!(state.spin > 60.0);
        assert!(p.position().z < 0.0);
    }

    #[test]
    fn lose_animation_rolls_and_shrinks_but_stays_invertible() {
        let mut player = Entity::player(EntityId(0), Vec3::ZERO, 0.04, 0.0).unwrap();
        player.player_state_mut().unwrap().lost = true;
        for _ in 0..200 {
            player.lose_animation(0.05);
        }
        assert_eq!(player.scale(), Vec3::splat(MIN_SCALE));
        let pose = player.pose();
        assert_eq!(pose.yaw, 0.0);
        let product = pose.model() * pose.inverse_model();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn aim_respects_movement_flag() {
        let mut player = Entity::player(EntityId(0), Vec3::ZERO, 0.04, 0.0).unwrap();
        let right = Controls {
            turn_right: true,
            ..Controls::default()
        };
        player.aim(&right, 0.5);
        assert!((player.kinematics.orientation - 10.0).abs() < 1e-6);

        player.player_state_mut().unwrap().movement = false;
        player.aim(&right, 0.5);
        assert!((player.kinematics.orientation - 10.0).abs() < 1e-6);
    }

    #[test]
    fn only_ground_skips_shadow() {
        assert!(!bare(Role::Ground).casts_shadow());
        assert!(bare(Role::StaticHazard).casts_shadow());
        assert!(bare(Role::Projectile(ProjectileState::default())).casts_shadow());
    }
}
