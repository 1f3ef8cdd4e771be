//! # Scene — The Per-Frame Simulation
//!
//! The scene owns everything that moves: the player, the ground, the hazards,
//! the optional projectile, the camera and both lights. Nothing lives in
//! globals; the window loop holds one `Scene` and calls [`Scene::update`] then
//! [`Scene::draw`] once per frame.
//!
//! ## Update Order
//!
//! ```text
//! controls ─ camera fly keys, fire, launch, gravity boost
//!   1. shake countdown
//!   2. player: integrate (win trajectory), ground bounce, lose tumble
//!   3. shake offset
//!   4. static hazards:  integrate, ground, ⇄ projectile
//!   5. falling hazards: integrate, ground, ⇄ projectile
//!   6. player aim
//!   7. projectile: velocity follows player heading, integrate when flying
//!   8. heli-cam follow, spotlight follow
//!   9. camera fly
//!  10. drop dead entities
//!  11. no static hazards left  → Won
//!  12. fewer than 4 bombs left → Lost
//! ```
//!
//! ## Outcome
//!
//! ```text
//!            all spheres gone
//!  Playing ──────────────────▶ Won
//!     │                         │
//!     │   fewer than 4 bombs    │
//!     └──────────▶ Lost ◀───────┘
//! ```
//!
//! Transitions fire once: the win shake starts on the edge into `Won` only.
//! The end poses are re-applied every frame while the outcome holds, and
//! because the lose check runs last, `Lost` wins a same-frame tie.
//!
//! ## Comparison
//!
//! - **Bevy**: the same steps would be ordered systems over an ECS world.
//! - **Our approach**: one `Vec` of plain entities walked in a fixed order,
//!   which keeps every frame deterministic and easy to test.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::asset::ModelId;
use crate::camera::Camera;
use crate::config::{GameConfig, LightingConfig};
use crate::draw::{DrawSink, FrameParams};
use crate::entity::{Entity, EntityId, Kind, Role};
use crate::error::Result;
use crate::input::Controls;
use crate::light::Light;
use crate::math::{Vec3, Vec4};
use crate::transform::ObjectTransforms;

/// The game is lost once fewer bombs than this remain.
pub const LOSE_BOMB_THRESHOLD: usize = 4;
/// Projectile speed along the player's heading, units per second.
pub const PROJECTILE_SPEED: f32 = 2.5;
/// Extra downward acceleration per gravity boost.
pub const GRAVITY_BOOST: f32 = 0.2;

const PLAYER_START: Vec3 = Vec3::new(0.0, 0.0, 1.7);
const PLAYER_SCALE: f32 = 0.04;
const PLAYER_ORIENTATION: f32 = 93.63;
const GROUND_POSITION: Vec3 = Vec3::new(-20.0, -1.0, -3.0);
const HAZARD_SCALE: f32 = 0.01;
const PROJECTILE_SCALE: f32 = 0.05;
/// Where a fired projectile appears before the sideways heading offset.
const PROJECTILE_SPAWN: Vec3 = Vec3::new(0.0, 0.5, 0.0);

const WIN_POSITION: Vec3 = Vec3::new(0.0, 0.0, -3.0);
const WIN_SCALE: f32 = 0.1;
const LOSE_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const END_ORIENTATION: f32 = -90.0;

/// How the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Outcome {
    /// `Lost` is terminal; `Won` can still turn into `Lost`.
    pub fn can_become(self, next: Outcome) -> bool {
        matches!(
            (self, next),
            (Outcome::Playing, Outcome::Won) | (Outcome::Playing, Outcome::Lost) | (Outcome::Won, Outcome::Lost)
        )
    }
}

pub struct Scene {
    player: Entity,
    ground: Entity,
    /// Hazards and the projectile, in spawn order.
    entities: Vec<Entity>,
    projectile: Option<EntityId>,
    next_id: u32,
    camera: Camera,
    key_light: Light,
    spotlight: Light,
    lighting: LightingConfig,
    shake_frames: u32,
    outcome: Outcome,
}

impl Scene {
    /// The full starting layout: spheres, bombs, player and ground.
    pub fn new(config: &GameConfig) -> Result<Self> {
        let mut scene = Self::bare(config)?;

        for i in 0..10 {
            let step = 0.4 * i as f32;
            scene.spawn_static_hazard(ModelId::BlueSphere, Vec3::new(-1.0 + step, 1.0 + step, -4.0), 0.0)?;
        }
        for i in 0..5 {
            let step = 0.4 * i as f32;
            scene.spawn_static_hazard(ModelId::YellowSphere, Vec3::new(1.0 + step, 1.0 + step, -4.0), 0.0)?;
        }
        let mut rng = StdRng::seed_from_u64(config.gameplay.seed);
        for _ in 0..8 {
            let z: f32 = rng.gen_range(0.0..1.0);
            scene.spawn_static_hazard(ModelId::RedSphere, Vec3::new(-z, 5.0 * z, -4.0), 0.0)?;
        }
        scene.spawn_static_hazard(ModelId::RedSphere, Vec3::new(-2.0, 1.0, -4.0), -60.0)?;

        for position in [
            Vec3::new(-1.5, 2.0, -4.0),
            Vec3::new(0.5, 1.0, -4.0),
            Vec3::new(-1.0, 1.0, -4.0),
            Vec3::new(-2.0, 2.0, -4.0),
        ] {
            scene.spawn_falling_hazard(position, -60.0)?;
        }

        log::info!(
            "scene ready: {} spheres, {} bombs (seed {:#x})",
            scene.count(Kind::StaticHazard),
            scene.count(Kind::FallingHazard),
            config.gameplay.seed
        );
        Ok(scene)
    }

    /// Just the player and the ground, with camera and lights from `config`.
    pub fn bare(config: &GameConfig) -> Result<Self> {
        let lighting = config.lighting.clone();
        let key_light = Light::directional(lighting.key_direction)
            .with_ambient(lighting.key_ambient)
            .with_emitted(lighting.key_emitted);
        let spotlight = Light::point(Vec3::new(PLAYER_START.x, lighting.spot_height, PLAYER_START.z))
            .with_ambient(Vec3::ZERO)
            .with_emitted(lighting.spot_emitted);

        Ok(Self {
            player: Entity::player(EntityId(0), PLAYER_START, PLAYER_SCALE, PLAYER_ORIENTATION)?,
            ground: Entity::ground(EntityId(1), GROUND_POSITION)?,
            entities: Vec::new(),
            projectile: None,
            next_id: 2,
            camera: Camera::new(&config.camera),
            key_light,
            spotlight,
            lighting,
            shake_frames: config.gameplay.shake_frames,
            outcome: Outcome::Playing,
        })
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_static_hazard(&mut self, model: ModelId, position: Vec3, orientation: f32) -> Result<EntityId> {
        let id = self.allocate_id();
        self.entities
            .push(Entity::static_hazard(id, model, position, HAZARD_SCALE, orientation)?);
        Ok(id)
    }

    pub fn spawn_falling_hazard(&mut self, position: Vec3, orientation: f32) -> Result<EntityId> {
        let id = self.allocate_id();
        self.entities
            .push(Entity::falling_hazard(id, position, HAZARD_SCALE, orientation)?);
        Ok(id)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn key_light(&self) -> &Light {
        &self.key_light
    }

    pub fn spotlight(&self) -> &Light {
        &self.spotlight
    }

    pub fn projectile(&self) -> Option<&Entity> {
        let id = self.projectile?;
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Every entity in draw order: ground, player, then hazards and the
    /// projectile in spawn order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        [&self.ground, &self.player].into_iter().chain(self.entities.iter())
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.entities().filter(|e| e.is_alive() && e.kind() == kind).count()
    }

    // ── Update ──────────────────────────────────────────────────────────

    /// Advance the simulation by `dt` seconds. Any non-negative `dt` works,
    /// including zero.
    pub fn update(&mut self, controls: &Controls, dt: f32) -> Result<()> {
        self.apply_controls(controls)?;

        self.camera.shake_mut().tick();

        let ground = self.ground.contact();
        self.player.integrate(dt);
        self.player.interact(&ground);
        self.player.lose_animation(dt);

        self.camera.shake_mut().apply(dt);

        self.step_hazards(Kind::StaticHazard, dt);
        self.step_hazards(Kind::FallingHazard, dt);

        self.player.aim(controls, dt);

        let velocity = self.player.heading() * PROJECTILE_SPEED;
        if let Some(index) = self.projectile_index() {
            let projectile = &mut self.entities[index];
            projectile.kinematics.velocity = velocity;
            projectile.integrate(dt);
        }

        if self.player.player_state().is_some_and(|s| s.heli_cam) {
            self.camera.follow(self.player.position(), self.player.heading());
        }
        let at = self.player.position();
        self.spotlight = self
            .spotlight
            .with_point(Vec3::new(at.x, self.lighting.spot_height, at.z));

        self.camera.advance(dt);

        self.remove_dead();

        if self.count(Kind::StaticHazard) == 0 {
            self.win();
        }
        if self.count(Kind::FallingHazard) < LOSE_BOMB_THRESHOLD {
            self.lose();
        }
        Ok(())
    }

    fn apply_controls(&mut self, controls: &Controls) -> Result<()> {
        self.camera.control(controls);

        if self.outcome == Outcome::Playing {
            if controls.fire {
                self.fire()?;
            }
            if controls.launch {
                self.launch();
            }
        }

        if controls.gravity_boost {
            for hazard in self.entities.iter_mut().filter(|e| e.kind() == Kind::StaticHazard) {
                hazard.kinematics.acceleration.y -= GRAVITY_BOOST;
            }
            log::info!("gravity boost");
        }
        Ok(())
    }

    /// Spawn a fresh projectile near the origin, offset to the side of the
    /// player's heading, replacing any existing one. The player's aim is held
    /// until launch.
    fn fire(&mut self) -> Result<()> {
        let heading = self.player.heading();
        let position = PROJECTILE_SPAWN + Vec3::Y.cross(heading) * -0.8;

        if let Some(old) = self.projectile.take() {
            self.entities.retain(|e| e.id() != old);
        }
        let id = self.allocate_id();
        self.entities
            .push(Entity::projectile(id, position, heading, PROJECTILE_SCALE, 0.0)?);
        self.projectile = Some(id);

        if let Some(state) = self.player.player_state_mut() {
            state.movement = false;
        }
        log::info!("projectile {:?} ready at {position}", id);
        Ok(())
    }

    /// Release the aim hold and send any waiting projectile on its way.
    fn launch(&mut self) {
        if let Some(state) = self.player.player_state_mut() {
            state.movement = true;
        }
        let Some(index) = self.projectile_index() else {
            return;
        };
        if let Some(state) = self.entities[index].projectile_state_mut() {
            if !state.flying {
                log::info!("projectile launched");
            }
            state.flying = true;
        }
    }

    fn projectile_index(&self) -> Option<usize> {
        let id = self.projectile?;
        self.entities.iter().position(|e| e.id() == id)
    }

    fn step_hazards(&mut self, kind: Kind, dt: f32) {
        let ground = self.ground.contact();
        let projectile = self.projectile_index();
        for i in 0..self.entities.len() {
            if self.entities[i].kind() != kind {
                continue;
            }
            let hazard = &mut self.entities[i];
            hazard.integrate(dt);
            hazard.interact(&ground);
            if let Some(j) = projectile {
                self.resolve_pair(i, j);
            }
        }
    }

    /// Let two live entities interact in both directions from the same
    /// snapshot.
    fn resolve_pair(&mut self, i: usize, j: usize) {
        let Ok([a, b]) = self.entities.get_disjoint_mut([i, j]) else {
            return;
        };
        if !(a.is_alive() && b.is_alive()) {
            return;
        }
        let (ca, cb) = (a.contact(), b.contact());
        a.interact(&cb);
        b.interact(&ca);
    }

    fn remove_dead(&mut self) {
        self.entities.retain(|e| {
            if !e.is_alive() {
                log::debug!("removed {:?} {:?}", e.kind(), e.id());
            }
            e.is_alive()
        });
        if self.projectile.is_some() && self.projectile_index().is_none() {
            self.projectile = None;
        }
    }

    fn transition(&mut self, next: Outcome) -> bool {
        if !self.outcome.can_become(next) {
            return false;
        }
        log::info!("{:?} -> {:?}", self.outcome, next);
        self.outcome = next;
        true
    }

    fn win(&mut self) {
        if self.transition(Outcome::Won) {
            self.camera.shake_mut().start(self.shake_frames);
        }
        if self.outcome != Outcome::Won {
            return;
        }
        self.player.set_pose(WIN_POSITION, END_ORIENTATION, Some(WIN_SCALE));
        if let Some(state) = self.player.player_state_mut() {
            state.won = true;
            state.heli_cam = false;
            state.movement = false;
        }
    }

    fn lose(&mut self) {
        self.transition(Outcome::Lost);
        if self.outcome != Outcome::Lost {
            return;
        }
        self.player.set_pose(LOSE_POSITION, END_ORIENTATION, None);
        if let Some(state) = self.player.player_state_mut() {
            state.won = false;
            state.lost = true;
            state.heli_cam = false;
        }
    }

    // ── Draw ────────────────────────────────────────────────────────────

    /// Describe this frame to `sink`: frame parameters, then each live entity
    /// lit and, unless it is the ground, its shadow.
    pub fn draw(&self, sink: &mut impl DrawSink) {
        let view_projection = self.camera.view_projection();
        sink.begin_frame(FrameParams {
            view_projection,
            eye: self.camera.eye(),
            key_light: self.key_light,
            spotlight: self.spotlight,
            shadow_light: Vec4::from((self.lighting.shadow_light, 1.0)),
            shadow_plane_y: self.lighting.shadow_plane_y,
        });

        for entity in self.entities().filter(|e| e.is_alive()) {
            let transforms = ObjectTransforms::new(&entity.pose(), view_projection);
            sink.draw_lit(entity.model, &transforms);
            if entity.casts_shadow() {
                sink.draw_shadow(entity.model, transforms.model);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, DrawList};

    fn config() -> GameConfig {
        GameConfig::default()
    }

    /// Player, ground, the given spheres and `bombs` bombs parked far away.
    fn scene_with(spheres: &[Vec3], bombs: usize) -> Scene {
        let mut scene = Scene::bare(&config()).unwrap();
        for &p in spheres {
            scene.spawn_static_hazard(ModelId::BlueSphere, p, 0.0).unwrap();
        }
        for i in 0..bombs {
            scene
                .spawn_falling_hazard(Vec3::new(10.0 + i as f32, 2.0, -10.0), -60.0)
                .unwrap();
        }
        scene
    }

    fn press(f: impl FnOnce(&mut Controls)) -> Controls {
        let mut c = Controls::default();
        f(&mut c);
        c
    }

    #[test]
    fn starting_layout() {
        let scene = Scene::new(&config()).unwrap();
        assert_eq!(scene.count(Kind::StaticHazard), 24);
        assert_eq!(scene.count(Kind::FallingHazard), 4);
        assert_eq!(scene.count(Kind::Player), 1);
        assert_eq!(scene.count(Kind::Ground), 1);
        assert_eq!(scene.outcome(), Outcome::Playing);
        assert_eq!(scene.player().position(), PLAYER_START);
        assert!(scene.projectile().is_none());
    }

    #[test]
    fn red_sphere_layout_follows_the_seed() {
        let reds = |seed: u64| -> Vec<Vec3> {
            let mut config = config();
            config.gameplay.seed = seed;
            Scene::new(&config)
                .unwrap()
                .entities()
                .filter(|e| e.model == ModelId::RedSphere)
                .map(Entity::position)
                .collect()
        };
        assert_eq!(reds(7), reds(7));
        assert_ne!(reds(7), reds(8));
        for p in reds(7) {
            assert!((p.y + 5.0 * p.x).abs() < 1e-5 || p == Vec3::new(-2.0, 1.0, -4.0), "{p}");
        }
    }

    #[test]
    fn win_fires_once_and_starts_the_shake_once() {
        let mut scene = scene_with(&[], 4);
        scene.update(&Controls::default(), 0.01).unwrap();
        assert_eq!(scene.outcome(), Outcome::Won);
        assert_eq!(scene.camera().shake().remaining_frames(), 100);

        scene.update(&Controls::default(), 0.01).unwrap();
        scene.update(&Controls::default(), 0.01).unwrap();
        assert_eq!(
            scene.camera().shake().remaining_frames(),
            98,
            "the shake must not restart while still won"
        );

        let player = scene.player();
        assert_eq!(player.position(), WIN_POSITION);
        assert_eq!(player.scale(), Vec3::splat(WIN_SCALE));
        assert_eq!(player.kinematics.orientation, END_ORIENTATION);
        let state = player.player_state().unwrap();
        assert!(state.won && !state.heli_cam && !state.movement);
    }

    #[test]
    fn losing_bombs_below_threshold_loses() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 3);
        scene.update(&Controls::default(), 0.01).unwrap();
        assert_eq!(scene.outcome(), Outcome::Lost);
        let player = scene.player();
        assert_eq!(player.position(), LOSE_POSITION);
        let state = player.player_state().unwrap();
        assert!(state.lost && !state.heli_cam);

        let scale = player.scale();
        scene.update(&Controls::default(), 0.1).unwrap();
        assert_eq!(scene.outcome(), Outcome::Lost);
        assert!(scene.player().scale().x < scale.x, "the lost player shrinks");
    }

    #[test]
    fn lose_takes_precedence_over_a_same_frame_win() {
        let mut scene = scene_with(&[], 2);
        scene.update(&Controls::default(), 0.01).unwrap();
        assert_eq!(scene.outcome(), Outcome::Lost);
        assert_eq!(scene.player().position(), LOSE_POSITION);
        assert!(!Outcome::Lost.can_become(Outcome::Won));
        assert!(!Outcome::Lost.can_become(Outcome::Playing));
    }

    #[test]
    fn fire_spawns_beside_the_origin_and_holds_aim() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 4);
        scene.update(&press(|c| c.fire = true), 0.0).unwrap();

        let heading = scene.player().heading();
        let expected = Vec3::new(0.0, 0.5, 0.0) + Vec3::Y.cross(heading) * -0.8;
        let projectile = scene.projectile().unwrap();
        assert!(projectile.position().abs_diff_eq(expected, 1e-6));
        // Not relative to the player, who starts at z = 1.7.
        assert!(
            projectile.position().abs_diff_eq(Vec3::new(0.798_395, 0.5, 0.050_650), 1e-4),
            "spawned at {}",
            projectile.position()
        );
        assert!(!scene.player().player_state().unwrap().movement);

        // Firing again replaces the projectile.
        let first = projectile.id();
        scene.update(&press(|c| c.fire = true), 0.0).unwrap();
        assert_ne!(scene.projectile().unwrap().id(), first);
        assert_eq!(scene.count(Kind::Projectile), 1);
    }

    #[test]
    fn launch_flies_along_the_player_heading() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 4);
        scene.update(&press(|c| c.fire = true), 0.0).unwrap();
        let start = scene.projectile().unwrap().position();

        scene.update(&press(|c| c.launch = true), 0.1).unwrap();
        let projectile = scene.projectile().unwrap();
        let Role::Projectile(state) = projectile.role else {
            panic!("not a projectile")
        };
        assert!(state.flying);
        assert!(scene.player().player_state().unwrap().movement);
        let moved = projectile.position() - start;
        let expected = scene.player().heading() * PROJECTILE_SPEED * 0.1;
        assert!(moved.abs_diff_eq(expected, 1e-2), "moved {moved}, expected {expected}");
    }

    #[test]
    fn launch_without_a_projectile_still_releases_aim() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 4);
        if let Some(state) = scene.player.player_state_mut() {
            state.movement = false;
        }
        scene.update(&press(|c| c.launch = true), 0.0).unwrap();
        assert!(scene.projectile().is_none());
        assert!(scene.player().player_state().unwrap().movement);
    }

    #[test]
    fn projectile_and_sphere_destroy_each_other() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 4);
        scene.update(&press(|c| c.fire = true), 0.0).unwrap();
        let at = scene.projectile().unwrap().position();
        scene
            .spawn_static_hazard(ModelId::RedSphere, at + Vec3::new(0.2, 0.0, 0.0), 0.0)
            .unwrap();
        assert_eq!(scene.count(Kind::StaticHazard), 2);

        scene.update(&Controls::default(), 0.0).unwrap();
        assert_eq!(scene.count(Kind::StaticHazard), 1);
        assert!(scene.projectile().is_none());
        assert_eq!(scene.outcome(), Outcome::Playing);
    }

    #[test]
    fn gravity_boost_pulls_spheres_harder() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 4);
        scene.update(&press(|c| c.gravity_boost = true), 0.0).unwrap();
        let sphere = scene
            .entities()
            .find(|e| e.kind() == Kind::StaticHazard)
            .unwrap();
        assert!((sphere.kinematics.acceleration.y + 0.8).abs() < 1e-6);
        let bomb = scene
            .entities()
            .find(|e| e.kind() == Kind::FallingHazard)
            .unwrap();
        assert!((bomb.kinematics.acceleration.y + 0.8).abs() < 1e-6, "bombs keep their own gravity");
    }

    #[test]
    fn spheres_never_sink_below_the_ground() {
        let mut scene = scene_with(&[Vec3::new(5.0, -0.9, -8.0)], 4);
        for _ in 0..200 {
            scene.update(&Controls::default(), 1.0 / 60.0).unwrap();
        }
        for hazard in scene.entities().filter(|e| e.kind() == Kind::StaticHazard) {
            assert!(hazard.position().y >= GROUND_POSITION.y);
        }
    }

    #[test]
    fn heli_cam_and_spotlight_track_the_player() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 4);
        scene.update(&Controls::default(), 0.0).unwrap();
        let player = scene.player();
        let expected_eye = player.position() - player.heading() + Vec3::Y * 1.5;
        assert!(scene.camera().eye().abs_diff_eq(expected_eye, 1e-5));
        assert!(scene.camera().ahead().abs_diff_eq(player.heading(), 1e-5));
        assert_eq!(
            scene.spotlight().position,
            Vec4::new(player.position().x, 10.0, player.position().z, 1.0)
        );
    }

    /// Fire, then park the entity `id` on the projectile so the next frame
    /// destroys both.
    fn shoot(scene: &mut Scene, id: EntityId) {
        scene.update(&press(|c| c.fire = true), 0.0).unwrap();
        let at = scene.projectile().unwrap().position();
        let target = scene.entities.iter_mut().find(|e| e.id() == id).unwrap();
        target.kinematics.position = at;
        scene.update(&Controls::default(), 0.0).unwrap();
    }

    #[test]
    fn win_triggers_once_on_the_last_sphere() {
        let spheres = [
            Vec3::new(5.0, 3.0, -8.0),
            Vec3::new(6.0, 3.0, -8.0),
            Vec3::new(7.0, 3.0, -8.0),
        ];
        let mut scene = scene_with(&spheres, 4);
        let ids: Vec<EntityId> = scene
            .entities()
            .filter(|e| e.kind() == Kind::StaticHazard)
            .map(Entity::id)
            .collect();

        for (n, &id) in ids.iter().enumerate() {
            shoot(&mut scene, id);
            let left = ids.len() - n - 1;
            assert_eq!(scene.count(Kind::StaticHazard), left);
            if left > 0 {
                assert_eq!(scene.outcome(), Outcome::Playing);
                assert!(!scene.camera().shake().is_active());
            }
        }

        assert_eq!(scene.outcome(), Outcome::Won);
        assert_eq!(scene.camera().shake().remaining_frames(), 100);
        scene.update(&Controls::default(), 0.0).unwrap();
        assert_eq!(scene.camera().shake().remaining_frames(), 99);
    }

    #[test]
    fn losing_the_fourth_bomb_loses_and_ends_firing() {
        let mut scene = scene_with(&[Vec3::new(5.0, 3.0, -8.0)], 4);
        scene.update(&Controls::default(), 0.0).unwrap();
        assert_eq!(scene.outcome(), Outcome::Playing);

        let bomb = scene
            .entities()
            .find(|e| e.kind() == Kind::FallingHazard)
            .map(Entity::id)
            .unwrap();
        shoot(&mut scene, bomb);
        assert_eq!(scene.count(Kind::FallingHazard), 3);
        assert_eq!(scene.outcome(), Outcome::Lost);
        assert_eq!(scene.player().position(), LOSE_POSITION);
        assert_eq!(scene.player().kinematics.orientation, END_ORIENTATION);

        scene.update(&press(|c| c.fire = true), 0.0).unwrap();
        assert!(scene.projectile().is_none(), "no firing once the game is over");
    }

    #[test]
    fn draw_emits_lit_then_shadow_and_skips_ground_shadow() {
        let scene = Scene::new(&config()).unwrap();
        let mut list = DrawList::new();
        scene.draw(&mut list);

        let total = scene.entities().count();
        assert_eq!(list.lit().count(), total);
        assert_eq!(list.shadows().count(), total - 1);
        assert!(list.shadows().all(|(model, _)| model != ModelId::Ground));

        for pair in list.commands.windows(2) {
            if let DrawCommand::Shadow { model, model_matrix } = pair[1] {
                let DrawCommand::Lit { model: lit, transforms } = pair[0] else {
                    panic!("shadow without a preceding lit draw");
                };
                assert_eq!(model, lit);
                assert_eq!(model_matrix, transforms.model);
            }
        }

        let frame = list.frame.unwrap();
        assert_eq!(frame.shadow_light, Vec4::new(0.0, 100.0, 0.0, 1.0));
        assert_eq!(frame.shadow_plane_y, -0.999);
        assert!(frame.key_light.is_directional());
    }
}
