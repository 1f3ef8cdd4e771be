//! Pairwise interaction rules.
//!
//! An interaction mutates only `self`, reading the other side through a
//! [`Contact`] snapshot (its kind and position). Symmetric effects, such as a
//! projectile and a bomb destroying each other, need two calls, one per
//! direction; the scene does that in `resolve_pair`.
//!
//! | self          | other           | effect                                              |
//! |---------------|-----------------|-----------------------------------------------------|
//! | hazard        | ground          | below ground: clamp y, velocity ×−1, spin ×0.99     |
//! | hazard        | projectile      | within contact distance: dies                       |
//! | projectile    | hazard          | within contact distance: dies                       |
//! | player        | ground          | below ground: clamp y, velocity ×−0.99, spin ×0.99  |
//! | anything else |                 | nothing                                             |

use super::{Entity, Kind, Role};
use crate::math::Vec3;

/// Two entities closer than this (centre to centre) are touching.
pub const CONTACT_DISTANCE: f32 = 0.4;

/// What one entity needs to know about another to interact with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub kind: Kind,
    pub position: Vec3,
}

impl Entity {
    pub fn contact(&self) -> Contact {
        Contact {
            kind: self.kind(),
            position: self.position(),
        }
    }

    fn touches(&self, other: &Contact) -> bool {
        self.position().distance(other.position) < CONTACT_DISTANCE
    }

    /// Apply the interaction rules with `other` to `self`.
    pub fn interact(&mut self, other: &Contact) {
        match (&self.role, other.kind) {
            (Role::StaticHazard | Role::FallingHazard, Kind::Ground) => {
                self.bounce_off_ground(other.position.y, -1.0);
            }
            (Role::StaticHazard | Role::FallingHazard, Kind::Projectile)
            | (Role::Projectile(_), Kind::StaticHazard | Kind::FallingHazard) => {
                if self.touches(other) {
                    self.kill();
                }
            }
            (Role::Player(_), Kind::Ground) => {
                self.bounce_off_ground(other.position.y, -0.99);
            }
            _ => {}
        }
    }

    fn bounce_off_ground(&mut self, ground_y: f32, restitution: f32) {
        let k = &mut self.kinematics;
        if k.position.y < ground_y {
            k.position.y = ground_y;
            k.velocity *= restitution;
            k.angular_velocity *= 0.99;
        }
    }
}
