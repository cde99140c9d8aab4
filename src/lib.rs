//! Deterministic 2D rigid-body physics: sub-stepped semi-implicit Euler
//! integration, AABB broad-phase, SAT narrow-phase, and sequential-impulse
//! collision resolution.
//!
//! Everything public works in pixel space; internally positions, vertices
//! and AABBs are stored in simulation units, converted at the boundary by
//! [`PPU`].

mod aabb;
mod body;
mod collision;
mod error;
mod manifold;
mod math;
mod world;

pub use aabb::Aabb;
pub use body::{Body, BodyId, Shape};
pub use error::PhysicsError;
pub use manifold::Manifold;
pub use math::Vector2;
pub use world::{World, WorldConfig};

/// Pixels per simulation unit. Every public position, dimension and AABB
/// extent is expressed in pixels; the engine itself works in units obtained
/// by dividing by this constant.
pub const PPU: f32 = 50.0;
