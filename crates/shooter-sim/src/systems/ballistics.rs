//! Hitscan firing: crosshair trace, muzzle trace and hit dispatch.

use glam::Vec3;
use hecs::{Entity, World};
use log::debug;

use shooter_core::components::{Enemy, Item, StaticBox};
use shooter_core::constants::*;
use shooter_core::events::GameEvent;
use shooter_core::types::{ControllerId, Transform};

use crate::character::Character;
use crate::context::SimContext;
use crate::systems::damage;
use crate::systems::trace::{line_trace, HitResult};

/// Side effect requested by an actor reacting to a bullet.
#[derive(Debug, Clone, PartialEq)]
pub enum HitReaction {
    Sound { cue: String, location: Vec3 },
    Particles { effect: String, location: Vec3 },
    /// Damage everything within `radius` of `center`.
    RadialDamage { center: Vec3, radius: f32, damage: f32 },
    /// Remove the struck actor.
    Destroy,
}

/// Actors that react to being shot, independent of taking damage.
pub trait BulletHit: Send + Sync + 'static {
    fn bullet_hit(&self, hit: &HitResult, shooter: Entity, controller: ControllerId) -> Vec<HitReaction>;
}

/// Component holding an actor's bullet-hit capability.
pub struct BulletHitCapability(pub Box<dyn BulletHit>);

/// Enemies: impact sound and particles at the hit point.
pub struct EnemyImpact {
    pub sound: Option<String>,
    pub particles: Option<String>,
}

impl BulletHit for EnemyImpact {
    fn bullet_hit(&self, hit: &HitResult, _shooter: Entity, _controller: ControllerId) -> Vec<HitReaction> {
        let mut reactions = Vec::new();
        if let Some(cue) = &self.sound {
            reactions.push(HitReaction::Sound {
                cue: cue.clone(),
                location: hit.location,
            });
        }
        if let Some(effect) = &self.particles {
            reactions.push(HitReaction::Particles {
                effect: effect.clone(),
                location: hit.location,
            });
        }
        reactions
    }
}

/// Explosive barrels: blast, splash damage, then gone.
pub struct ExplosiveHit {
    pub damage: f32,
    pub radius: f32,
    pub sound: Option<String>,
    pub particles: Option<String>,
}

impl BulletHit for ExplosiveHit {
    fn bullet_hit(&self, hit: &HitResult, _shooter: Entity, _controller: ControllerId) -> Vec<HitReaction> {
        let mut reactions = Vec::new();
        if let Some(cue) = &self.sound {
            reactions.push(HitReaction::Sound {
                cue: cue.clone(),
                location: hit.location,
            });
        }
        if let Some(effect) = &self.particles {
            reactions.push(HitReaction::Particles {
                effect: effect.clone(),
                location: hit.location,
            });
        }
        reactions.push(HitReaction::RadialDamage {
            center: hit.location,
            radius: self.radius,
            damage: self.damage,
        });
        reactions.push(HitReaction::Destroy);
        reactions
    }
}

/// Trace from the camera through the screen centre.
///
/// Returns the hit and the point the crosshair resolves to: the hit
/// location, or the far end of the trace on a miss.
pub fn trace_under_crosshairs(ch: &Character, world: &World, geometry: &[StaticBox]) -> (HitResult, Vec3) {
    let camera = ch.camera_transform(world);
    let start = camera.location;
    let end = start + camera.rotation.forward() * CROSSHAIR_TRACE_LENGTH;
    let hit = line_trace(world, geometry, start, end, &[ch.body]);
    let target = if hit.blocking_hit { hit.location } else { end };
    (hit, target)
}

/// Resolve where a bullet fired from `muzzle` lands.
///
/// The muzzle trace runs a quarter past the crosshair target so the target
/// surface itself is reached. When it hits nothing, the returned location is
/// the crosshair target and the flag is false.
pub fn beam_end_location(ch: &Character, world: &World, geometry: &[StaticBox], muzzle: Vec3) -> (bool, HitResult) {
    let (_, target) = trace_under_crosshairs(ch, world, geometry);
    let end = muzzle + (target - muzzle) * MUZZLE_TRACE_EXTENSION;
    let mut hit = line_trace(world, geometry, muzzle, end, &[ch.body]);
    if !hit.blocking_hit {
        hit.location = target;
        return (false, hit);
    }
    (true, hit)
}

/// Muzzle location of the equipped weapon.
fn muzzle_location(ch: &Character, world: &World) -> Option<Vec3> {
    let weapon = ch.equipped_weapon?;
    let item = world.get::<&Item>(weapon).ok()?;
    let offset = item.weapon()?.muzzle_offset?;
    let transform = world.get::<&Transform>(weapon).ok()?;
    Some(transform.transform_point(offset))
}

/// Fire one bullet from the equipped weapon's muzzle.
pub fn send_bullet(ch: &mut Character, cx: &mut SimContext) {
    let Some(muzzle) = muzzle_location(ch, cx.world) else {
        return;
    };
    let flash = ch
        .equipped_weapon
        .and_then(|w| cx.world.get::<&Item>(w).ok())
        .and_then(|it| it.weapon().and_then(|w| w.muzzle_flash.clone()));
    if let Some(effect) = flash {
        cx.emit(GameEvent::SpawnParticles {
            effect,
            location: muzzle,
        });
    }

    let config = cx.config;
    let (beam_hit, hit) = beam_end_location(ch, cx.world, &config.scenario.geometry, muzzle);
    if beam_hit {
        dispatch_hit(ch, cx, &hit);
    }

    cx.emit(GameEvent::SpawnParticles {
        effect: BEAM_PARTICLES.to_string(),
        location: muzzle,
    });
    cx.emit(GameEvent::SpawnBeam {
        start: muzzle,
        end: hit.location,
    });
}

/// Apply a blocking hit: capability reaction, enemy damage, fallback impact.
fn dispatch_hit(ch: &mut Character, cx: &mut SimContext, hit: &HitResult) {
    let Some(actor) = hit.actor else {
        impact_particles(cx, hit.location);
        return;
    };

    let reactions = cx
        .world
        .get::<&BulletHitCapability>(actor)
        .ok()
        .map(|cap| cap.0.bullet_hit(hit, ch.body, ControllerId::PLAYER));
    let has_capability = reactions.is_some();
    if let Some(reactions) = reactions {
        apply_reactions(ch, cx, actor, reactions);
    }

    let head_bone = cx.world.get::<&Enemy>(actor).ok().map(|e| e.head_bone.clone());
    if let Some(head_bone) = &head_bone {
        let headshot = hit.bone.as_deref() == Some(head_bone.as_str());
        let Some(amount) = ch
            .equipped_weapon
            .and_then(|w| cx.world.get::<&Item>(w).ok())
            .and_then(|it| {
                it.weapon()
                    .map(|w| if headshot { w.headshot_damage } else { w.damage })
            })
        else {
            return;
        };
        debug!("Bullet hit enemy for {} (headshot: {})", amount, headshot);
        damage::damage_enemy(cx, actor, amount, Some(ch.body));
        damage::show_hit_number(cx, actor, amount, hit.location, headshot);
    }

    if !has_capability && head_bone.is_none() {
        impact_particles(cx, hit.location);
    }
}

fn apply_reactions(ch: &mut Character, cx: &mut SimContext, actor: Entity, reactions: Vec<HitReaction>) {
    for reaction in reactions {
        match reaction {
            HitReaction::Sound { cue, location } => cx.emit(GameEvent::PlaySound {
                cue,
                location: Some(location),
            }),
            HitReaction::Particles { effect, location } => {
                cx.emit(GameEvent::SpawnParticles { effect, location })
            }
            HitReaction::RadialDamage {
                center,
                radius,
                damage: amount,
            } => damage::radial_damage(ch, cx, center, radius, amount, actor),
            HitReaction::Destroy => cx.destroy(actor),
        }
    }
}

fn impact_particles(cx: &mut SimContext, location: Vec3) {
    cx.emit(GameEvent::SpawnParticles {
        effect: IMPACT_PARTICLES.to_string(),
        location,
    });
}
