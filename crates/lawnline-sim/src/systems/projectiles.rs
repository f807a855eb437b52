//! Projectile kinematics: straight flight and melon arcs.

use hecs::{Entity, World};

use lawnline_core::components::{ArcTrajectory, Flight, Projectile};
use lawnline_core::types::Position;

/// Point on a melon's parabola at its current frame.
///
/// Horizontal motion is linear from origin to destination. The height is a
/// parabola through both endpoints' x with its apex `peak_height` above the
/// origin.
pub fn arc_position(arc: &ArcTrajectory) -> Position {
    let t = (arc.frame as f64 / arc.total_frames.max(1) as f64).clamp(0.0, 1.0);
    let start = arc.origin.as_dvec2();
    let end = arc.destination.as_dvec2();
    let x = start.lerp(end, t).x;

    let span = end.x - start.x;
    if span.abs() < f64::EPSILON {
        return Position::new(x, start.y);
    }
    let a = 4.0 * arc.peak_height / (span * span);
    let y = a * (x - start.x) * (x - end.x) + start.y;
    Position::new(x, y)
}

/// Move every live projectile one frame and despawn those that left the field.
pub fn run(world: &mut World, field_width: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (projectile, pos)) in world.query_mut::<(&mut Projectile, &mut Position)>() {
        if projectile.spent {
            continue;
        }
        let finished = match &mut projectile.flight {
            Flight::Straight { speed } => {
                pos.x += *speed;
                false
            }
            Flight::Arc(arc) => {
                arc.frame += 1;
                *pos = arc_position(arc);
                arc.frame > arc.total_frames
            }
        };
        if finished || pos.x > field_width || pos.x < 0.0 {
            projectile.spent = true;
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
