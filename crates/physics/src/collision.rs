//! AABB collision resolution against platforms.
//!
//! Each simulation tick, every movable body is tested against every platform
//! in registration order. On overlap the four directional penetration depths
//! are computed and the body is pushed out along the axis of minimum
//! overlap, disambiguated by the body's velocity sign. Equal depths resolve
//! vertically; registration order decides precedence between platforms in
//! contention.

use glam::Vec2;

use crate::bounds::{Aabb, Penetration};
use crate::platform::{Platform, PlatformKind};

/// Which platform face the body came to rest against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Landed on top of the platform.
    Ground,
    /// Bumped the underside of the platform.
    Ceiling,
    /// Pressed against a wall on the body's left side.
    WallLeft,
    /// Pressed against a wall on the body's right side.
    WallRight,
}

/// A single resolved collision: the corrected body center and the contact.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub position: Vec2,
    pub contact: Contact,
}

/// Cumulative result of sweeping one body against a platform list.
#[derive(Debug, Clone, Default)]
pub struct SweepResult {
    /// Whether any resolution landed the body on a platform top.
    pub grounded: bool,
    /// Every contact made during the sweep, in resolution order.
    pub contacts: Vec<Contact>,
}

/// Resolve one body against one platform.
///
/// Returns `None` when the boxes do not overlap, when the platform never
/// blocks (ladders), or when a one-way platform is approached from below or
/// suppressed by an active drop-through window.
pub fn resolve(
    body: &Aabb,
    velocity: Vec2,
    platform: &Platform,
    dropping_through: bool,
) -> Option<Resolution> {
    if platform.kind == PlatformKind::Ladder {
        return None;
    }

    let pen = Penetration::between(body, &platform.bounds)?;

    if platform.kind == PlatformKind::OneWay {
        return resolve_one_way(body, velocity, platform, &pen, dropping_through);
    }

    Some(resolve_solid(body, velocity, &platform.bounds, &pen))
}

/// One-way platforms only catch bodies arriving from above: the body must be
/// moving down (or resting) and its feet must be nearer the platform top
/// than its head is to the platform bottom. Anything else passes through.
fn resolve_one_way(
    body: &Aabb,
    velocity: Vec2,
    platform: &Platform,
    pen: &Penetration,
    dropping_through: bool,
) -> Option<Resolution> {
    if dropping_through || velocity.y > 0.0 || pen.top > pen.bottom {
        return None;
    }

    Some(Resolution {
        position: Vec2::new(body.center.x, platform.bounds.top() + body.half.y),
        contact: Contact::Ground,
    })
}

/// Minimum-overlap resolution for fully solid platforms.
///
/// The candidate face on each axis is chosen by the velocity sign (a falling
/// body resolves up onto the top face, a rising one down off the bottom
/// face); zero velocity falls back to the shallower face. Between the two
/// axes the shallower depth wins, with ties resolved vertically.
fn resolve_solid(body: &Aabb, velocity: Vec2, platform: &Aabb, pen: &Penetration) -> Resolution {
    let (vertical_contact, vertical_depth) =
        if velocity.y < 0.0 || (velocity.y == 0.0 && pen.top <= pen.bottom) {
            (Contact::Ground, pen.top)
        } else {
            (Contact::Ceiling, pen.bottom)
        };

    let (horizontal_contact, horizontal_depth) =
        if velocity.x > 0.0 || (velocity.x == 0.0 && pen.left <= pen.right) {
            // Body moving right hit the platform's left face: the wall is on
            // the body's right.
            (Contact::WallRight, pen.left)
        } else {
            (Contact::WallLeft, pen.right)
        };

    if vertical_depth <= horizontal_depth {
        let y = match vertical_contact {
            Contact::Ground => platform.top() + body.half.y,
            _ => platform.bottom() - body.half.y,
        };
        Resolution {
            position: Vec2::new(body.center.x, y),
            contact: vertical_contact,
        }
    } else {
        let x = match horizontal_contact {
            Contact::WallRight => platform.left() - body.half.x,
            _ => platform.right() + body.half.x,
        };
        Resolution {
            position: Vec2::new(x, body.center.y),
            contact: horizontal_contact,
        }
    }
}

/// Sweep one body against every platform in registration order, snapping the
/// position flush and zeroing the velocity component on each resolved axis.
pub fn sweep(
    position: &mut Vec2,
    velocity: &mut Vec2,
    half: Vec2,
    platforms: &[Platform],
    dropping_through: bool,
) -> SweepResult {
    let mut result = SweepResult::default();

    for platform in platforms {
        let body = Aabb::new(*position, half);
        let Some(resolution) = resolve(&body, *velocity, platform, dropping_through) else {
            continue;
        };

        *position = resolution.position;
        match resolution.contact {
            Contact::Ground => {
                velocity.y = 0.0;
                result.grounded = true;
            }
            Contact::Ceiling => velocity.y = 0.0,
            Contact::WallLeft | Contact::WallRight => velocity.x = 0.0,
        }
        result.contacts.push(resolution.contact);
    }

    result
}
