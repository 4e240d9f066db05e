//! Axis-aligned collision detection and response
//!
//! The runner and every hazard are plain AABBs. Platform response resolves
//! along the axis of least overlap, gated by the current pull direction so
//! the runner lands on the platform face it is being pulled toward.

use super::state::{Platform, Player};

/// An axis-aligned box
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_player(player: &Player) -> Self {
        Self::new(player.pos.x, player.pos.y, player.size.x, player.size.y)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Overlap area with `other` divided by this rect's own area
    pub fn overlap_fraction(&self, other: &Rect) -> f32 {
        let left = self.x.max(other.x);
        let right = (self.x + self.w).min(other.x + other.w);
        let top = self.y.max(other.y);
        let bottom = (self.y + self.h).min(other.y + other.h);
        if left >= right || top >= bottom {
            return 0.0;
        }
        let area = self.w * self.h;
        if area <= 0.0 {
            return 0.0;
        }
        (right - left) * (bottom - top) / area
    }
}

/// Outcome of resolving the runner against a single platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformContact {
    /// Runner came to rest on the platform face it is pulled toward
    pub grounded: bool,
}

/// Resolve runner/platform overlap along the axis of least penetration.
///
/// The platform rect is padded by a 1 px pavement above and below so a
/// runner locked flush to a face keeps registering contact.
pub fn resolve_player_platform(
    player: &mut Player,
    platform: &Platform,
    pull_dir: i8,
) -> PlatformContact {
    let top = platform.y - 1.0;
    let bottom = platform.y + platform.height + 1.0;
    let padded = Rect::new(platform.x, top, platform.width, bottom - top);

    let body = Rect::from_player(player);
    if !body.overlaps(&padded) {
        return PlatformContact::default();
    }

    let overlap_left = body.x + body.w - padded.x;
    let overlap_right = padded.x + padded.w - body.x;
    let overlap_top = body.y + body.h - top;
    let overlap_bottom = bottom - body.y;
    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    let mut contact = PlatformContact::default();

    if pull_dir > 0 {
        if min_overlap == overlap_top && player.vel.y >= 0.0 {
            // Landing on top; vel 0 means resting flush from last frame
            player.pos.y = platform.y - player.height();
            player.vel.y = 0.0;
            contact.grounded = true;
        } else if min_overlap == overlap_bottom && player.vel.y < 0.0 {
            // Head bump on the underside
            player.pos.y = platform.y + platform.height;
            player.vel.y = 0.0;
        } else if min_overlap == overlap_left {
            player.pos.x = padded.x - player.width();
        } else if min_overlap == overlap_right {
            player.pos.x = padded.x + padded.w;
        }
    } else if min_overlap == overlap_bottom && player.vel.y <= 0.0 {
        // Upward pull: landing on the underside
        player.pos.y = platform.y + platform.height;
        player.vel.y = 0.0;
        contact.grounded = true;
    } else if min_overlap == overlap_top && player.vel.y > 0.0 {
        player.pos.y = platform.y - player.height();
        player.vel.y = 0.0;
    } else if min_overlap == overlap_left {
        player.pos.x = padded.x - player.width();
    } else if min_overlap == overlap_right {
        player.pos.x = padded.x + padded.w;
    }

    contact
}

/// Flame contact test: counts once the overlap covers the required fraction
/// of the runner's box
pub fn touches_fire(player: &Player, platform: &Platform, min_fraction: f32) -> bool {
    let Some((x, y, w, h)) = platform.fire_box() else {
        return false;
    };
    let body = Rect::from_player(player);
    body.overlap_fraction(&Rect::new(x, y, w, h)) >= min_fraction
}

/// Drop contact test: plain box intersection
pub fn touches_drop(player: &Player, platform: &Platform) -> bool {
    let Some((x, y, w, h)) = platform.drop_box() else {
        return false;
    };
    Rect::from_player(player).overlaps(&Rect::new(x, y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{DropDir, Track};
    use glam::Vec2;

    fn player_at(pos: Vec2) -> Player {
        Player {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(RUNNER_SIZE),
            on_ground: false,
            invulnerable_until: None,
        }
    }

    fn platform(x: f32, y: f32, width: f32) -> Platform {
        Platform {
            id: 1,
            x,
            y,
            width,
            height: PLATFORM_HEIGHT,
            track: Track::Bottom,
            has_fire: false,
            has_drop: false,
            drop_dir: DropDir::Down,
            passed: false,
        }
    }

    #[test]
    fn lands_on_top_under_downward_pull() {
        let plat = platform(0.0, 300.0, 200.0);
        let mut player = player_at(Vec2::new(50.0, 300.0 - RUNNER_SIZE + 4.0));
        player.vel.y = PULL_SPEED;

        let contact = resolve_player_platform(&mut player, &plat, 1);
        assert!(contact.grounded);
        assert_eq!(player.pos.y, 300.0 - RUNNER_SIZE);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn resting_flush_keeps_ground_contact() {
        let plat = platform(0.0, 300.0, 200.0);
        let mut player = player_at(Vec2::new(50.0, 300.0 - RUNNER_SIZE));
        // Grounded last frame: zero vertical velocity
        let contact = resolve_player_platform(&mut player, &plat, 1);
        assert!(contact.grounded);
        assert_eq!(player.pos.y, 300.0 - RUNNER_SIZE);
    }

    #[test]
    fn flipping_pull_releases_top_contact() {
        let plat = platform(0.0, 300.0, 200.0);
        let mut player = player_at(Vec2::new(50.0, 300.0 - RUNNER_SIZE));
        // Same geometry, but the pull now points up: no ground contact, so
        // the runner is free to rise next frame
        let contact = resolve_player_platform(&mut player, &plat, -1);
        assert!(!contact.grounded);
    }

    #[test]
    fn lands_on_underside_under_upward_pull() {
        let plat = platform(0.0, 300.0, 200.0);
        let mut player = player_at(Vec2::new(50.0, 300.0 + PLATFORM_HEIGHT - 4.0));
        player.vel.y = -PULL_SPEED;

        let contact = resolve_player_platform(&mut player, &plat, -1);
        assert!(contact.grounded);
        assert_eq!(player.pos.y, 300.0 + PLATFORM_HEIGHT);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn no_contact_when_apart() {
        let plat = platform(0.0, 300.0, 200.0);
        let mut player = player_at(Vec2::new(500.0, 100.0));
        player.vel.y = PULL_SPEED;
        let contact = resolve_player_platform(&mut player, &plat, 1);
        assert!(!contact.grounded);
        assert_eq!(player.pos, Vec2::new(500.0, 100.0));
    }

    #[test]
    fn fire_requires_overlap_fraction() {
        let mut plat = platform(0.0, 300.0, 200.0);
        plat.has_fire = true;
        let (fx, fy, ..) = plat.fire_box().unwrap();

        // Barely grazing the flame corner: below the 30% threshold
        let grazing = player_at(Vec2::new(fx - RUNNER_SIZE + 2.0, fy - RUNNER_SIZE + 2.0));
        assert!(!touches_fire(&grazing, &plat, FIRE_OVERLAP_FRACTION));

        // Standing in the flame
        let inside = player_at(Vec2::new(fx - 8.0, fy - 6.0));
        assert!(touches_fire(&inside, &plat, FIRE_OVERLAP_FRACTION));
    }

    #[test]
    fn drop_hit_is_plain_intersection() {
        let mut plat = platform(0.0, 300.0, 200.0);
        plat.has_drop = true;
        let (dx, dy, ..) = plat.drop_box().unwrap();

        let touching = player_at(Vec2::new(dx - 2.0, dy + 2.0));
        assert!(touches_drop(&touching, &plat));

        let clear = player_at(Vec2::new(dx + 400.0, dy));
        assert!(!touches_drop(&clear, &plat));
    }
}
