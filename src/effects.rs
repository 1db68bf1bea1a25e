//! Timed one-shot presentation effects
//!
//! Explosions and level announcements are shown for a fixed time and then
//! removed. They run on their own countdown and can outlive the session that
//! created them, so each effect carries its session id and only effects of
//! the live session are reported or drawn.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{EXPLOSION_DURATION, LEVEL_POPUP_DURATION};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EffectKind {
    Explosion { pos: Vec2 },
    LevelAnnouncement { level: u8, text: String },
}

impl EffectKind {
    /// How long this effect stays on screen (seconds)
    pub fn duration(&self) -> f32 {
        match self {
            EffectKind::Explosion { .. } => EXPLOSION_DURATION,
            EffectKind::LevelAnnouncement { .. } => LEVEL_POPUP_DURATION,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimedEffect {
    pub id: u32,
    pub kind: EffectKind,
    /// Seconds until removal
    pub remaining: f32,
    /// Session that scheduled this effect
    pub session: u64,
}

/// Pending timed effects
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    effects: Vec<TimedEffect>,
    next_id: u32,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an effect for its default duration
    pub fn schedule(&mut self, kind: EffectKind, session: u64) -> u32 {
        let duration = kind.duration();
        self.schedule_for(kind, duration, session)
    }

    /// Schedule an effect with an explicit duration
    pub fn schedule_for(&mut self, kind: EffectKind, duration: f32, session: u64) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.effects.push(TimedEffect {
            id,
            kind,
            remaining: duration,
            session,
        });
        id
    }

    /// Count down every effect and drop the expired ones.
    ///
    /// Returns the expired effects that belong to `live_session`; effects of
    /// ended sessions expire silently.
    pub fn advance(&mut self, dt: f32, live_session: Option<u64>) -> Vec<TimedEffect> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining -= dt;
            if effect.remaining > 0.0 {
                return true;
            }
            if Some(effect.session) == live_session {
                expired.push(effect.clone());
            }
            false
        });
        expired
    }

    /// Effects the shell should draw right now
    pub fn visible(&self, live_session: Option<u64>) -> Vec<&TimedEffect> {
        self.effects
            .iter()
            .filter(|e| Some(e.session) == live_session)
            .collect()
    }

    /// Number of pending effects, including stale ones still counting down
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explosion() -> EffectKind {
        EffectKind::Explosion {
            pos: Vec2::new(100.0, 200.0),
        }
    }

    #[test]
    fn test_explosion_expires_after_duration() {
        let mut queue = EffectQueue::new();
        queue.schedule(explosion(), 1);

        assert!(queue.advance(0.3, Some(1)).is_empty());
        assert_eq!(queue.visible(Some(1)).len(), 1);

        let expired = queue.advance(0.2, Some(1));
        assert_eq!(expired.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_level_popup_lasts_longer() {
        let mut queue = EffectQueue::new();
        queue.schedule(
            EffectKind::LevelAnnouncement {
                level: 2,
                text: "LEVEL 2: Fighter".into(),
            },
            1,
        );
        queue.schedule(explosion(), 1);

        let expired = queue.advance(0.5, Some(1));
        assert_eq!(expired.len(), 1);
        assert!(matches!(expired[0].kind, EffectKind::Explosion { .. }));
        assert_eq!(queue.len(), 1);

        let expired = queue.advance(0.8, Some(1));
        assert!(matches!(
            expired[0].kind,
            EffectKind::LevelAnnouncement { level: 2, .. }
        ));
    }

    #[test]
    fn test_stale_session_effects_expire_silently() {
        let mut queue = EffectQueue::new();
        queue.schedule(explosion(), 1);
        queue.schedule(explosion(), 2);

        // Session 1 ended; its effect is hidden but still counting down
        assert_eq!(queue.visible(Some(2)).len(), 1);
        assert_eq!(queue.len(), 2);

        let expired = queue.advance(1.0, Some(2));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].session, 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_no_live_session_reports_nothing() {
        let mut queue = EffectQueue::new();
        queue.schedule(explosion(), 3);
        assert!(queue.visible(None).is_empty());
        assert!(queue.advance(1.0, None).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = EffectQueue::new();
        let a = queue.schedule(explosion(), 1);
        let b = queue.schedule_for(explosion(), 5.0, 1);
        assert_ne!(a, b);
    }
}
