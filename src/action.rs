//! Public event model
//!
//! An [`Action`] is one user-visible input event in a replay, ordered by
//! frame. Button events additionally carry hold/release and player bits;
//! restart-class events carry an RNG seed; TPS events carry the new tick
//! rate. The packed on-wire form lives in the section encoder, not here.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_TPS;

/// Kind of replay event. Zero is reserved on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionKind {
    /// Primary button press or release.
    Jump = 1,
    /// Left movement press or release.
    Left = 2,
    /// Right movement press or release.
    Right = 3,
    /// Restart from the last checkpoint, reseeding the RNG.
    Restart = 4,
    /// Restart from the beginning, reseeding the RNG.
    RestartFull = 5,
    /// Player death, reseeding the RNG.
    Death = 6,
    /// Tick-rate change from this frame on.
    Tps = 7,
}

impl ActionKind {
    /// True for the three button kinds carried as packed player inputs.
    pub fn is_player(self) -> bool {
        matches!(self, Self::Jump | Self::Left | Self::Right)
    }

    /// True for the three seed-carrying kinds.
    pub fn is_seeded(self) -> bool {
        matches!(self, Self::Restart | Self::RestartFull | Self::Death)
    }
}

/// One replay event.
///
/// Actions are ordered by `frame`; `delta` is the difference from the
/// previous action's frame (0 for the first action of a stream).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Frame this action executes on.
    pub frame: u64,
    /// Event kind.
    pub kind: ActionKind,
    /// Hold or release. Meaningful for player kinds only.
    pub holding: bool,
    /// Second player. Meaningful for player kinds only.
    pub player2: bool,
    /// RNG seed. Meaningful for seeded kinds only.
    pub seed: u64,
    /// New tick rate. Meaningful for [`ActionKind::Tps`] only.
    pub tps: f64,
    pub(crate) delta: u64,
    pub(crate) swift: bool,
}

impl Action {
    /// Player press/release `delta` frames after `previous_frame`.
    pub fn player(
        previous_frame: u64,
        delta: u64,
        kind: ActionKind,
        holding: bool,
        player2: bool,
    ) -> Self {
        Self {
            frame: previous_frame + delta,
            kind,
            holding,
            player2,
            seed: 0,
            tps: DEFAULT_TPS,
            delta,
            swift: false,
        }
    }

    /// Seed-changing event (`Restart`, `RestartFull` or `Death`).
    pub fn death(previous_frame: u64, delta: u64, kind: ActionKind, seed: u64) -> Self {
        Self {
            frame: previous_frame + delta,
            kind,
            holding: false,
            player2: false,
            seed,
            tps: DEFAULT_TPS,
            delta,
            swift: false,
        }
    }

    /// Tick-rate change event.
    pub fn tps(previous_frame: u64, delta: u64, tps: f64) -> Self {
        Self {
            frame: previous_frame + delta,
            kind: ActionKind::Tps,
            holding: false,
            player2: false,
            seed: 0,
            tps,
            delta,
            swift: false,
        }
    }

    /// True iff this action travels as a packed player input.
    pub fn is_player(&self) -> bool {
        self.kind.is_player()
    }

    /// Frame difference from the previous action (0 for the first).
    pub fn delta(&self) -> u64 {
        self.delta
    }

    /// Whether this action is half of an elided press-release pair.
    ///
    /// Managed by the encoder and decoder; never set by callers.
    pub fn is_swift(&self) -> bool {
        self.swift
    }

    /// Smallest payload width that fits this action's packed state, as a
    /// log2 byte count in `0..=3`.
    ///
    /// Player states spend 4 low bits on button/player/holding, special
    /// states spend a full byte on bookkeeping, so the delta must fit in
    /// the remaining bits of the chosen width.
    pub fn minimum_size_code(&self) -> u8 {
        let overhead: u64 = if self.is_player() { 4 } else { 8 };
        if self.delta < 1 << overhead {
            0
        } else if self.delta < 1 << (overhead + 8) {
            1
        } else if self.delta < 1 << (overhead + 24) {
            2
        } else {
            3
        }
    }
}

impl PartialEq<u64> for Action {
    fn eq(&self, other: &u64) -> bool {
        self.frame == *other
    }
}

impl PartialOrd<u64> for Action {
    fn partial_cmp(&self, other: &u64) -> Option<std::cmp::Ordering> {
        self.frame.partial_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_chain_frames() {
        let a = Action::player(10, 5, ActionKind::Jump, true, false);
        assert_eq!(a.frame, 15);
        assert_eq!(a.delta(), 5);
        assert!(!a.is_swift());

        let d = Action::death(15, 0, ActionKind::Restart, 42);
        assert_eq!(d.frame, 15);
        assert_eq!(d.seed, 42);

        let t = Action::tps(15, 3, 60.0);
        assert_eq!(t.frame, 18);
        assert_eq!(t.tps, 60.0);
    }

    #[test]
    fn test_is_player() {
        assert!(ActionKind::Jump.is_player());
        assert!(ActionKind::Left.is_player());
        assert!(ActionKind::Right.is_player());
        assert!(!ActionKind::Restart.is_player());
        assert!(!ActionKind::Tps.is_player());

        assert!(ActionKind::Restart.is_seeded());
        assert!(ActionKind::RestartFull.is_seeded());
        assert!(ActionKind::Death.is_seeded());
        assert!(!ActionKind::Jump.is_seeded());
    }

    #[test]
    fn test_minimum_size_code_player() {
        // 4 bits of packing overhead: 1 byte holds deltas below 2^4.
        let code = |delta| Action::player(0, delta, ActionKind::Jump, true, false).minimum_size_code();
        assert_eq!(code(0), 0);
        assert_eq!(code(15), 0);
        assert_eq!(code(16), 1);
        assert_eq!(code((1 << 12) - 1), 1);
        assert_eq!(code(1 << 12), 2);
        assert_eq!(code((1 << 28) - 1), 2);
        assert_eq!(code(1 << 28), 3);
        assert_eq!(code(u64::MAX / 2), 3);
    }

    #[test]
    fn test_minimum_size_code_special() {
        // 8 bits of overhead: the byte thresholds shift up accordingly.
        let code = |delta| Action::death(0, delta, ActionKind::Death, 0).minimum_size_code();
        assert_eq!(code(255), 0);
        assert_eq!(code(256), 1);
        assert_eq!(code((1 << 16) - 1), 1);
        assert_eq!(code(1 << 16), 2);
        assert_eq!(code((1 << 32) - 1), 2);
        assert_eq!(code(1 << 32), 3);
    }

    #[test]
    fn test_ordering_against_raw_frames() {
        let a = Action::player(0, 100, ActionKind::Jump, true, false);
        assert!(a == 100);
        assert!(a < 101);
        assert!(a > 99);
    }
}
