//! On-wire section encoding
//!
//! Actions travel in three section variants, each opened by a packed
//! 16-bit little-endian header whose top two bits select the variant:
//!
//! ```text
//! Input    00 SS CCCC RRRRRRRR        SS = payload width (2^SS bytes)
//! Repeat   01 SS CCCC PPPPP RRR       CCCC = input count (2^CCCC)
//! Special  10 TTTT SS RRRRRRRR        PPPPP = repeats (2^PPPPP)
//!                                     TTTT = special type, R = reserved
//! ```
//!
//! `Input` carries `2^count_exp` packed player states. `Repeat` carries
//! one prototype block that the decoder replays `2^repeats_exp` times.
//! `Special` carries a variable-width frame delta plus a fixed 8-byte
//! payload (RNG seed or tick rate).
//!
//! The packer walks the action stream, grouping player actions into
//! power-of-two runs that share one payload width, eliding same-frame
//! press-release pairs ("swifts") into single records, and handing each
//! run to a repeat scanner that factors out periodic patterns.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::action::{Action, ActionKind};
use crate::bits::{exponent_of_two, largest_power_of_two};
use crate::error::{Result, SlcError};
use crate::input::{Button, PlayerInput};

/// Section identifiers, the top two bits of every header.
const ID_INPUT: u16 = 0b00;
const ID_REPEAT: u16 = 0b01;
const ID_SPECIAL: u16 = 0b10;

/// Largest cluster the repeat scanner considers, in packed inputs.
const MAX_CLUSTER: usize = 64;

/// Hard cap on inputs joined into one candidate run.
const MAX_RUN_INPUTS: u64 = 1 << 16;

/// Wire code of a special section, bits 13..10 of its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpecialKind {
    Restart = 0,
    RestartFull = 1,
    Death = 2,
    Tps = 3,
}

impl SpecialKind {
    fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(Self::Restart),
            1 => Ok(Self::RestartFull),
            2 => Ok(Self::Death),
            3 => Ok(Self::Tps),
            other => Err(SlcError::InvalidSpecialType(other)),
        }
    }

    fn kind(self) -> ActionKind {
        match self {
            Self::Restart => ActionKind::Restart,
            Self::RestartFull => ActionKind::RestartFull,
            Self::Death => ActionKind::Death,
            Self::Tps => ActionKind::Tps,
        }
    }
}

/// Fixed 8-byte payload of a special section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SpecialPayload {
    Seed(u64),
    Tps(f64),
}

/// One on-wire grouping of actions.
///
/// Every `Input` and `Repeat` section holds an exact power of two of
/// packed inputs, at most `2^15`; `delta_size` selects a payload width of
/// `2^delta_size` bytes per input.
#[derive(Debug, Clone)]
pub(crate) enum Section {
    Input {
        delta_size: u8,
        count_exp: u8,
        inputs: Vec<PlayerInput>,
    },
    Repeat {
        delta_size: u8,
        count_exp: u8,
        repeats_exp: u8,
        inputs: Vec<PlayerInput>,
    },
    Special {
        delta_size: u8,
        kind: SpecialKind,
        delta: u64,
        payload: SpecialPayload,
    },
}

impl Section {
    /// Builds the special section for a non-player action.
    fn special(action: &Action) -> Self {
        let (kind, payload) = match action.kind {
            ActionKind::Restart => (SpecialKind::Restart, SpecialPayload::Seed(action.seed)),
            ActionKind::RestartFull => {
                (SpecialKind::RestartFull, SpecialPayload::Seed(action.seed))
            }
            ActionKind::Death => (SpecialKind::Death, SpecialPayload::Seed(action.seed)),
            ActionKind::Tps => (SpecialKind::Tps, SpecialPayload::Tps(action.tps)),
            // The packer only routes non-player actions here.
            ActionKind::Jump | ActionKind::Left | ActionKind::Right => {
                unreachable!("player action routed to special section")
            }
        };

        Section::Special {
            delta_size: action.minimum_size_code(),
            kind,
            delta: action.delta(),
            payload,
        }
    }

    /// Encoded size in bytes, header included.
    pub(crate) fn encoded_len(&self) -> u64 {
        match self {
            Section::Input {
                delta_size, inputs, ..
            }
            | Section::Repeat {
                delta_size, inputs, ..
            } => 2 + inputs.len() as u64 * (1u64 << delta_size),
            Section::Special { delta_size, .. } => 2 + (1u64 << delta_size) + 8,
        }
    }

    /// Writes the packed header and payload.
    pub(crate) fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Section::Input {
                delta_size,
                count_exp,
                inputs,
            } => {
                let header = (ID_INPUT << 14)
                    | (u16::from(*delta_size) << 12)
                    | (u16::from(*count_exp) << 8);
                out.write_u16::<LittleEndian>(header)?;
                write_states(out, inputs, *delta_size)?;
            }
            Section::Repeat {
                delta_size,
                count_exp,
                repeats_exp,
                inputs,
            } => {
                let header = (ID_REPEAT << 14)
                    | (u16::from(*delta_size) << 12)
                    | (u16::from(*count_exp) << 8)
                    | (u16::from(*repeats_exp) << 3);
                out.write_u16::<LittleEndian>(header)?;
                write_states(out, inputs, *delta_size)?;
            }
            Section::Special {
                delta_size,
                kind,
                delta,
                payload,
            } => {
                let header =
                    (ID_SPECIAL << 14) | ((*kind as u16) << 10) | (u16::from(*delta_size) << 8);
                out.write_u16::<LittleEndian>(header)?;
                out.write_uint::<LittleEndian>(*delta, 1usize << delta_size)?;
                match payload {
                    SpecialPayload::Seed(seed) => out.write_u64::<LittleEndian>(*seed)?,
                    SpecialPayload::Tps(tps) => out.write_f64::<LittleEndian>(*tps)?,
                }
            }
        }
        Ok(())
    }

    /// Reads one section, appending the decoded actions.
    pub(crate) fn read<R: Read>(input: &mut R, actions: &mut Vec<Action>) -> Result<()> {
        let header = input.read_u16::<LittleEndian>()?;
        match header >> 14 {
            ID_INPUT => {
                let delta_size = ((header >> 12) & 0b11) as u8;
                let count = 1u64 << ((header >> 8) & 0b1111);
                let width = 1usize << delta_size;

                for _ in 0..count {
                    let state = input.read_uint::<LittleEndian>(width)?;
                    let previous = actions.last().map_or(0, |a| a.frame);
                    emit(actions, &PlayerInput::from_state(previous, state));
                }
            }
            ID_REPEAT => {
                let delta_size = ((header >> 12) & 0b11) as u8;
                let count = 1u64 << ((header >> 8) & 0b1111);
                let repeats = 1u64 << ((header >> 3) & 0b11111);
                let width = 1usize << delta_size;

                // The prototype block chains frames off its own start;
                // each emission below re-chains off the output's tail.
                let mut block = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let state = input.read_uint::<LittleEndian>(width)?;
                    let previous = block.last().map_or(0, |p: &PlayerInput| p.frame);
                    block.push(PlayerInput::from_state(previous, state));
                }

                for _ in 0..repeats {
                    for prototype in &block {
                        emit(actions, prototype);
                    }
                }
            }
            ID_SPECIAL => {
                let kind = SpecialKind::from_bits(((header >> 10) & 0b1111) as u8)?;
                let delta_size = ((header >> 8) & 0b11) as u8;
                let delta = input.read_uint::<LittleEndian>(1usize << delta_size)?;
                let previous = actions.last().map_or(0, |a| a.frame);

                let action = match kind {
                    SpecialKind::Tps => {
                        Action::tps(previous, delta, input.read_f64::<LittleEndian>()?)
                    }
                    _ => Action::death(
                        previous,
                        delta,
                        kind.kind(),
                        input.read_u64::<LittleEndian>()?,
                    ),
                };
                actions.push(action);
            }
            id => return Err(SlcError::InvalidSection(id as u8)),
        }
        Ok(())
    }
}

fn write_states<W: Write>(out: &mut W, inputs: &[PlayerInput], delta_size: u8) -> Result<()> {
    let width = 1usize << delta_size;
    for input in inputs {
        out.write_uint::<LittleEndian>(input.prepare_state(width as u8), width)?;
    }
    Ok(())
}

/// Appends the actions for one packed input, expanding the synthetic
/// swift code into its press-release pair.
fn emit(actions: &mut Vec<Action>, input: &PlayerInput) {
    let previous = actions.last().map_or(0, |a| a.frame);
    if input.button == Button::Swift {
        let mut press = Action::player(previous, input.delta, ActionKind::Jump, true, input.player2);
        press.swift = true;
        let frame = press.frame;
        actions.push(press);

        let mut release = Action::player(frame, 0, ActionKind::Jump, false, input.player2);
        release.swift = true;
        actions.push(release);
    } else {
        actions.push(Action::player(
            previous,
            input.delta,
            input.button.kind(),
            input.holding,
            input.player2,
        ));
    }
}

/// Groups ordered actions into sections.
///
/// Non-player actions each become one special section. Player actions are
/// gathered into the longest run sharing one payload width, cut back to a
/// power of two of surviving records, and passed through the repeat
/// scanner. Swift flags are written back onto the actions so callers can
/// see which pairs were elided.
pub(crate) fn pack(actions: &mut [Action]) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut i = 0;

    while i < actions.len() {
        if !actions[i].is_player() {
            sections.push(Section::special(&actions[i]));
            i += 1;
            continue;
        }

        let start = i;
        let min_size = actions[i].minimum_size_code();
        let mut pure_count: u64 = 1;
        let mut swifts: u64 = 0;
        let mut pure_swifts: u64 = 0;

        while i + 1 < actions.len()
            && pure_count < MAX_RUN_INPUTS
            && actions[i + 1].is_player()
            && actions[i + 1].minimum_size_code() == min_size
        {
            i += 1;
            if swift_pair(actions, i) {
                actions[i - 1].swift = true;
                actions[i].swift = true;
                swifts += 1;
            } else {
                pure_count += 1;
            }
            // Swifts observed while the record count sits on a power of
            // two ride along for free: they are elided from the payload.
            if largest_power_of_two(pure_count) == pure_count {
                pure_swifts = swifts;
            }
        }

        let count = largest_power_of_two(pure_count);
        i = start + (count + pure_swifts) as usize;

        // The release half of each swift pair vanishes here; the press
        // half survives and packs as the Swift button code.
        let inputs: Vec<PlayerInput> = actions[start..i]
            .iter()
            .filter(|a| a.holding || !a.is_swift())
            .map(PlayerInput::from_action)
            .collect();

        sections.extend(run_length_encode(inputs, min_size));
    }

    sections
}

/// True when `actions[at]` closes a press-release pair on the same frame:
/// a jump release at delta 0 whose predecessor is a hold for the same
/// player.
fn swift_pair(actions: &[Action], at: usize) -> bool {
    let (prev, cur) = (&actions[at - 1], &actions[at]);
    cur.delta() == 0
        && !cur.holding
        && prev.holding
        && prev.player2 == cur.player2
        && prev.kind == cur.kind
        && cur.kind == ActionKind::Jump
}

/// Splits a candidate run into repeat and input sections.
///
/// At each position the scanner tries power-of-two cluster sizes up to
/// [`MAX_CLUSTER`], extends each over consecutive equal blocks, and keeps
/// the candidate avoiding the most packed records: `cluster * (repeats -
/// 1)`. Ties keep the smaller cluster. Positions no winner covers buffer
/// up and flush as power-of-two input sections.
fn run_length_encode(inputs: Vec<PlayerInput>, delta_size: u8) -> Vec<Section> {
    let total = inputs.len();
    let mut sections = Vec::new();
    let mut free: Vec<PlayerInput> = Vec::new();
    let mut idx = 0;

    while idx < total {
        let mut best: Option<(usize, usize)> = None;
        let mut best_score = 0u64;

        let mut cluster = 1;
        while cluster <= MAX_CLUSTER {
            if idx + cluster >= total {
                break;
            }

            let mut offset = 1;
            while (offset as u64) < MAX_RUN_INPUTS
                && idx + (offset + 1) * cluster <= total
                && blocks_equal(&inputs, idx, idx + offset * cluster, cluster)
            {
                offset += 1;
            }

            let repeats = largest_power_of_two(offset as u64) as usize;
            if repeats > 1 {
                let score = (cluster * (repeats - 1)) as u64;
                if score > best_score {
                    best = Some((cluster, repeats));
                    best_score = score;
                }
            }

            cluster *= 2;
        }

        match best {
            Some((cluster, repeats)) => {
                flush_free(&mut sections, &mut free, delta_size);
                sections.push(Section::Repeat {
                    delta_size,
                    count_exp: exponent_of_two(cluster as u64) as u8,
                    repeats_exp: exponent_of_two(repeats as u64) as u8,
                    inputs: inputs[idx..idx + cluster].to_vec(),
                });
                idx += cluster * repeats;
            }
            None => {
                free.push(inputs[idx]);
                idx += 1;
            }
        }
    }

    flush_free(&mut sections, &mut free, delta_size);
    sections
}

/// Compares the `cluster` inputs at `a` against those at `b`.
fn blocks_equal(inputs: &[PlayerInput], a: usize, b: usize, cluster: usize) -> bool {
    (0..cluster).all(|k| inputs[a + k].weak_eq(&inputs[b + k]))
}

/// Drains the unrepeated buffer as input sections, largest power-of-two
/// prefix first.
fn flush_free(sections: &mut Vec<Section>, free: &mut Vec<PlayerInput>, delta_size: u8) {
    let mut at = 0;
    while at < free.len() {
        let take = largest_power_of_two((free.len() - at) as u64) as usize;
        sections.push(Section::Input {
            delta_size,
            count_exp: exponent_of_two(take as u64) as u8,
            inputs: free[at..at + take].to_vec(),
        });
        at += take;
    }
    free.clear();
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn jump(previous: u64, delta: u64, holding: bool) -> Action {
        Action::player(previous, delta, ActionKind::Jump, holding, false)
    }

    fn decode_all(bytes: &[u8], expected: usize) -> Vec<Action> {
        let mut cursor = Cursor::new(bytes);
        let mut actions = Vec::new();
        while actions.len() < expected {
            Section::read(&mut cursor, &mut actions).unwrap();
        }
        actions
    }

    fn encode_all(sections: &[Section]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for section in sections {
            section.write(&mut bytes).unwrap();
        }
        bytes
    }

    #[test]
    fn test_single_jump_wire_bytes() {
        let mut actions = vec![jump(0, 5, true)];
        let sections = pack(&mut actions);
        assert_eq!(sections.len(), 1);

        let bytes = encode_all(&sections);
        // Header: id 00, width code 0, count exponent 0. One state byte:
        // (5 << 4) | (Jump << 2) | holding.
        assert_eq!(bytes, vec![0x00, 0x00, 0x55]);

        let decoded = decode_all(&bytes, 1);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].frame, 5);
        assert_eq!(decoded[0].kind, ActionKind::Jump);
        assert!(decoded[0].holding);
    }

    #[test]
    fn test_swift_pair_elides_to_one_record() {
        let mut actions = vec![jump(0, 10, true), jump(10, 0, false)];
        let sections = pack(&mut actions);

        // Both halves end up marked.
        assert!(actions[0].is_swift());
        assert!(actions[1].is_swift());

        assert_eq!(sections.len(), 1);
        match &sections[0] {
            Section::Input { inputs, count_exp, .. } => {
                assert_eq!(*count_exp, 0);
                assert_eq!(inputs.len(), 1);
                assert_eq!(inputs[0].button, Button::Swift);
            }
            other => panic!("expected input section, got {other:?}"),
        }

        // (10 << 4) | (Swift << 2) | holding
        let bytes = encode_all(&sections);
        assert_eq!(bytes, vec![0x00, 0x00, 0xA1]);

        let decoded = decode_all(&bytes, 2);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].frame, 10);
        assert!(decoded[0].holding && decoded[0].is_swift());
        assert_eq!(decoded[1].frame, 10);
        assert!(!decoded[1].holding && decoded[1].is_swift());
        assert_eq!(decoded[1].delta(), 0);
    }

    #[test]
    fn test_sixteen_identical_inputs_become_one_repeat() {
        let mut actions = Vec::new();
        for frame in 1..=16 {
            actions.push(jump(frame - 1, 1, true));
        }

        let sections = pack(&mut actions);
        assert_eq!(sections.len(), 1);
        match &sections[0] {
            Section::Repeat {
                count_exp,
                repeats_exp,
                inputs,
                ..
            } => {
                assert_eq!(*count_exp, 0);
                assert_eq!(*repeats_exp, 4);
                assert_eq!(inputs.len(), 1);
            }
            other => panic!("expected repeat section, got {other:?}"),
        }

        // One header word plus one data byte.
        let bytes = encode_all(&sections);
        assert_eq!(bytes.len(), 3);

        let decoded = decode_all(&bytes, 16);
        assert_eq!(decoded.len(), 16);
        for (i, action) in decoded.iter().enumerate() {
            assert_eq!(action.frame, i as u64 + 1);
            assert_eq!(action.delta(), 1);
            assert!(action.holding);
        }
    }

    #[test]
    fn test_mixed_width_run_splits() {
        // The third action needs two payload bytes, so it cannot join the
        // surrounding one-byte runs.
        let mut actions = vec![
            jump(0, 1, true),
            jump(1, 1, false),
            jump(2, 1000, true),
            jump(1002, 1, false),
        ];

        let sections = pack(&mut actions);
        assert_eq!(sections.len(), 3);
        match &sections[0] {
            Section::Input {
                delta_size, inputs, ..
            } => {
                assert_eq!(*delta_size, 0);
                assert_eq!(inputs.len(), 2);
            }
            other => panic!("expected input section, got {other:?}"),
        }
        match &sections[1] {
            Section::Input {
                delta_size, inputs, ..
            } => {
                assert_eq!(*delta_size, 1);
                assert_eq!(inputs.len(), 1);
            }
            other => panic!("expected input section, got {other:?}"),
        }
        match &sections[2] {
            Section::Input {
                delta_size, inputs, ..
            } => {
                assert_eq!(*delta_size, 0);
                assert_eq!(inputs.len(), 1);
            }
            other => panic!("expected input section, got {other:?}"),
        }

        let bytes = encode_all(&sections);
        let decoded = decode_all(&bytes, 4);
        assert_eq!(decoded.len(), 4);
        assert_eq!(
            decoded.iter().map(|a| a.frame).collect::<Vec<_>>(),
            vec![1, 2, 1002, 1003]
        );
    }

    #[test]
    fn test_alternating_pattern_repeats_as_cluster() {
        // hold/release alternation: no single input repeats, but the
        // two-input cluster does.
        let mut actions = Vec::new();
        let mut frame = 0;
        for _ in 0..4 {
            actions.push(jump(frame, 2, true));
            frame += 2;
            actions.push(jump(frame, 2, false));
            frame += 2;
        }

        let sections = pack(&mut actions);
        assert_eq!(sections.len(), 1);
        match &sections[0] {
            Section::Repeat {
                count_exp,
                repeats_exp,
                inputs,
                ..
            } => {
                assert_eq!(*count_exp, 1);
                assert_eq!(*repeats_exp, 2);
                assert_eq!(inputs.len(), 2);
            }
            other => panic!("expected repeat section, got {other:?}"),
        }

        let bytes = encode_all(&sections);
        let decoded = decode_all(&bytes, 8);
        assert_eq!(decoded.len(), 8);
        for (i, action) in decoded.iter().enumerate() {
            assert_eq!(action.frame, 2 * (i as u64 + 1));
            assert_eq!(action.holding, i % 2 == 0);
        }
    }

    #[test]
    fn test_free_buffer_flushes_as_power_of_two_prefixes() {
        // Five pairwise-distinct inputs: nothing repeats, so the buffer
        // flushes as 4 + 1.
        let inputs: Vec<PlayerInput> = (1..=5)
            .map(|delta| PlayerInput::from_action(&jump(0, delta, true)))
            .collect();

        let sections = run_length_encode(inputs, 0);
        assert_eq!(sections.len(), 2);
        match (&sections[0], &sections[1]) {
            (
                Section::Input { inputs: a, .. },
                Section::Input { inputs: b, .. },
            ) => {
                assert_eq!(a.len(), 4);
                assert_eq!(b.len(), 1);
            }
            other => panic!("expected two input sections, got {other:?}"),
        }
    }

    #[test]
    fn test_swift_inside_pure_run_rides_along() {
        // pure, hold, release, pure, pure: the pair is elided and the four
        // surviving records stay one section.
        let mut actions = vec![
            jump(0, 1, true),
            jump(1, 1, true),
            jump(2, 0, false),
            jump(2, 1, false),
            jump(3, 1, true),
        ];

        let sections = pack(&mut actions);
        assert_eq!(sections.len(), 1);
        match &sections[0] {
            Section::Input { inputs, count_exp, .. } => {
                assert_eq!(inputs.len(), 4);
                assert_eq!(*count_exp, 2);
            }
            other => panic!("expected input section, got {other:?}"),
        }

        let bytes = encode_all(&sections);
        let decoded = decode_all(&bytes, 5);
        assert_eq!(decoded.len(), 5);
        assert_eq!(
            decoded.iter().map(|a| a.frame).collect::<Vec<_>>(),
            vec![1, 2, 2, 3, 4]
        );
        assert!(decoded[1].is_swift() && decoded[2].is_swift());
    }

    #[test]
    fn test_special_sections_round_trip() {
        let mut actions = vec![
            Action::tps(0, 0, 60.0),
            Action::death(0, 120, ActionKind::Restart, 0xDEAD_BEEF),
        ];

        let sections = pack(&mut actions);
        assert_eq!(sections.len(), 2);
        assert!(matches!(
            sections[0],
            Section::Special {
                kind: SpecialKind::Tps,
                ..
            }
        ));
        assert!(matches!(
            sections[1],
            Section::Special {
                kind: SpecialKind::Restart,
                ..
            }
        ));

        let bytes = encode_all(&sections);
        let decoded = decode_all(&bytes, 2);
        assert_eq!(decoded[0].kind, ActionKind::Tps);
        assert_eq!(decoded[0].tps, 60.0);
        assert_eq!(decoded[0].frame, 0);
        assert_eq!(decoded[1].kind, ActionKind::Restart);
        assert_eq!(decoded[1].seed, 0xDEAD_BEEF);
        assert_eq!(decoded[1].frame, 120);
    }

    #[test]
    fn test_wide_special_delta() {
        // A delta above 2^32 needs the full 8-byte width.
        let mut actions = vec![Action::death(0, 1 << 40, ActionKind::Death, 7)];
        let sections = pack(&mut actions);
        assert_eq!(sections[0].encoded_len(), 2 + 8 + 8);

        let bytes = encode_all(&sections);
        let decoded = decode_all(&bytes, 1);
        assert_eq!(decoded[0].frame, 1 << 40);
        assert_eq!(decoded[0].seed, 7);
    }

    #[test]
    fn test_encoded_len_matches_wire() {
        let mut actions = vec![
            jump(0, 1, true),
            jump(1, 1, false),
            Action::tps(2, 1, 144.0),
        ];
        let sections = pack(&mut actions);
        let bytes = encode_all(&sections);
        let total: u64 = sections.iter().map(Section::encoded_len).sum();
        assert_eq!(total, bytes.len() as u64);
    }

    #[test]
    fn test_reserved_identifier_rejected() {
        let mut actions = Vec::new();
        let err = Section::read(&mut Cursor::new([0xFF, 0xFF]), &mut actions).unwrap_err();
        assert!(matches!(err, SlcError::InvalidSection(0b11)));
    }

    #[test]
    fn test_unknown_special_type_rejected() {
        // id 10, special type 9, width code 0.
        let header: u16 = (ID_SPECIAL << 14) | (9 << 10);
        let mut actions = Vec::new();
        let err = Section::read(&mut Cursor::new(header.to_le_bytes()), &mut actions).unwrap_err();
        assert!(matches!(err, SlcError::InvalidSpecialType(9)));
    }

    #[test]
    fn test_truncated_section_payload() {
        // Input section declaring four states but carrying one byte.
        let header: u16 = 2 << 8;
        let mut bytes = header.to_le_bytes().to_vec();
        bytes.push(0x11);

        let mut actions = Vec::new();
        let err = Section::read(&mut Cursor::new(bytes), &mut actions).unwrap_err();
        assert!(matches!(err, SlcError::Truncated));
    }
}
