//! Typed, length-prefixed atom framing
//!
//! The atom region of a replay is a sequence of chunks, each laid out as
//! `id: u32 | size: u64 | payload[size]`, little-endian. The high byte of
//! the size field is reserved for flags; readers mask it off to recover
//! the payload length. Writers do not know payload sizes up front: they
//! reserve the size slot, emit the payload, then seek back and backfill
//! the true byte count.
//!
//! Unknown ids are skipped as opaque [`NullAtom`] placeholders, so files
//! written by newer tools with additional atom kinds still load.

use std::io::{Read, Seek, SeekFrom, Write};

use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind};
use crate::error::{Result, SlcError};
use crate::section::{self, Section};

/// Wire id of the null atom.
pub const ATOM_ID_NULL: u32 = 0;
/// Wire id of the action atom.
pub const ATOM_ID_ACTION: u32 = 1;
/// Wire id of the marker atom.
pub const ATOM_ID_MARKER: u32 = 2;

/// Bits the flag byte occupies at the top of the size field.
const SIZE_FLAG_SHIFT: u32 = 56;
/// Mask recovering the payload length from the size field.
const SIZE_MASK: u64 = (1 << SIZE_FLAG_SHIFT) - 1;

bitflags! {
    /// Flag bits carried in the high byte of an atom's size field.
    ///
    /// No flags are assigned yet. Readers retain whatever bits they find
    /// so future flags survive inspection; writers emit zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AtomFlags: u8 {}
}

/// Placeholder for an atom this decoder does not understand.
///
/// The payload bytes are skipped on read and not re-emitted on write;
/// only the declared length and flag bits are retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullAtom {
    /// Declared payload length of the skipped atom.
    pub size: u64,
    /// Flag bits found in the atom's size field.
    pub flags: AtomFlags,
}

/// The action stream of a replay.
///
/// Actions are appended in frame order through the checked helpers and
/// serialized as packed sections behind a `u64` action count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionAtom {
    actions: Vec<Action>,
}

impl ActionAtom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame of the most recently appended action, 0 when empty.
    fn previous_frame(&self) -> u64 {
        self.actions.last().map_or(0, |a| a.frame)
    }

    fn delta_to(&self, frame: u64) -> Result<u64> {
        let previous = self.previous_frame();
        if frame < previous {
            return Err(SlcError::NonMonotonicFrame { frame, previous });
        }
        Ok(frame - previous)
    }

    /// Appends a button press or release. Only `Jump`, `Left` and `Right`
    /// are accepted.
    pub fn append_player(
        &mut self,
        frame: u64,
        kind: ActionKind,
        holding: bool,
        player2: bool,
    ) -> Result<()> {
        if !kind.is_player() {
            return Err(SlcError::InvalidActionKind(kind));
        }
        let previous = self.previous_frame();
        let delta = self.delta_to(frame)?;
        self.actions
            .push(Action::player(previous, delta, kind, holding, player2));
        Ok(())
    }

    /// Appends a seed-changing event. Only `Restart`, `RestartFull` and
    /// `Death` are accepted.
    pub fn append_death(&mut self, frame: u64, kind: ActionKind, seed: u64) -> Result<()> {
        if !kind.is_seeded() {
            return Err(SlcError::InvalidActionKind(kind));
        }
        let previous = self.previous_frame();
        let delta = self.delta_to(frame)?;
        self.actions.push(Action::death(previous, delta, kind, seed));
        Ok(())
    }

    /// Appends a tick-rate change. `tps` must be positive.
    pub fn append_tps(&mut self, frame: u64, tps: f64) -> Result<()> {
        if tps <= 0.0 {
            return Err(SlcError::InvalidTps(tps));
        }
        let previous = self.previous_frame();
        let delta = self.delta_to(frame)?;
        self.actions.push(Action::tps(previous, delta, tps));
        Ok(())
    }

    /// Removes every action at or after `frame`.
    pub fn clip(&mut self, frame: u64) {
        self.actions.retain(|a| a.frame < frame);
    }

    /// Decoded or appended actions, in frame order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Writes the action count and the packed sections.
    fn write_payload<W: Write>(&mut self, out: &mut W) -> Result<()> {
        out.write_u64::<LittleEndian>(self.actions.len() as u64)?;
        for section in section::pack(&mut self.actions) {
            section.write(out)?;
        }
        Ok(())
    }

    /// Reads sections until the declared action count is reconstructed.
    fn read_payload<R: Read>(input: &mut R, _size: u64) -> Result<Self> {
        let count = input.read_u64::<LittleEndian>()?;
        let mut actions = Vec::with_capacity(count.min(1 << 16) as usize);
        while (actions.len() as u64) < count {
            Section::read(input, &mut actions)?;
        }
        Ok(Self { actions })
    }
}

/// A named frame bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Frame the marker points at.
    pub frame: u64,
    /// Human-readable label, at most 65535 bytes of UTF-8.
    pub label: String,
}

/// Named frame bookmarks for navigation in editor tooling.
///
/// Wire layout: `u64 count`, then per marker `u64 frame | u16 label_len |
/// label bytes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerAtom {
    markers: Vec<Marker>,
}

impl MarkerAtom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bookmark at `frame`.
    pub fn add_marker(&mut self, frame: u64, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        if label.len() > usize::from(u16::MAX) {
            return Err(SlcError::MarkerLabelTooLong);
        }
        self.markers.push(Marker { frame, label });
        Ok(())
    }

    /// Markers in insertion order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn write_payload<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_u64::<LittleEndian>(self.markers.len() as u64)?;
        for marker in &self.markers {
            out.write_u64::<LittleEndian>(marker.frame)?;
            out.write_u16::<LittleEndian>(marker.label.len() as u16)?;
            out.write_all(marker.label.as_bytes())?;
        }
        Ok(())
    }

    fn read_payload<R: Read>(input: &mut R, size: u64) -> Result<Self> {
        let count = input.read_u64::<LittleEndian>()?;
        let mut consumed = 8u64;
        let mut markers = Vec::new();

        for _ in 0..count {
            if consumed + 10 > size {
                return Err(SlcError::Truncated);
            }
            let frame = input.read_u64::<LittleEndian>()?;
            let label_len = u64::from(input.read_u16::<LittleEndian>()?);
            consumed += 10;

            if consumed + label_len > size {
                return Err(SlcError::Truncated);
            }
            let mut bytes = vec![0u8; label_len as usize];
            input.read_exact(&mut bytes)?;
            consumed += label_len;

            let label = String::from_utf8(bytes).map_err(|_| SlcError::InvalidMarkerLabel)?;
            markers.push(Marker { frame, label });
        }

        Ok(Self { markers })
    }
}

/// One typed chunk in the replay's atom region.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Skipped unknown or explicitly-null atom.
    Null(NullAtom),
    /// The action stream.
    Action(ActionAtom),
    /// Named frame bookmarks.
    Marker(MarkerAtom),
}

impl Atom {
    /// Wire id this atom serializes under.
    pub fn id(&self) -> u32 {
        match self {
            Atom::Null(_) => ATOM_ID_NULL,
            Atom::Action(_) => ATOM_ID_ACTION,
            Atom::Marker(_) => ATOM_ID_MARKER,
        }
    }

    fn write_payload<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self {
            // An unknown atom's payload was skipped on read; there is
            // nothing to re-emit.
            Atom::Null(_) => Ok(()),
            Atom::Action(atom) => atom.write_payload(out),
            Atom::Marker(atom) => atom.write_payload(out),
        }
    }
}

/// Ordered collection of atoms, serialized back to back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomRegistry {
    atoms: Vec<Atom>,
}

impl AtomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom; atoms serialize in insertion order.
    pub fn add(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// All atoms in insertion order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// First action atom in the registry, if any.
    pub fn action_atom(&self) -> Option<&ActionAtom> {
        self.atoms.iter().find_map(|atom| match atom {
            Atom::Action(atom) => Some(atom),
            _ => None,
        })
    }

    /// Mutable access to the first action atom, if any.
    pub fn action_atom_mut(&mut self) -> Option<&mut ActionAtom> {
        self.atoms.iter_mut().find_map(|atom| match atom {
            Atom::Action(atom) => Some(atom),
            _ => None,
        })
    }

    /// Writes every atom with its id and a backfilled length prefix.
    pub(crate) fn write_all<W: Write + Seek>(&mut self, out: &mut W) -> Result<()> {
        for atom in &mut self.atoms {
            write_atom(out, atom)?;
        }
        Ok(())
    }

    /// Reads atoms until one byte before the end of the stream; the
    /// footer byte is outside the atom region.
    pub(crate) fn read_all<R: Read + Seek>(&mut self, input: &mut R) -> Result<()> {
        let position = input.stream_position()?;
        let end = input.seek(SeekFrom::End(0))?;
        input.seek(SeekFrom::Start(position))?;
        if end == 0 {
            return Err(SlcError::Truncated);
        }
        let atoms_end = end - 1;

        let mut cursor = position;
        while cursor < atoms_end {
            let atom = read_atom(input, atoms_end)?;
            self.atoms.push(atom);
            cursor = input.stream_position()?;
        }
        Ok(())
    }
}

/// Writes `id`, reserves the size slot, delegates to the payload writer,
/// then backfills the slot with the payload byte count.
fn write_atom<W: Write + Seek>(out: &mut W, atom: &mut Atom) -> Result<()> {
    out.write_u32::<LittleEndian>(atom.id())?;

    let slot = out.stream_position()?;
    out.write_u64::<LittleEndian>(0)?;

    let start = out.stream_position()?;
    atom.write_payload(out)?;
    let end = out.stream_position()?;

    out.seek(SeekFrom::Start(slot))?;
    out.write_u64::<LittleEndian>(end - start)?;
    out.seek(SeekFrom::Start(end))?;
    Ok(())
}

/// Reads one atom, skipping ids this decoder does not know.
fn read_atom<R: Read + Seek>(input: &mut R, atoms_end: u64) -> Result<Atom> {
    let id = input.read_u32::<LittleEndian>()?;
    let raw_size = input.read_u64::<LittleEndian>()?;
    let flags = AtomFlags::from_bits_retain((raw_size >> SIZE_FLAG_SHIFT) as u8);
    let size = raw_size & SIZE_MASK;

    let position = input.stream_position()?;
    if position + size > atoms_end {
        return Err(SlcError::Truncated);
    }

    let atom = match id {
        ATOM_ID_ACTION => Atom::Action(ActionAtom::read_payload(input, size)?),
        ATOM_ID_MARKER => Atom::Marker(MarkerAtom::read_payload(input, size)?),
        // Null atoms and unknown ids alike are skipped as opaque holes.
        _ => {
            input.seek(SeekFrom::Current(size as i64))?;
            Atom::Null(NullAtom { size, flags })
        }
    };
    Ok(atom)
}
