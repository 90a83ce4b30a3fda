//! SLC3 binary replay container
//!
//! This crate encodes and decodes SLC3 replay files: sequences of
//! frame-timed input events recorded by a game automation tool. The
//! format squeezes long runs of button events through a variable-width,
//! bit-packed section encoding that detects periodic patterns and aligns
//! section counts to powers of two.
//!
//! # File Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Magic "SLC3RPLY" (8 bytes)                     │
//! ├────────────────────────────────────────────────┤
//! │ meta_size: u16 = 64                            │
//! ├────────────────────────────────────────────────┤
//! │ Metadata (64 bytes)                            │
//! │ ├─ tps: f64                                    │
//! │ ├─ seed: u64                                   │
//! │ ├─ checksum: u32                               │
//! │ ├─ build: u32                                  │
//! │ └─ reserved: [u8; 40]                          │
//! ├────────────────────────────────────────────────┤
//! │ Atoms: id u32 | size u64 | payload[size] ...   │
//! ├────────────────────────────────────────────────┤
//! │ Footer 0xCC (1 byte)                           │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! The action atom packs its events into sections: plain `Input` blocks,
//! `Repeat` blocks expanded on decode, and `Special` records for seed and
//! tick-rate changes. Same-frame press-release pairs collapse into single
//! "swift" records. Unknown atom ids are skipped as opaque placeholders,
//! so files from newer tools still load.
//!
//! # Usage
//!
//! ```ignore
//! use std::io::Cursor;
//! use slc_replay::{ActionAtom, ActionKind, Atom, Replay};
//!
//! let mut actions = ActionAtom::new();
//! actions.append_player(49, ActionKind::Jump, true, false)?;
//! actions.append_player(52, ActionKind::Jump, false, false)?;
//! actions.append_tps(100, 240.0)?;
//!
//! let mut replay = Replay::new();
//! replay.atoms.add(Atom::Action(actions));
//!
//! let mut buffer = Cursor::new(Vec::new());
//! replay.write(&mut buffer)?;
//!
//! buffer.set_position(0);
//! let parsed = Replay::read(&mut buffer)?;
//! # Ok::<(), slc_replay::SlcError>(())
//! ```

mod bits;
mod input;
mod section;

pub mod action;
pub mod atom;
pub mod error;
pub mod replay;

pub use action::{Action, ActionKind};
pub use atom::{
    ActionAtom, Atom, AtomFlags, AtomRegistry, Marker, MarkerAtom, NullAtom, ATOM_ID_ACTION,
    ATOM_ID_MARKER, ATOM_ID_NULL,
};
pub use error::{Result, SlcError};
pub use replay::{Metadata, Replay};

// =============================================================================
// Constants
// =============================================================================

/// Container magic, the first eight bytes of every replay file.
pub const MAGIC: &[u8; 8] = b"SLC3RPLY";

/// Trailing byte closing the atom region.
pub const FOOTER: u8 = 0xCC;

/// Length of the fixed metadata block in bytes.
pub const METADATA_SIZE: u16 = 64;

/// Default tick rate carried by metadata and non-TPS actions.
pub const DEFAULT_TPS: f64 = 240.0;
