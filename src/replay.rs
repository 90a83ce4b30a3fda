//! Top-level replay container framing
//!
//! A container is `"SLC3RPLY" | u16 meta_size | 64-byte metadata | atoms |
//! 0xCC`. The metadata block has a fixed layout; its trailing 40 bytes are
//! reserved, zeroed on write and ignored on read.

use std::io::{Read, Seek, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::atom::AtomRegistry;
use crate::error::{Result, SlcError};
use crate::{DEFAULT_TPS, FOOTER, MAGIC, METADATA_SIZE};

/// Reserved metadata bytes after the known fields.
const METADATA_RESERVED: usize = 40;

/// Fixed 64-byte metadata block following the container magic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Ticks per second the replay was recorded at.
    pub tps: f64,
    /// Initial RNG seed.
    pub seed: u64,
    /// Recorder-defined checksum of the action stream.
    pub checksum: u32,
    /// Build number of the tool that wrote the file.
    pub build: u32,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            tps: DEFAULT_TPS,
            seed: 0,
            checksum: 0,
            build: 0,
        }
    }
}

impl Metadata {
    fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_f64::<LittleEndian>(self.tps)?;
        out.write_u64::<LittleEndian>(self.seed)?;
        out.write_u32::<LittleEndian>(self.checksum)?;
        out.write_u32::<LittleEndian>(self.build)?;
        out.write_all(&[0u8; METADATA_RESERVED])?;
        Ok(())
    }

    fn read<R: Read>(input: &mut R) -> Result<Self> {
        let tps = input.read_f64::<LittleEndian>()?;
        let seed = input.read_u64::<LittleEndian>()?;
        let checksum = input.read_u32::<LittleEndian>()?;
        let build = input.read_u32::<LittleEndian>()?;

        let mut reserved = [0u8; METADATA_RESERVED];
        input.read_exact(&mut reserved)?;

        Ok(Self {
            tps,
            seed,
            checksum,
            build,
        })
    }
}

/// A complete replay: the metadata block plus the atom region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replay {
    /// Fixed metadata block.
    pub meta: Metadata,
    /// Atoms in write order.
    pub atoms: AtomRegistry,
}

impl Replay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty replay carrying the given metadata block.
    pub fn with_metadata(meta: Metadata) -> Self {
        Self {
            meta,
            atoms: AtomRegistry::new(),
        }
    }

    /// Writes the full container: magic, metadata, atoms, footer.
    ///
    /// The sink must support seeking; atom length prefixes are backfilled
    /// after each payload is written. Buffer into a `Cursor<Vec<u8>>`
    /// first for sinks that cannot seek.
    pub fn write<W: Write + Seek>(&mut self, out: &mut W) -> Result<()> {
        out.write_all(MAGIC)?;
        out.write_u16::<LittleEndian>(METADATA_SIZE)?;
        self.meta.write(out)?;
        self.atoms.write_all(out)?;
        out.write_u8(FOOTER)?;
        Ok(())
    }

    /// Reads and validates a full container.
    pub fn read<R: Read + Seek>(input: &mut R) -> Result<Self> {
        let mut magic = [0u8; MAGIC.len()];
        input.read_exact(&mut magic)?;
        if magic != *MAGIC {
            return Err(SlcError::InvalidHeader);
        }

        let meta_size = input.read_u16::<LittleEndian>()?;
        if meta_size != METADATA_SIZE {
            return Err(SlcError::InvalidMetadataSize(meta_size));
        }

        let meta = Metadata::read(input)?;

        let mut atoms = AtomRegistry::new();
        atoms.read_all(input)?;

        let footer = input.read_u8()?;
        if footer != FOOTER {
            return Err(SlcError::InvalidFooter(footer));
        }

        Ok(Self { meta, atoms })
    }
}
