//! MusePack constants

// There are only 4 frequencies defined, but the index is taken from 2 bits of the header
pub(super) const FREQUENCY_TABLE: [u32; 4] = [44100, 48000, 37800, 32000];

// Samples per MPC frame
pub(super) const MPC_FRAME_LENGTH: u64 = 36 * 32;

pub(super) const MPC_MARKER: [u8; 3] = *b"MP+";

/// Profile names, indexed by the upper 4 bits of the profile byte
#[rustfmt::skip]
pub(super) const PROFILES: [&str; 16] = [
	"No profile",
	"Unstable/Experimental",
	"Unused",
	"Unused",
	"Unused",
	"Below Telephone (q=0.0)",
	"Below Telephone (q=1.0)",
	"Telephone (q=2.0)",
	"Thumb (q=3.0)",
	"Radio (q=4.0)",
	"Standard (q=5.0)",
	"Xtreme (q=6.0)",
	"Insane (q=7.0)",
	"BrainDead (q=8.0)",
	"Above BrainDead (q=9.0)",
	"Above BrainDead (q=10.0)",
];
