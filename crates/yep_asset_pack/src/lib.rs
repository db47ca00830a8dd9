//! An asset packing system for 2D games: bundles a resource tree into one
//! `.yep` archive and hands entry bytes back to the engine at runtime.

pub mod pack_io;
