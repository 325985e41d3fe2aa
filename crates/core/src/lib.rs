//! Domain logic for the KPU utility nodes.
//!
//! Everything in this crate is a pure, per-call transform: grayscale
//! conversion over several image representations and the prompt
//! assemblers (single character, presets, multi-character, scene text).
//! Host-facing schemas and registration live in `kpu-nodes`.

pub mod character;
pub mod error;
pub mod grayscale;
pub mod multi_character;
pub mod preset;
pub mod prompt;
pub mod prompt_generator;
pub mod scene;
