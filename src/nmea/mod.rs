// src/nmea/mod.rs
//! NMEA sentence decoding and field normalization

pub mod coords;
pub mod sentence;
pub mod time;

pub use sentence::{decode, decode_sentence, FixKind};
