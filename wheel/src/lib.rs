//! Spin-the-wheel engine for picking a random winner from a list of names.
//!
//! This crate is compiled to WebAssembly for the browser and linked natively
//! by the command-line runner. The core is pure and clock-free: geometry is a
//! function of the entry list, and the spin engine advances only when handed
//! a frame ticket and a timestamp. Hosts supply frame scheduling, sound, and
//! randomness through small traits and act on the [`driver::WheelEvent`]s the
//! driver returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Segment angles, sector paths, label placement |
//! | [`spin`] | Rotation state, easing, tick detection, winner resolution |
//! | [`driver`] | Testable [`driver::WheelDriver`] wiring the engine to its capabilities |
//! | [`frame`] | Frame tickets, the scheduler trait, manual frames and a virtual clock |
//! | [`sound`] | Sound capability trait |
//! | [`random`] | Landing offset sources |
//! | [`roster`] | Entry list parsing, capping, dedupe, winner removal |
//! | [`settings`] | Spin duration and sound/removal toggles |
//! | [`web`] | `wasm-bindgen` exports and `requestAnimationFrame` scheduling |
//! | [`audio`] | Web Audio tones and speech announcements |
//! | [`consts`] | Shared constants (turn count, limits, palette) |

pub mod audio;
pub mod consts;
pub mod driver;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod random;
pub mod roster;
pub mod settings;
pub mod sound;
pub mod spin;
pub mod web;
