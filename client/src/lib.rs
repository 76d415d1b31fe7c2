//! # Pong Client Library
//!
//! Client-side implementation of local Pong and the 4-player tournament.
//! Everything here is glue around the `engine` crate: the engine advances
//! state, this crate samples keys, draws frames, and routes results.
//!
//! ## Architecture Overview
//!
//! The client runs a single-threaded cooperative loop driven by the
//! window's per-frame callback. Each tick is one synchronous pass (read
//! input, step the simulation, draw) followed by a yield to the frame
//! scheduler. Nothing else suspends inside a tick, and every way out of a
//! session returns from the loop before another frame is scheduled, so a
//! torn-down match can never keep mutating the screen behind the
//! player's back.
//!
//! ## Module Organization
//!
//! ### Input Module (`input`)
//! Polls the keyboard once per tick: W/S drive the left paddle and
//! ArrowUp/ArrowDown the right one. In AI mode the right paddle's input
//! source is replaced by the engine's opponent controller.
//!
//! ### Session Module (`session`)
//! The lifecycle around one match: consumes a `GameConfig`, drives the
//! tick loop, performs the hard reset on mode switches, reports the
//! finished match once, and returns a completion value to whoever
//! started it, free play or the tournament.
//!
//! ### Rendering Module (`rendering`)
//! Draws the field, paddles, ball, score HUD and result overlays.
//!
//! ### Report Module (`report`)
//! The boundary with the match-history service: the payload type, the
//! reporter trait the session calls, and the logging stand-in shipped
//! with this repository. Reporting is best-effort and never blocks play.
//!
//! ### Menu Module (`menu`)
//! Keyboard-driven screens: home, tournament setup, the bracket view and
//! the champion announcement. Screens return plain choice values; the
//! binary wires them to the engine's bracket state machine.

pub mod input;
pub mod menu;
pub mod rendering;
pub mod report;
pub mod session;
