//! # Scoreboard Engine
//!
//! Keeps a sidebar scoreboard and a set of logical teams in sync with the
//! display surfaces of a game host. Callers describe what the board should
//! show (a title and an ordered list of lines, top first) and which viewers
//! belong to which team; the engine works out the minimal set of surface
//! calls that gets every viewer's display there.
//!
//! ## Engines
//!
//! ### Global (`global`)
//! One shared surface for every subscriber, created the first time it is
//! needed. Title and lines come from argument-less suppliers.
//!
//! ### Personal (`personal`)
//! One surface per subscriber, created on subscribe and released on
//! unsubscribe. Title and lines are computed per viewer, and a viewer whose
//! render fails does not hold up anyone else.
//!
//! Both implement [`ScoreboardEngine`], which carries subscription and team
//! management on top of the shared [`Board`] core.
//!
//! ## Rendering
//!
//! Every line is drawn through a positional line team (`line1` at the bottom)
//! whose prefix and suffix hold the text. Lines longer than the split length
//! are cut in their serialized form; lines longer than the platform maximum
//! are rejected. Rendering the same lines again performs no structural
//! changes, and a change in line count rebuilds the body so no stale rows
//! survive.
//!
//! ## Teams
//!
//! Teams are logical groups projected onto every surface the engine serves.
//! Projection only ever adds entries; removing a member explicitly removes
//! its entries, including the display name it had while last online.
//!
//! ## Host integration
//!
//! The host is reached through the traits in [`platform`]. [`memory`] holds a
//! complete in-memory host used by the tests and the demo binary.
//!
//! ## Usage Example
//!
//! ```rust
//! use scoreboard::{GlobalScoreboard, MemoryPlatform, ScoreboardEngine};
//! use shared::Text;
//! use std::rc::Rc;
//!
//! let platform = Rc::new(MemoryPlatform::new());
//! let steve = platform.connect("Steve");
//!
//! let mut board = GlobalScoreboard::new(
//!     Rc::clone(&platform),
//!     || Text::plain("Lobby"),
//!     || vec![Text::plain("Players: 1")],
//! );
//! board.subscribe(steve);
//! board.render().unwrap();
//!
//! let red = board.create_team("red", Text::plain("Red")).unwrap();
//! board.team_mut(red).unwrap().add_member(steve);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod global;
pub mod memory;
pub mod personal;
pub mod platform;
pub mod team;

pub use board::{line_entry_key, Board, BoardId, Readiness};
pub use config::{BoardConfig, TextFormat};
pub use engine::{RenderReport, ScoreboardEngine};
pub use error::{BoardError, Result};
pub use global::GlobalScoreboard;
pub use memory::{MemoryPlatform, MemorySurface, SidebarRow, SurfaceCall};
pub use personal::PersonalScoreboard;
pub use platform::{Objective, Platform, Session, SessionRegistry, Surface, SurfaceId, SurfaceProvider, SurfaceTeam};
pub use team::{Team, TeamId, TeamMut};
