//! Console emulation core.
//!
//! This module contains everything with real state:
//!
//! - **registry**: Fixed command table and input normalization
//! - **line**: Scrollback lines, including the one being typed out
//! - **session**: `Idle`/`Typing` state machine owning the scrollback
//! - **ticker**: Fixed-interval tick source the host uses to drive typing
//!
//! # Architecture
//!
//! ```text
//! ConsoleSession ──borrows──> CommandRegistry
//! ├── Vec<Line> (scrollback)
//! └── Phase (Idle | Typing)
//!
//! Host loop ── Ticker::due() ──> ConsoleSession::tick()
//! ```

pub mod registry;
pub mod line;
pub mod session;
pub mod ticker;
