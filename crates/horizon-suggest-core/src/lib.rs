//! Core systems for Horizon Suggest.
//!
//! This crate provides the foundational components of the Horizon Suggest
//! popup engine:
//!
//! - **Signal/Slot System**: Type-safe notification of the host widget
//! - **Timeouts**: One-shot armed deadlines for deferred UI actions
//! - **Geometry**: Plain 2D point/size/rectangle types
//!
//! The engine is single-threaded, cooperative, event-loop driven UI state;
//! signals here invoke their slots directly on the calling thread.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_suggest_core::Signal;
//!
//! // Create a signal that notifies when a suggestion is chosen
//! let chosen = Signal::<String>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = chosen.connect(|text| {
//!     println!("Chosen: {}", text);
//! });
//!
//! // Emit the signal
//! chosen.emit("@john".to_string());
//!
//! // Disconnect when done
//! chosen.disconnect(conn_id);
//! ```

mod geometry;
mod signal;
mod timeout;

pub use geometry::{Point, Rect, Size};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timeout::Timeout;
