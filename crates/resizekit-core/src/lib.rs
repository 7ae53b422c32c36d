//! resizekit Core Library
//!
//! Platform-agnostic resize handles for an embedded image in a rich-text
//! editing surface: four corner handles, a drag state machine that rewrites
//! the target's width, a drag cursor, and debounced re-layout on viewport
//! changes. Hosts plug in through [`ResizeHost`].

pub mod config;
pub mod cursor;
pub mod debounce;
pub mod events;
pub mod handles;
pub mod host;
pub mod input;
pub mod module;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, Dimension, HandleStyle, ResizeConfig};
pub use cursor::{CursorManager, CursorStyle};
pub use debounce::{Debouncer, Instant};
pub use events::{EventBus, SubscriptionId, Topic};
pub use handles::{Corner, EdgeInsets, HandleSet, HandleWidget};
pub use host::{ResizeHost, TargetElement};
pub use input::{MouseInput, MouseKind, PointerEvent, PointerPhase, PointerSource, RawInput, TouchInput, TouchKind};
pub use module::{InputTarget, ResizeModule, SurfaceEvent};
pub use session::{DragSession, DragState, resized_width};
