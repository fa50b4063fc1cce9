#![forbid(unsafe_code)]

//! Reference typing label.
//!
//! [`TypingLabel`] ties the parser and the effect library together: it turns
//! markup into a packed glyph buffer, reveals glyphs one at a time on the
//! typewriter clock, and runs the active effects every frame. Layout is left
//! to the host, which reads [`TypingLabel::visible_glyphs`] plus the offset,
//! sizing and rotation accumulators after each [`TypingLabel::update`].
//!
//! # Example
//!
//! ```
//! use typist_label::{PointerState, TypingEvent, TypingLabel};
//!
//! let mut label = TypingLabel::default();
//! label.set_text("{WAVE}Hello{ENDWAVE}{EVENT=done}").unwrap();
//! while !label.is_finished() {
//!     label.update(1.0 / 60.0, PointerState::default());
//! }
//! assert_eq!(label.visible_count(), 5);
//! assert_eq!(
//!     label.drain_events(),
//!     vec![TypingEvent::Event("done".into()), TypingEvent::End]
//! );
//! ```

pub mod accumulator;
pub mod error;
pub mod label;
pub mod metrics;
pub mod stage;
pub mod translate;

pub use accumulator::Accumulator2;
pub use error::LabelError;
pub use label::{FrameReport, TypingLabel};
pub use metrics::{FixedLineHeight, LineHeights, LineMetrics, line_indices};
pub use stage::{PointerState, TypingEvent};
pub use translate::markup_to_glyphs;
