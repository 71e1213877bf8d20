//! Feedback model types.
//!
//! This module defines the intermediate representation (IR) that bridges
//! feedback-text parsing and content rendering. A parsed critique is an
//! ordered sequence of [`Section`]s; renderers derive either screen blocks
//! or paginated pages from it and never mutate it.

mod block;
mod feedback;
mod section;
mod span;

pub use block::{BlockKind, RenderBlock};
pub use feedback::Feedback;
pub use section::{Section, Subsection};
pub use span::{Emphasis, InlineSpan};
