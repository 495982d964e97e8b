//! Future combinators used by the exercises.
//!
//! - [`and_then`] attaches a continuation to a fallible future, the way a
//!   promise chain hands a settled value to the next step.
//! - [`MaybeDone`] keeps one branch of a [`join!`](crate::join) until every
//!   branch has settled.

mod chain;
mod maybe_done;

#[doc(inline)]
pub use chain::{AndThen, and_then};

#[doc(inline)]
pub use maybe_done::MaybeDone;
