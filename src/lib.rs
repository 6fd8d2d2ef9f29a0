//! Core logic for the concert promotion page: ticket quantity and price
//! handling, purchase confirmation, reveal animations and the decorative
//! scroll/pointer effects.
//!
//! Nothing in this crate touches the DOM; the browser binary wires these
//! types to page events.

pub mod animation;
pub mod checkout;
pub mod config;
pub mod effects;
pub mod motion;
pub mod pricing;
pub mod utils;

pub use animation::{
    reveal_mode, AnimatedCounter, CounterFormat, CounterRun, ProgressIndicator, RevealEffect, RevealKind,
    RevealMode, RevealSet,
};
pub use checkout::{submit, Confirmation, PurchaseForm, SubmissionError};
pub use config::{EffectSettings, PageConfig, ResolvedConfig};
pub use effects::{FrameThrottle, PageEvent, Tilt};
pub use motion::MotionPreference;
pub use pricing::{Money, QuantityStep, TicketOrder, TicketSettings};
