//! Interactive roll builder for MiceDice.
//!
//! A roll is built through a fixed pipeline of questions ([`Step`]), each
//! answered by one [`ResponseToken`]. The answers accumulate into
//! [`Modifiers`], which fix the pool size. Once rolled, the owner may nudge
//! the result (explode axes, reroll snakes) until they finish or cancel.
//!
//! [`SessionManager`] owns every open roll, keyed both by requester and
//! channel and by the reply message the roll is rendered into. It also
//! offers the one-shot [`BasicRoll`] path and skill rating queries through a
//! [`md_sheet::SkillProvider`].

pub mod basic;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod manager;
pub mod modifiers;
pub mod render;
pub mod roller;
pub mod step;
pub mod token;

pub use basic::{BasicRoll, RollOutcome};
pub use config::{FaceStyle, RollerConfig};
pub use error::{RollError, RollResult};
pub use event::{RollEvent, TaxCause};
pub use ids::{ChannelId, MessageId, SessionKey, UserId};
pub use manager::{SessionHandle, SessionManager};
pub use modifiers::{Modifiers, Strategy, TraitEffect, halve_round_half_up};
pub use roller::{Advance, InteractiveRoller, Nudge, RenderedState, Retired, Stage};
pub use step::Step;
pub use token::{Choice, ResponseToken};
