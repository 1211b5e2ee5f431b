//! The interactive roll builder.
//!
//! An [`InteractiveRoller`] walks the [`Step`] pipeline one token at a time.
//! Every step's behavior lives in a single dispatch over `(Step, token)`, so
//! the whole machine can be read top to bottom in [`InteractiveRoller::advance`]
//! and its helpers.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use md_dice::{DicePool, HistoryEntry};

use crate::config::RollerConfig;
use crate::event::{RollEvent, TaxCause};
use crate::ids::{ChannelId, MessageId, SessionKey, UserId};
use crate::modifiers::{Modifiers, Strategy, TraitEffect};
use crate::render::{render_audit, render_pool, render_summary};
use crate::step::Step;
use crate::token::{Choice, ResponseToken};

/// Where a roll stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Waiting for an answer to this step.
    Active(Step),
    /// The owner accepted the result.
    Finalized,
    /// The owner abandoned the roll, or a newer roll replaced it.
    Cancelled,
}

impl Stage {
    /// Returns true once the roll is closed.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active(_))
    }

    /// The pending step, if the roll is still open.
    pub fn step(self) -> Option<Step> {
        match self {
            Self::Active(step) => Some(step),
            _ => None,
        }
    }
}

/// The most recent post-roll adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nudge {
    /// Axes were exploded.
    Exploded(usize),
    /// A single snake was rerolled.
    RerolledOne,
    /// Every eligible snake was rerolled.
    RerolledAll(usize),
}

/// What to show for an open roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedState {
    /// The reply message to edit.
    pub message: MessageId,
    /// Current stage.
    pub stage: Stage,
    /// Full message text.
    pub text: String,
    /// Valid responses, in display order. Cancel is always last.
    pub options: Vec<ResponseToken>,
    /// Side effects produced by the answer just applied.
    pub events: Vec<RollEvent>,
}

/// The final word on a closed roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retired {
    /// The reply message to edit.
    pub message: MessageId,
    /// Who owned the roll.
    pub owner: UserId,
    /// [`Stage::Finalized`] or [`Stage::Cancelled`].
    pub stage: Stage,
    /// Final message text.
    pub text: String,
}

/// The result of feeding one token to a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The roll moved on, or help was revealed.
    Updated(RenderedState),
    /// The full roll log, to be sent as a separate reply.
    Audit {
        /// The roll the log belongs to.
        message: MessageId,
        /// Rendered log.
        log: String,
    },
    /// The roll closed.
    Retired(Retired),
    /// The token was not valid here. Nothing changed.
    Ignored,
}

/// One interactive roll, from the first question to the final result.
#[derive(Debug)]
pub struct InteractiveRoller {
    owner: UserId,
    channel: ChannelId,
    message: MessageId,
    config: RollerConfig,
    stage: Stage,
    modifiers: Modifiers,
    is_wise: bool,
    pool: DicePool,
    rng: StdRng,
    tooltip_shown: bool,
    last_nudge: Option<Nudge>,
    last_active: DateTime<Utc>,
}

impl InteractiveRoller {
    /// Open a roll at the first step.
    pub fn new(
        owner: UserId,
        channel: ChannelId,
        message: MessageId,
        config: RollerConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            owner,
            channel,
            message,
            config,
            stage: Stage::Active(Step::HasSkill),
            modifiers: Modifiers::default(),
            is_wise: false,
            pool: DicePool::new(),
            rng,
            tooltip_shown: false,
            last_nudge: None,
            last_active: Utc::now(),
        }
    }

    /// Who started the roll.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Where the roll was started.
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// The owner and channel together.
    pub fn key(&self) -> SessionKey {
        SessionKey::new(self.owner, self.channel)
    }

    /// The reply message the roll renders into.
    pub fn message(&self) -> MessageId {
        self.message
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Answers collected so far.
    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// Whether the owner claimed a relevant wise.
    pub fn is_wise(&self) -> bool {
        self.is_wise
    }

    /// The dice, empty until the roll is confirmed.
    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// Every operation the pool has gone through, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.pool.history().collect()
    }

    /// When the roll was opened or last accepted a token.
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Returns true while the roll accepts tokens.
    pub fn is_open(&self) -> bool {
        !self.stage.is_terminal()
    }

    /// Render the current prompt and options.
    pub fn render(&self) -> RenderedState {
        let mut text = self.body();
        if let Some(step) = self.stage.step() {
            text.push_str(&format!("\n>>> **{}**", self.prompt_text(step)));
            if let Some(tip) = step.tooltip(&self.modifiers).filter(|_| self.tooltip_shown) {
                text.push_str(&format!("\n\nℹ️ {tip}"));
            }
        }
        RenderedState {
            message: self.message,
            stage: self.stage,
            text,
            options: self.options(),
            events: Vec::new(),
        }
    }

    /// Tokens the current step accepts, in display order.
    pub fn options(&self) -> Vec<ResponseToken> {
        let Some(step) = self.stage.step() else {
            return Vec::new();
        };
        let mut options = match step {
            Step::HasSkill
            | Step::MousyNature
            | Step::Gear
            | Step::TapNature
            | Step::HasTrait
            | Step::Wise => vec![ResponseToken::Yes, ResponseToken::No],
            Step::SkillLevel => numeric(1, 6),
            Step::NatureLevel => numeric(1, 7),
            Step::Helpers => numeric(0, self.config.max_helpers),
            Step::Persona => numeric(0, self.config.max_persona),
            Step::Strategy => self
                .strategy_options()
                .into_iter()
                .map(|(choice, _)| ResponseToken::Named(choice))
                .collect(),
            Step::TraitPolarity => vec![
                ResponseToken::Named(Choice::Help),
                ResponseToken::Named(Choice::Neutral),
                ResponseToken::Named(Choice::Hinder),
            ],
            Step::ConfirmRoll => vec![ResponseToken::Confirm],
            Step::Nudge => self.nudge_options(),
        };
        if step == Step::Wise {
            options.push(ResponseToken::Audit);
        }
        if !self.tooltip_shown && step.tooltip(&self.modifiers).is_some() {
            options.push(ResponseToken::Info);
        }
        options.push(ResponseToken::Cancel);
        options
    }

    /// Feed one response token.
    ///
    /// Cancel is honored at every step. Any other token not currently on
    /// offer is ignored and leaves the roll untouched.
    pub fn advance(&mut self, token: ResponseToken) -> Advance {
        let Stage::Active(step) = self.stage else {
            trace!("Ignoring {} on closed roll {}", token, self.message);
            return Advance::Ignored;
        };
        if token == ResponseToken::Cancel {
            return self.cancel().map_or(Advance::Ignored, Advance::Retired);
        }
        if !self.options().contains(&token) {
            trace!("Ignoring {} at step {} of {}", token, step, self.message);
            return Advance::Ignored;
        }
        self.last_active = Utc::now();

        match token {
            ResponseToken::Info => {
                self.tooltip_shown = true;
                return Advance::Updated(self.render());
            }
            ResponseToken::Audit => {
                return Advance::Audit {
                    message: self.message,
                    log: render_audit(&self.pool),
                };
            }
            ResponseToken::Finish => return Advance::Retired(self.finalize()),
            _ => {}
        }

        let Some(events) = self.apply(step, token) else {
            return Advance::Ignored;
        };
        self.tooltip_shown = false;
        debug!("Roll {} moved from {} to {:?}", self.message, step, self.stage);

        let mut state = self.render();
        state.events = events;
        Advance::Updated(state)
    }

    /// Abandon the roll without resolving it.
    ///
    /// Returns `None` if the roll is already finalized or cancelled; a
    /// closed roll keeps its stage.
    pub fn cancel(&mut self) -> Option<Retired> {
        if !self.is_open() {
            trace!("Roll {} already closed as {:?}", self.message, self.stage);
            return None;
        }
        self.stage = Stage::Cancelled;
        debug!("Roll {} cancelled", self.message);
        Some(Retired {
            message: self.message,
            owner: self.owner,
            stage: self.stage,
            text: format!("{} cancelled their roll.", self.owner),
        })
    }

    fn finalize(&mut self) -> Retired {
        self.stage = Stage::Finalized;
        debug!(
            "Roll {} finalized at {} successes",
            self.message,
            self.pool.value()
        );
        Retired {
            message: self.message,
            owner: self.owner,
            stage: self.stage,
            text: self.body(),
        }
    }

    /// Record one answer and move the cursor. `None` means the pair is not
    /// a valid transition.
    fn apply(&mut self, step: Step, token: ResponseToken) -> Option<Vec<RollEvent>> {
        let yes = token == ResponseToken::Yes;
        let mut events = Vec::new();
        let mut next = step.next();

        match (step, token) {
            (Step::HasSkill, ResponseToken::Yes | ResponseToken::No) => {
                self.modifiers.has_skill = yes;
            }
            (Step::SkillLevel, ResponseToken::Numeric(n)) => self.modifiers.skill_level = n,
            (Step::MousyNature, ResponseToken::Yes | ResponseToken::No) => {
                self.modifiers.is_mousy = yes;
            }
            (Step::NatureLevel, ResponseToken::Numeric(n)) => self.modifiers.nature_level = n,
            (Step::Strategy, ResponseToken::Named(choice)) => {
                let (_, strategy) = self
                    .strategy_options()
                    .into_iter()
                    .find(|&(c, _)| c == choice)?;
                self.modifiers.strategy = Some(strategy);
            }
            (Step::Gear, ResponseToken::Yes | ResponseToken::No) => self.modifiers.with_gear = yes,
            (Step::Helpers, ResponseToken::Numeric(n)) => self.modifiers.helpers = n,
            (Step::TapNature, ResponseToken::Yes | ResponseToken::No) => {
                self.modifiers.tapping_nature = yes;
            }
            (Step::Persona, ResponseToken::Numeric(n)) => self.modifiers.persona = n,
            (Step::HasTrait, ResponseToken::Yes) => {}
            (Step::HasTrait, ResponseToken::No) => {
                self.modifiers.trait_effect = TraitEffect::Neutral;
                next = Step::ConfirmRoll;
            }
            (Step::TraitPolarity, ResponseToken::Named(choice)) => {
                self.modifiers.trait_effect = match choice {
                    Choice::Help => TraitEffect::Help,
                    Choice::Neutral => TraitEffect::Neutral,
                    Choice::Hinder => TraitEffect::Hinder,
                    _ => return None,
                };
            }
            (Step::ConfirmRoll, ResponseToken::Confirm) => events = self.roll(),
            (Step::Wise, ResponseToken::Yes | ResponseToken::No) => self.is_wise = yes,
            (Step::Nudge, ResponseToken::Named(choice)) => events = self.nudge(choice)?,
            _ => return None,
        }

        self.stage = Stage::Active(next);
        Some(events)
    }

    fn roll(&mut self) -> Vec<RollEvent> {
        let size = self.modifiers.dice_to_roll(self.config.max_dice);
        self.pool.add_dice(size);
        self.pool.roll(&mut self.rng);
        debug!(
            "Roll {} rolled {} dice for {} successes",
            self.message,
            size,
            self.pool.num_successes()
        );

        let m = &self.modifiers;
        let mut events = Vec::new();
        if let Some(strategy) = m.strategy {
            events.push(RollEvent::SkillTested { strategy });
            if strategy == Strategy::NatureAgainst {
                events.push(RollEvent::NatureTaxed {
                    amount: 1,
                    cause: TaxCause::ActedAgainstNature,
                });
            }
        }
        if m.tapping_nature {
            events.push(RollEvent::PersonaSpent { points: 1 });
            if !m.is_mousy {
                events.push(RollEvent::NatureTaxed {
                    amount: 1,
                    cause: TaxCause::TappedNature,
                });
            }
        }
        if m.persona > 0 {
            events.push(RollEvent::PersonaSpent {
                points: u32::from(m.persona),
            });
        }
        if m.trait_effect == TraitEffect::Hinder {
            events.push(RollEvent::CheckEarned);
        }
        events
    }

    fn nudge(&mut self, choice: Choice) -> Option<Vec<RollEvent>> {
        let (nudge, event) = match choice {
            Choice::Explode => (
                Nudge::Exploded(self.pool.explode(&mut self.rng)),
                RollEvent::FateSpent { points: 1 },
            ),
            Choice::RerollOne => {
                self.pool.reroll_one(&mut self.rng);
                (Nudge::RerolledOne, RollEvent::FateSpent { points: 1 })
            }
            Choice::RerollAll => (
                Nudge::RerolledAll(self.pool.reroll_all(&mut self.rng)),
                RollEvent::PersonaSpent { points: 1 },
            ),
            _ => return None,
        };
        self.last_nudge = Some(nudge);
        Some(vec![event])
    }

    /// Strategy options for the current answers, in display order.
    fn strategy_options(&self) -> Vec<(Choice, Strategy)> {
        let m = &self.modifiers;
        let mut options = if m.has_skill {
            vec![(Choice::Skill, Strategy::Skill)]
        } else {
            vec![(Choice::Luck, Strategy::BeginnersLuck)]
        };
        if m.is_mousy {
            options.push((Choice::Nature, Strategy::NatureWith));
        } else if !m.has_skill {
            options.push((Choice::Nature, Strategy::NatureAgainst));
        }
        options
    }

    fn nudge_options(&self) -> Vec<ResponseToken> {
        let mut options = vec![ResponseToken::Finish];
        if self.pool.can_explode() {
            options.push(ResponseToken::Named(Choice::Explode));
        }
        if self.is_wise && self.pool.can_reroll() {
            options.push(ResponseToken::Named(Choice::RerollOne));
            options.push(ResponseToken::Named(Choice::RerollAll));
        }
        options.push(ResponseToken::Audit);
        options
    }

    /// Everything above the prompt.
    fn body(&self) -> String {
        let mut text = format!("{} is rolling dice...", self.owner);
        let step = self.stage.step().unwrap_or(Step::Nudge);
        if step.shows_summary() {
            text.push_str(&render_summary(&self.modifiers, self.config.max_dice));
        }
        if step.is_post_roll() {
            text.push_str(&format!("\n{} rolls the dice!", self.owner));
            if let Some(nudge) = self.last_nudge {
                text.push_str(&format!("\n\n{}", self.nudge_line(nudge)));
            }
            let with_history = step == Step::Nudge;
            text.push_str(&format!(
                "\n\n{}",
                render_pool(&self.pool, self.config.face_style, with_history)
            ));
        }
        text
    }

    fn nudge_line(&self, nudge: Nudge) -> String {
        match nudge {
            Nudge::Exploded(n) => format!("{} rolls a new die for each axe ({n})!", self.owner),
            Nudge::RerolledOne => format!("{} re-rolls a snake!", self.owner),
            Nudge::RerolledAll(n) => format!("{} re-rolls all snakes ({n})!", self.owner),
        }
    }

    fn prompt_text(&self, step: Step) -> String {
        let mut prompt = step.prompt(&self.modifiers);
        match step {
            Step::Strategy => {
                prompt.push('\n');
                let m = &self.modifiers;
                for (choice, strategy) in self.strategy_options() {
                    let emoji = ResponseToken::Named(choice).emoji();
                    let line = match strategy {
                        Strategy::Skill => {
                            format!("Use your specified skill (+{} 🎲)", m.skill_level)
                        }
                        Strategy::BeginnersLuck => format!(
                            "Use beginner's luck (+{} 🎲, pool halved ⚠️)",
                            m.skill_level
                        ),
                        Strategy::NatureWith => {
                            format!("Act within your nature (+{} 🎲)", m.nature_level)
                        }
                        Strategy::NatureAgainst => {
                            format!("Act against your nature (+{} 🎲)", m.nature_level)
                        }
                    };
                    prompt.push_str(&format!("\n  {emoji} - {line}"));
                }
            }
            Step::Nudge => {
                prompt.push_str("\n\n  🏁 - Finish!");
                if self.pool.can_explode() {
                    prompt.push_str(&format!(
                        "\n  💥 - Explode all ({}) axes (-1 fate)!",
                        self.pool.num_can_explode()
                    ));
                }
                if self.is_wise && self.pool.can_reroll() {
                    prompt.push_str("\n  🔮 - Re-roll one snake! (-1 fate)");
                    prompt.push_str(&format!(
                        "\n  🎭 - Re-roll all ({}) snakes! (-1 persona)",
                        self.pool.num_can_reroll()
                    ));
                }
            }
            _ => {}
        }
        prompt
    }
}

fn numeric(low: u8, high: u8) -> Vec<ResponseToken> {
    (low..=high).map(ResponseToken::Numeric).collect()
}
