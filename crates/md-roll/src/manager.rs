//! Session bookkeeping for interactive rolls.
//!
//! Every open roll is registered twice: by the requester and channel it was
//! started from, and by the reply message it renders into. The tables sit
//! behind one lock and each roll behind its own, and no code path holds both
//! at once. Tokens for one roll are applied strictly one after another;
//! tokens for different rolls never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace, warn};

use md_dice::HistoryEntry;
use md_sheet::{SkillProvider, rating_report};

use crate::basic::{BasicRoll, RollOutcome};
use crate::config::RollerConfig;
use crate::error::{RollError, RollResult};
use crate::ids::{ChannelId, MessageId, SessionKey, UserId};
use crate::roller::{Advance, InteractiveRoller, RenderedState, Retired};
use crate::token::ResponseToken;

type SharedRoller = Arc<Mutex<InteractiveRoller>>;

#[derive(Default)]
struct Tables {
    by_key: HashMap<SessionKey, MessageId>,
    by_message: HashMap<MessageId, SharedRoller>,
}

/// A freshly opened roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// Requester and channel.
    pub key: SessionKey,
    /// The reply message to render into.
    pub message: MessageId,
    /// The first prompt.
    pub initial: RenderedState,
    /// The open roll this one replaced, now cancelled.
    pub superseded: Option<Retired>,
}

/// Owns every open interactive roll.
pub struct SessionManager {
    config: RollerConfig,
    rng: Mutex<StdRng>,
    tables: Mutex<Tables>,
}

impl SessionManager {
    /// Create a manager. A configured seed makes every roll reproducible.
    pub fn new(config: RollerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
            tables: Mutex::new(Tables::default()),
        }
    }

    /// The configuration rolls are built with.
    pub fn config(&self) -> &RollerConfig {
        &self.config
    }

    /// Open a roll for `owner` in `channel`, cancelling any roll they
    /// already have open there.
    pub fn start_session(&self, owner: UserId, channel: ChannelId) -> SessionHandle {
        let key = SessionKey::new(owner, channel);
        let message = MessageId::new();
        let rng = StdRng::from_rng(&mut *self.rng.lock());
        let roller = InteractiveRoller::new(owner, channel, message, self.config.clone(), rng);
        let initial = roller.render();

        let previous = {
            let mut tables = self.tables.lock();
            let old = tables.by_key.insert(key, message);
            let previous = old.and_then(|old| tables.by_message.remove(&old));
            tables
                .by_message
                .insert(message, Arc::new(Mutex::new(roller)));
            previous
        };

        // A roll finished or reaped after it was unregistered is not
        // retired a second time.
        let superseded = previous.and_then(|old| old.lock().cancel());
        if let Some(retired) = &superseded {
            info!("Roll {} for {} replaced by {}", retired.message, key, message);
        }
        info!("Opened roll {} for {}", message, key);

        SessionHandle {
            key,
            message,
            initial,
            superseded,
        }
    }

    /// Feed one token to the roll rendered into `message`.
    pub fn advance_session(
        &self,
        message: MessageId,
        token: ResponseToken,
    ) -> RollResult<Advance> {
        self.drive(message, None, token)
    }

    /// Like [`SessionManager::advance_session`], but tokens from anyone
    /// other than the roll's owner are ignored.
    pub fn advance_as(
        &self,
        message: MessageId,
        user: UserId,
        token: ResponseToken,
    ) -> RollResult<Advance> {
        self.drive(message, Some(user), token)
    }

    fn drive(
        &self,
        message: MessageId,
        user: Option<UserId>,
        token: ResponseToken,
    ) -> RollResult<Advance> {
        let shared = self.lookup(message)?;
        let (key, outcome) = {
            let mut roller = shared.lock();
            if user.is_some_and(|u| u != roller.owner()) {
                trace!("Ignoring {} from a non-owner on roll {}", token, message);
                return Ok(Advance::Ignored);
            }
            (roller.key(), roller.advance(token))
        };

        if let Advance::Retired(retired) = &outcome {
            self.retire(&shared, key, retired);
        }
        Ok(outcome)
    }

    /// Current prompt of an open roll.
    pub fn current_state(&self, message: MessageId) -> RollResult<RenderedState> {
        Ok(self.lookup(message)?.lock().render())
    }

    /// Every pool operation of an open roll, oldest first.
    pub fn roll_history(&self, message: MessageId) -> RollResult<Vec<HistoryEntry>> {
        Ok(self.lookup(message)?.lock().history())
    }

    /// Returns true if an open roll renders into `message`.
    pub fn is_roll(&self, message: MessageId) -> bool {
        self.tables.lock().by_message.contains_key(&message)
    }

    /// Returns true if `user` owns the open roll in `message`.
    pub fn owns_roll(&self, message: MessageId, user: UserId) -> bool {
        self.lookup(message)
            .is_ok_and(|shared| shared.lock().owner() == user)
    }

    /// The open roll for a requester and channel, if any.
    pub fn session_for(&self, key: SessionKey) -> Option<MessageId> {
        self.tables.lock().by_key.get(&key).copied()
    }

    /// Number of open rolls.
    pub fn session_count(&self) -> usize {
        self.tables.lock().by_message.len()
    }

    /// Cancel every open roll that has sat untouched past the configured
    /// idle timeout as of `now`.
    pub fn reap_idle(&self, now: DateTime<Utc>) -> Vec<Retired> {
        let max_idle = TimeDelta::minutes(i64::from(self.config.idle_timeout_mins));
        let open: Vec<SharedRoller> = self.tables.lock().by_message.values().cloned().collect();

        let mut reaped = Vec::new();
        for shared in open {
            let stale = {
                let mut roller = shared.lock();
                if now - roller.last_active() > max_idle {
                    let key = roller.key();
                    roller.cancel().map(|retired| (key, retired))
                } else {
                    None
                }
            };
            if let Some((key, retired)) = stale {
                self.retire(&shared, key, &retired);
                reaped.push(retired);
            }
        }
        if !reaped.is_empty() {
            info!("Reaped {} idle rolls", reaped.len());
        }
        reaped
    }

    /// Roll `dice` dice at once, optionally against an obstacle.
    ///
    /// Bad counts and obstacles are rejected before anything is rolled.
    pub fn resolve_basic_roll(
        &self,
        dice: u32,
        obstacle: Option<u32>,
        reason: Option<&str>,
    ) -> RollResult<RollOutcome> {
        let roll = BasicRoll::new(
            dice,
            obstacle,
            reason.map(str::to_string),
            self.config.max_dice,
        )
        .inspect_err(|e| warn!("Rejected basic roll: {}", e))?;
        let outcome = roll.resolve(&mut *self.rng.lock());
        debug!(
            "Basic roll of {} dice gave {} successes",
            dice,
            outcome.successes()
        );
        Ok(outcome)
    }

    /// Report a character's rating, or their advancement progress, in one
    /// skill.
    pub fn check_rating<P: SkillProvider + ?Sized>(
        &self,
        owner: UserId,
        provider: &P,
        skill: &str,
        progress: bool,
    ) -> RollResult<String> {
        let report = rating_report(provider, skill, progress)
            .inspect_err(|e| warn!("Rejected rating query: {}", e))?;
        Ok(format!("{owner} {report}"))
    }

    fn lookup(&self, message: MessageId) -> RollResult<SharedRoller> {
        self.tables
            .lock()
            .by_message
            .get(&message)
            .cloned()
            .ok_or(RollError::UnknownSession(message))
    }

    /// Drop a closed roll from both tables, unless a newer roll has already
    /// taken its place.
    fn retire(&self, shared: &SharedRoller, key: SessionKey, retired: &Retired) {
        let mut tables = self.tables.lock();
        let current = tables
            .by_message
            .get(&retired.message)
            .is_some_and(|entry| Arc::ptr_eq(entry, shared));
        if current {
            tables.by_message.remove(&retired.message);
        }
        if tables.by_key.get(&key) == Some(&retired.message) {
            tables.by_key.remove(&key);
        }
        info!("Closed roll {} ({:?})", retired.message, retired.stage);
    }
}
