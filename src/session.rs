//! Session lifecycle and stage sequencing. One session may be active at a
//! time; it cycles through its stages internally and reports a single
//! terminal outcome.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::difficulty::{InvalidConfiguration, StageSpec};
use crate::events::{HostEvent, SkillCheckOver, StartSkillCheck};
use crate::indicator::StageState;

/// Key judged when a start request carries no `inputs`.
pub const DEFAULT_KEY: &str = "e";

/// One running session: the fixed stage queue plus the active stage. Key
/// routing exists exactly as long as this value does; dropping it is the
/// teardown.
#[derive(Debug)]
struct Session {
    stages: Vec<StageSpec>,
    candidate_keys: Vec<String>,
    current_stage: usize,
    stage: StageState,
}

/// Snapshot handed to the rendering layer each frame. Display only; no
/// judgment happens on the reader's side.
#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pub position: f64,
    pub window_start: f64,
    pub window_width: f64,
    pub key_hint: String,
}

/// Owns at most one session and routes host events, key presses and
/// animation ticks into it.
///
/// States: idle -> running -> (success | failure) -> idle. Stage advancement
/// inside `running` is not observable; the only outputs are the
/// [`SkillCheckOver`] values returned from [`cancel`](Self::cancel) and
/// [`on_key`](Self::on_key), at most one per session.
#[derive(Debug)]
pub struct SkillCheckController {
    session: Option<Session>,
    rng: StdRng,
}

impl SkillCheckController {
    pub fn new() -> Self {
        Self {
            session: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic controller for tests and replays: geometry and key
    /// draws follow the seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            session: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a session. A request while one is already running is ignored;
    /// the running session continues unaffected. Empty stage sequences and
    /// explicitly empty key lists are rejected.
    pub fn start(&mut self, request: StartSkillCheck) -> Result<(), InvalidConfiguration> {
        if self.session.is_some() {
            debug!("ignoring startSkillCheck while a session is active");
            return Ok(());
        }

        let stages = request
            .difficulty
            .into_vec()
            .into_iter()
            .map(StageSpec::from_difficulty)
            .collect::<Result<Vec<_>, _>>()?;
        if stages.is_empty() {
            return Err(InvalidConfiguration::NoStages);
        }

        let candidate_keys = match request.inputs {
            Some(keys) if keys.is_empty() => return Err(InvalidConfiguration::NoCandidateKeys),
            Some(keys) => keys.iter().map(|key| key.to_lowercase()).collect(),
            None => vec![DEFAULT_KEY.to_string()],
        };

        let stage = StageState::roll(stages[0], &candidate_keys, &mut self.rng);
        self.session = Some(Session {
            stages,
            candidate_keys,
            current_stage: 0,
            stage,
        });
        Ok(())
    }

    /// Tear down the running session without judging the current stage.
    /// Returns the failure message, or None when idle.
    pub fn cancel(&mut self) -> Option<SkillCheckOver> {
        self.session
            .take()
            .map(|_| SkillCheckOver { success: false })
    }

    /// Advance the active stage's marker. No-op while idle.
    pub fn on_tick(&mut self, dt_secs: f64) {
        if let Some(session) = self.session.as_mut() {
            session.stage.advance(dt_secs);
        }
    }

    /// Judge a key press against the active stage. Keys other than the
    /// stage's expected key are no-ops, as is any press while idle.
    pub fn on_key(&mut self, key: &str) -> Option<SkillCheckOver> {
        let hit = match self.session.as_ref() {
            Some(session) if session.stage.matches_key(key) => session.stage.in_window(),
            _ => return None,
        };
        self.report_stage_result(hit)
    }

    /// Route an inbound host event. Rejected start requests are logged and
    /// dropped; they produce no outbound message.
    pub fn handle_event(&mut self, event: HostEvent) -> Option<SkillCheckOver> {
        match event {
            HostEvent::StartSkillCheck(request) => {
                if let Err(err) = self.start(request) {
                    warn!("rejected startSkillCheck: {err}");
                }
                None
            }
            HostEvent::SkillCheckCancel => self.cancel(),
        }
    }

    /// Display snapshot of the active stage.
    pub fn view(&self) -> Option<StageView> {
        self.session.as_ref().map(|session| StageView {
            position: session.stage.position(),
            window_start: session.stage.window_start,
            window_width: session.stage.window_width,
            key_hint: session.stage.expected_key.clone(),
        })
    }

    fn report_stage_result(&mut self, hit: bool) -> Option<SkillCheckOver> {
        let session = self.session.as_mut()?;

        if !hit {
            self.session = None;
            return Some(SkillCheckOver { success: false });
        }
        if session.current_stage + 1 >= session.stages.len() {
            self.session = None;
            return Some(SkillCheckOver { success: true });
        }

        // next stage, fresh geometry and key; nothing is reported mid-run
        session.current_stage += 1;
        session.stage = StageState::roll(
            session.stages[session.current_stage],
            &session.candidate_keys,
            &mut self.rng,
        );
        None
    }
}

impl Default for SkillCheckController {
    fn default() -> Self {
        Self::new()
    }
}
