//! Game session: the one owner of grid, queue, history and counters.
//!
//! Front ends call the action methods in response to input and
//! [`Session::tick`] once per frame; everything else is read back through the
//! query methods.

use std::fmt;
use std::time::Duration;

use bevy::prelude::Resource;
use log::{debug, info};
use rand::Rng;

use crate::puzzle::animator::{Animator, AnimatorEvent};
use crate::puzzle::error::ActionRejected;
use crate::puzzle::grid::CubeGrid;
use crate::puzzle::history::{self, Difficulty, MoveHistory};
use crate::puzzle::moves::{Move, MoveSource, SpeedPreset, Twist};
use crate::puzzle::solved::{SolvedTracker, SolvedTransition, is_cube_solved};
use crate::utils::constants::game_constants::HINT_DURATION_SECS;

/// Final numbers of a solve by hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Win {
    pub final_time: Duration,
    pub move_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    MoveStarted(Move),
    MoveCompleted(Move),
    MoveAborted(Move),
    Won(Win),
    /// The cube left the solved state; any win banner should go.
    Unsolved,
    /// The last queued move finished.
    QueueDrained,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ready,
    Moving,
    Shuffling { done: u32, total: u32 },
    Solving { done: u32, total: u32 },
    Reset,
    Solved,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str("Status: Ready"),
            Status::Moving => f.write_str("Status: Moving..."),
            Status::Shuffling { done, total } => write!(f, "Status: Shuffling {done}/{total}"),
            Status::Solving { done, total } => write!(f, "Status: Solving {done}/{total}"),
            Status::Reset => f.write_str("Status: Reset"),
            Status::Solved => f.write_str("Status: Solved!"),
        }
    }
}

/// Result of asking for a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    Suggest(Twist),
    AlreadySolved,
}

#[derive(Clone, Copy, Debug)]
struct Batch {
    source: MoveSource,
    done: u32,
    total: u32,
}

#[derive(Clone, Copy, Debug)]
struct ActiveHint {
    twist: Twist,
    remaining: Duration,
}

#[derive(Resource, Debug, Default)]
pub struct Session {
    grid: CubeGrid,
    animator: Animator,
    history: MoveHistory,
    solved: SolvedTracker,
    speed: SpeedPreset,
    difficulty: Difficulty,
    move_count: u32,
    /// Sum of every `dt` passed to `tick`.
    clock: Duration,
    timer_start: Option<Duration>,
    final_time: Option<Duration>,
    auto_solving: bool,
    batch: Option<Batch>,
    hint: Option<ActiveHint>,
    win: Option<Win>,
    just_reset: bool,
}

impl Session {
    pub fn new(speed: SpeedPreset, difficulty: Difficulty) -> Self {
        Self {
            speed,
            difficulty,
            ..Self::default()
        }
    }

    // Queries

    pub fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Time since the first scoring move, frozen once the cube is solved.
    pub fn elapsed(&self) -> Duration {
        match (self.final_time, self.timer_start) {
            (Some(done), _) => done,
            (None, Some(start)) => self.clock.saturating_sub(start),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solved.is_solved()
    }

    pub fn is_auto_solving(&self) -> bool {
        self.auto_solving
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn pending_moves(&self) -> usize {
        self.animator.pending()
    }

    /// The move whose slice is turning right now.
    pub fn current_move(&self) -> Option<&Move> {
        self.animator.current()
    }

    /// Idle, nothing queued, and no auto-solve running.
    pub fn is_accepting_input(&self) -> bool {
        self.animator.is_idle() && !self.auto_solving
    }

    pub fn can_solve(&self) -> bool {
        self.is_accepting_input() && !self.history.is_empty()
    }

    pub fn can_hint(&self) -> bool {
        self.can_solve()
    }

    pub fn win(&self) -> Option<Win> {
        self.win
    }

    pub fn speed(&self) -> SpeedPreset {
        self.speed
    }

    pub fn set_speed(&mut self, speed: SpeedPreset) {
        self.speed = speed;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// The suggested twist while its overlay should still be visible.
    pub fn active_hint(&self) -> Option<Twist> {
        self.hint.map(|hint| hint.twist)
    }

    pub fn status(&self) -> Status {
        if let Some(batch) = self.batch {
            return match batch.source {
                MoveSource::Solve => Status::Solving {
                    done: batch.done,
                    total: batch.total,
                },
                _ => Status::Shuffling {
                    done: batch.done,
                    total: batch.total,
                },
            };
        }
        if !self.animator.is_idle() {
            Status::Moving
        } else if self.just_reset {
            Status::Reset
        } else if self.win.is_some() {
            Status::Solved
        } else {
            Status::Ready
        }
    }

    // Actions

    /// Queues a scoring quarter turn.
    pub fn user_move(&mut self, twist: Twist) -> Result<(), ActionRejected> {
        self.ensure_accepting()?;
        self.enqueue(twist, MoveSource::Manual);
        Ok(())
    }

    /// Clears the score and queues a random scramble for the current difficulty.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, ActionRejected> {
        self.ensure_accepting()?;
        self.clear_score();
        self.history.clear();
        self.hint = None;

        let scramble = history::scramble(rng, self.difficulty);
        info!(
            "shuffling with {} moves ({})",
            scramble.len(),
            self.difficulty.label()
        );
        self.start_batch(MoveSource::Shuffle, scramble.len());
        for twist in &scramble {
            self.enqueue(*twist, MoveSource::Shuffle);
        }
        Ok(scramble.len())
    }

    /// Replays the recorded history backwards.
    ///
    /// History and move count are cleared immediately; user moves stay
    /// blocked until the replay drains.
    pub fn solve(&mut self) -> Result<usize, ActionRejected> {
        if self.auto_solving {
            return Err(ActionRejected::AutoSolving);
        }
        self.ensure_accepting()?;
        if self.history.is_empty() {
            return Err(ActionRejected::NothingToUndo);
        }

        let replay = self.history.inverse_sequence();
        self.history.clear();
        self.clear_score();
        self.hint = None;
        self.auto_solving = true;
        info!("solving by undoing {} moves", replay.len());
        self.start_batch(MoveSource::Solve, replay.len());
        for twist in &replay {
            self.enqueue(*twist, MoveSource::Solve);
        }
        Ok(replay.len())
    }

    /// Drops everything, including a move in flight, and rebuilds the cube.
    pub fn reset(&mut self) {
        let aborted = self.animator.abort(&mut self.grid);
        if !aborted.is_empty() {
            debug!("reset aborted {} moves", aborted.len());
        }
        self.grid = CubeGrid::new();
        self.history.clear();
        self.solved.reset();
        self.clear_score();
        self.auto_solving = false;
        self.batch = None;
        self.hint = None;
        self.just_reset = true;
    }

    /// Suggests undoing the last recorded move and starts its overlay timer.
    pub fn hint(&mut self) -> Result<HintOutcome, ActionRejected> {
        self.ensure_accepting()?;
        let Some(twist) = history::hint_for(&self.history) else {
            self.hint = None;
            return Ok(HintOutcome::AlreadySolved);
        };
        self.hint = Some(ActiveHint {
            twist,
            remaining: Duration::from_secs_f32(HINT_DURATION_SECS),
        });
        Ok(HintOutcome::Suggest(twist))
    }

    /// Advances animation and bookkeeping by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Vec<SessionEvent> {
        let frame_start = self.clock;
        self.clock += dt;
        if let Some(hint) = &mut self.hint {
            hint.remaining = hint.remaining.saturating_sub(dt);
            if hint.remaining.is_zero() {
                self.hint = None;
            }
        }

        let was_busy = !self.animator.is_idle();
        let mut events = Vec::new();
        for event in self.animator.tick(&mut self.grid, dt) {
            match event {
                AnimatorEvent::Started(mv) => {
                    self.on_started(mv, frame_start);
                    events.push(SessionEvent::MoveStarted(mv));
                }
                AnimatorEvent::Completed(mv) => {
                    events.push(SessionEvent::MoveCompleted(mv));
                    self.on_completed(mv, &mut events);
                }
                AnimatorEvent::Aborted(mv) => events.push(SessionEvent::MoveAborted(mv)),
            }
        }

        if was_busy && self.animator.is_idle() {
            if self.auto_solving {
                info!("auto-solve finished");
            }
            self.auto_solving = false;
            self.batch = None;
            events.push(SessionEvent::QueueDrained);
        }
        events
    }

    fn ensure_accepting(&self) -> Result<(), ActionRejected> {
        if self.auto_solving {
            Err(ActionRejected::AutoSolving)
        } else if !self.animator.is_idle() {
            Err(ActionRejected::Busy)
        } else {
            Ok(())
        }
    }

    fn enqueue(&mut self, twist: Twist, source: MoveSource) {
        self.animator.enqueue(Move {
            twist,
            duration: self.speed.duration(source),
            source,
        });
    }

    fn start_batch(&mut self, source: MoveSource, total: usize) {
        self.batch = (total > 0).then_some(Batch {
            source,
            done: 0,
            total: total as u32,
        });
    }

    fn clear_score(&mut self) {
        self.move_count = 0;
        self.timer_start = None;
        self.final_time = None;
        self.win = None;
    }

    fn on_started(&mut self, mv: Move, at: Duration) {
        self.just_reset = false;
        if mv.source.is_recorded() {
            self.history.record(mv.twist);
        }
        // A hand move after a win starts a fresh timing run
        let timer_idle = self.timer_start.is_none() || self.final_time.is_some();
        if mv.source.counts_toward_score() && timer_idle {
            self.timer_start = Some(at);
            self.final_time = None;
        }
    }

    fn on_completed(&mut self, mv: Move, events: &mut Vec<SessionEvent>) {
        if mv.source.counts_toward_score() {
            self.move_count += 1;
        }
        if let Some(batch) = &mut self.batch {
            batch.done += 1;
        }

        match self.solved.update(is_cube_solved(&self.grid)) {
            Some(SolvedTransition::BecameSolved) if mv.source == MoveSource::Manual => {
                let win = Win {
                    final_time: self.elapsed(),
                    move_count: self.move_count,
                };
                self.final_time = Some(win.final_time);
                self.win = Some(win);
                info!(
                    "solved in {} with {} moves",
                    format_elapsed(win.final_time),
                    win.move_count
                );
                events.push(SessionEvent::Won(win));
            }
            Some(SolvedTransition::BecameSolved) => {
                debug!("cube solved by {:?} moves, no win reported", mv.source);
            }
            Some(SolvedTransition::BecameUnsolved) => {
                if self.win.take().is_some() {
                    events.push(SessionEvent::Unsolved);
                }
            }
            None => {}
        }
    }
}

/// `mm:ss.hh`, minutes not capped.
pub fn format_elapsed(elapsed: Duration) -> String {
    let hundredths = elapsed.as_millis() / 10;
    let minutes = hundredths / 6000;
    let seconds = (hundredths / 100) % 60;
    let fraction = hundredths % 100;
    format!("{minutes:02}:{seconds:02}.{fraction:02}")
}
