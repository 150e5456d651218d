//! Move queue and the frame-driven turn animation.
//!
//! The animator is a two-state machine (`Idle`, `Animating`) advanced by
//! [`Animator::tick`]. Exactly one move animates at a time and the queue is
//! strictly FIFO. A reset calls [`Animator::abort`], which bumps the
//! generation token; an active move holding a stale token is forced to its
//! final rotation without further easing.

use std::collections::VecDeque;
use std::time::Duration;

use log::debug;

use crate::puzzle::grid::{CubeGrid, Pivot};
use crate::puzzle::moves::Move;

/// Symmetric quadratic ease-in-out on `[0, 1]`.
pub fn ease_in_out_quad(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

/// Something the animator did during a tick, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatorEvent {
    /// The move left the queue and its slice is now on the pivot.
    Started(Move),
    /// The move finished and the slice is back on the lattice.
    Completed(Move),
    /// The move was forced to completion by an abort.
    Aborted(Move),
}

#[derive(Debug)]
struct ActiveMove {
    mv: Move,
    pivot: Pivot,
    elapsed: Duration,
    generation: u64,
}

impl ActiveMove {
    fn progress(&self) -> f32 {
        if self.mv.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.mv.duration.as_secs_f32()).min(1.0)
    }
}

#[derive(Debug, Default)]
enum AnimatorState {
    #[default]
    Idle,
    Animating(ActiveMove),
}

#[derive(Debug, Default)]
pub struct Animator {
    queue: VecDeque<Move>,
    state: AnimatorState,
    generation: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move. Never interrupts the one in flight.
    pub fn enqueue(&mut self, mv: Move) {
        self.queue.push_back(mv);
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating(_))
    }

    /// Idle with nothing pending.
    pub fn is_idle(&self) -> bool {
        !self.is_animating() && self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> Option<&Move> {
        match &self.state {
            AnimatorState::Animating(active) => Some(&active.mv),
            AnimatorState::Idle => None,
        }
    }

    /// Linear progress of the move in flight.
    pub fn progress(&self) -> Option<f32> {
        match &self.state {
            AnimatorState::Animating(active) => Some(active.progress()),
            AnimatorState::Idle => None,
        }
    }

    /// Advances the animation by `dt` of wall-clock time.
    ///
    /// Time left over after a move completes carries into the next queued
    /// move, so several short moves may finish within one tick.
    pub fn tick(&mut self, grid: &mut CubeGrid, dt: Duration) -> Vec<AnimatorEvent> {
        let mut events = Vec::new();
        let mut remaining = dt;

        loop {
            let state = std::mem::take(&mut self.state);
            let mut active = match state {
                AnimatorState::Animating(active) => active,
                AnimatorState::Idle => {
                    let Some(mv) = self.queue.pop_front() else {
                        break;
                    };
                    events.push(AnimatorEvent::Started(mv));
                    self.start(grid, mv)
                }
            };

            if active.generation != self.generation {
                active.pivot.release(grid, active.mv.twist.target_angle());
                events.push(AnimatorEvent::Aborted(active.mv));
                continue;
            }

            let left = active.mv.duration.saturating_sub(active.elapsed);
            if remaining < left {
                active.elapsed += remaining;
                let angle = active.mv.twist.target_angle() * ease_in_out_quad(active.progress());
                active.pivot.rotate(grid, angle);
                self.state = AnimatorState::Animating(active);
                break;
            }

            remaining -= left;
            active.pivot.release(grid, active.mv.twist.target_angle());
            events.push(AnimatorEvent::Completed(active.mv));
        }

        events
    }

    /// Invalidates the move in flight and drops everything queued.
    ///
    /// The active move, if any, is settled onto the lattice immediately so the
    /// grid is aligned when this returns.
    pub fn abort(&mut self, grid: &mut CubeGrid) -> Vec<AnimatorEvent> {
        self.generation += 1;
        let dropped = self.queue.len();
        self.queue.clear();
        if dropped > 0 {
            debug!("abort dropped {dropped} queued moves");
        }
        if self.is_animating() {
            self.tick(grid, Duration::ZERO)
        } else {
            Vec::new()
        }
    }

    fn start(&self, grid: &CubeGrid, mv: Move) -> ActiveMove {
        let pivot = Pivot::attach(grid, mv.twist.axis, mv.twist.layer());
        debug!("animating {:?} over {} cubies", mv.twist, pivot.len());
        ActiveMove {
            mv,
            pivot,
            elapsed: Duration::ZERO,
            generation: self.generation,
        }
    }
}
