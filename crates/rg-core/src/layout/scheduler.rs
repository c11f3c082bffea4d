//! Generation scheduler
//!
//! Grows a room layout breadth-first from the grid center, one frontier cell
//! per [`GenerationScheduler::step`], and restarts from scratch when an
//! attempt ends with fewer than `min_rooms` rooms.
//!
//! Phases: `Seeding -> Growing -> Completing -> Done`, with `Completing`
//! looping back to `Seeding` on regeneration and ending in `Failed` once the
//! retry budget is spent.

use log::{debug, error, info, warn};
use strum::Display;

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::rng::LayoutRng;

use super::decorate::Decorator;
use super::doors::wire_doors;
use super::frontier::Frontier;
use super::index::GridIndex;
use super::occupancy::OccupancyGrid;
use super::plan::Layout;
use super::room::{RoomEntity, RoomSet};

/// Probability that a candidate neighbour is skipped outright
const SKIP_CHANCE: f32 = 0.5;

/// Maximum occupied neighbours a candidate cell may have when placed
const MAX_PLACEMENT_DEGREE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GenerationPhase {
    Seeding,
    Growing,
    Completing,
    Done,
    Failed,
}

/// Why a candidate cell did not receive a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RejectReason {
    /// `max_rooms` already reached
    RoomCap,
    OutOfBounds,
    Occupied,
    /// Lost the 50% draw
    CoinFlip,
    /// More than one occupied neighbour
    Crowded,
    /// The scheduler is not in the `Growing` phase
    NotGrowing,
}

/// Outcome of one placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed,
    Rejected(RejectReason),
}

/// What one scheduler step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The seed room was placed for attempt `attempt`
    Seeded { index: GridIndex, attempt: u32 },
    /// A frontier cell was expanded, placing `placed` new rooms
    Expanded { from: GridIndex, placed: u32 },
    /// The previous attempt ended with `rooms` rooms and was discarded;
    /// attempt `attempt` has been seeded
    Regenerating { attempt: u32, rooms: u32 },
    /// Generation finished with `rooms` rooms
    Completed { rooms: u32, attempts: u32 },
    /// Nothing left to do
    Idle,
}

/// Mutable state of one generation attempt
#[derive(Debug, Clone)]
pub struct GenerationState {
    pub grid: OccupancyGrid,
    pub frontier: Frontier,
    pub rooms: RoomSet,
    pub room_count: u32,
    /// Set to end growth early; the next step completes the attempt
    pub complete: bool,
}

impl GenerationState {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            grid: OccupancyGrid::new(config.grid_size_x, config.grid_size_y),
            frontier: Frontier::new(),
            rooms: RoomSet::new(),
            room_count: 0,
            complete: false,
        }
    }

    /// Drop every room and element and empty the grid and frontier
    pub fn reset(&mut self) {
        self.rooms.clear();
        self.grid.clear();
        self.frontier.clear();
        self.room_count = 0;
        self.complete = false;
    }
}

/// Drives generation of one layout
#[derive(Debug, Clone)]
pub struct GenerationScheduler {
    config: LayoutConfig,
    decorator: Decorator,
    rng: LayoutRng,
    state: GenerationState,
    phase: GenerationPhase,
    attempt: u32,
    best: u32,
    failure: Option<LayoutError>,
}

impl GenerationScheduler {
    /// Create a scheduler in the `Seeding` phase
    ///
    /// # Errors
    /// `InvalidConfig` if the config fails validation.
    pub fn new(config: LayoutConfig, rng: LayoutRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            decorator: Decorator::new(&config),
            state: GenerationState::new(&config),
            config,
            rng,
            phase: GenerationPhase::Seeding,
            attempt: 0,
            best: 0,
            failure: None,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Current attempt number, starting at 1 once seeded
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn room_count(&self) -> u32 {
        self.state.room_count
    }

    pub fn rooms(&self) -> &RoomSet {
        &self.state.rooms
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.state.grid
    }

    pub fn frontier(&self) -> &Frontier {
        &self.state.frontier
    }

    pub fn is_done(&self) -> bool {
        self.phase == GenerationPhase::Done
    }

    /// Stop growing the current attempt
    ///
    /// The next [`Self::step`] completes with the rooms placed so far, or
    /// regenerates if that is fewer than `min_rooms`. Has no effect outside
    /// the `Growing` phase.
    pub fn stop_growing(&mut self) {
        if self.phase == GenerationPhase::Growing {
            debug!("attempt {}: growth stopped by caller", self.attempt);
            self.state.complete = true;
        }
    }

    /// Run one unit of work
    ///
    /// # Errors
    /// `RetryBudgetExhausted` when `min_rooms` cannot be reached within
    /// `max_attempts`, or an internal consistency error. Once an error is
    /// returned every later call returns it again.
    pub fn step(&mut self) -> Result<StepResult> {
        let result = match self.phase {
            GenerationPhase::Failed => {
                return Err(self
                    .failure
                    .clone()
                    .unwrap_or(LayoutError::invalid_config("generation failed")));
            }
            GenerationPhase::Done => return Ok(StepResult::Idle),
            GenerationPhase::Seeding => self.seed(),
            GenerationPhase::Growing => {
                if self.can_grow() {
                    self.grow()
                } else {
                    self.phase = GenerationPhase::Completing;
                    self.complete()
                }
            }
            GenerationPhase::Completing => self.complete(),
        };

        result.inspect_err(|e| {
            error!("layout generation failed: {e}");
            self.failure = Some(e.clone());
            self.phase = GenerationPhase::Failed;
        })
    }

    /// Step until done and return the finished layout
    ///
    /// # Errors
    /// Whatever [`Self::step`] reports.
    pub fn run(self) -> Result<Layout> {
        self.run_with_progress(|_| {})
    }

    /// Like [`Self::run`], calling `progress` after every step
    ///
    /// # Errors
    /// Whatever [`Self::step`] reports.
    pub fn run_with_progress<F>(mut self, mut progress: F) -> Result<Layout>
    where
        F: FnMut(&StepResult),
    {
        while !self.is_done() {
            let result = self.step()?;
            progress(&result);
        }
        self.into_layout()
            .ok_or_else(|| LayoutError::invalid_config("generation stopped before completion"))
    }

    /// The finished layout, or `None` if generation is not done
    pub fn into_layout(self) -> Option<Layout> {
        if !self.is_done() {
            return None;
        }
        Some(Layout::new(
            self.state.rooms,
            self.state.grid,
            self.config.room_size(),
            self.rng.seed(),
            self.attempt,
        ))
    }

    fn can_grow(&self) -> bool {
        !self.state.frontier.is_empty()
            && self.state.room_count < self.config.max_rooms
            && !self.state.complete
    }

    fn seed(&mut self) -> Result<StepResult> {
        self.attempt += 1;
        let index = self.config.seed_index();
        self.state.grid.mark_occupied(index)?;
        self.state.room_count += 1;
        let room = self.new_room(index);
        self.state.rooms.insert(room)?;
        self.state.frontier.push(index);
        self.phase = GenerationPhase::Growing;
        debug!("attempt {}: seeded at {index}", self.attempt);
        Ok(StepResult::Seeded {
            index,
            attempt: self.attempt,
        })
    }

    fn grow(&mut self) -> Result<StepResult> {
        let Some(from) = self.state.frontier.pop() else {
            return Ok(StepResult::Idle);
        };

        let mut placed = 0;
        for (_, candidate) in from.neighbors() {
            if self.try_place(candidate)? == Placement::Placed {
                placed += 1;
            }
        }
        debug!(
            "expanded {from}: {placed} placed, {} rooms, {} pending",
            self.state.room_count,
            self.state.frontier.len()
        );
        Ok(StepResult::Expanded { from, placed })
    }

    /// Try to put a room on `index`
    ///
    /// Rooms are only placed while `Growing`; in any other phase the cell is
    /// rejected with `NotGrowing` and no randomness is drawn.
    ///
    /// # Errors
    /// Only broken internal invariants; rejections are `Ok`.
    pub fn try_place(&mut self, index: GridIndex) -> Result<Placement> {
        if self.phase != GenerationPhase::Growing {
            return Ok(Placement::Rejected(RejectReason::NotGrowing));
        }
        if let Some(reason) = self.rejection(index) {
            return Ok(Placement::Rejected(reason));
        }

        self.state.grid.mark_occupied(index)?;
        self.state.room_count += 1;
        let mut room = self.new_room(index);
        self.decorator.scatter_elements(&mut room, &mut self.rng);
        self.state.rooms.insert(room)?;
        wire_doors(index, &self.state.grid, &mut self.state.rooms)?;
        self.state.frontier.push(index);
        Ok(Placement::Placed)
    }

    fn rejection(&mut self, index: GridIndex) -> Option<RejectReason> {
        if self.state.room_count >= self.config.max_rooms {
            return Some(RejectReason::RoomCap);
        }
        if !self.state.grid.contains(index) {
            return Some(RejectReason::OutOfBounds);
        }
        if self.state.grid.is_occupied(index) {
            return Some(RejectReason::Occupied);
        }
        if index != self.config.bypass_index() && self.rng.chance() < SKIP_CHANCE {
            return Some(RejectReason::CoinFlip);
        }
        if self.state.grid.neighbor_count(index) > MAX_PLACEMENT_DEGREE {
            return Some(RejectReason::Crowded);
        }
        None
    }

    fn complete(&mut self) -> Result<StepResult> {
        let rooms = self.state.room_count;
        self.best = self.best.max(rooms);

        if rooms < self.config.min_rooms {
            if self.attempt >= self.config.max_attempts {
                return Err(LayoutError::RetryBudgetExhausted {
                    min_rooms: self.config.min_rooms,
                    attempts: self.attempt,
                    best: self.best,
                });
            }
            warn!(
                "room count {rooms} below minimum {}, regenerating",
                self.config.min_rooms
            );
            self.state.reset();
            self.phase = GenerationPhase::Seeding;
            self.seed()?;
            return Ok(StepResult::Regenerating {
                attempt: self.attempt,
                rooms,
            });
        }

        self.decorator
            .randomize_scales(&mut self.state.rooms, &mut self.rng);
        self.phase = GenerationPhase::Done;
        info!(
            "generation complete: {rooms} rooms after {} attempt(s)",
            self.attempt
        );
        Ok(StepResult::Completed {
            rooms,
            attempts: self.attempt,
        })
    }

    fn new_room(&self, index: GridIndex) -> RoomEntity {
        let size = self.config.room_size();
        RoomEntity::new(
            format!("Room-{}", self.state.room_count),
            index,
            self.state.grid.world_position(index, size),
            size,
        )
    }
}

/// Generate a complete layout from `config` and `seed`
///
/// # Errors
/// See [`GenerationScheduler::step`].
pub fn generate(config: LayoutConfig, seed: u64) -> Result<Layout> {
    GenerationScheduler::new(config, LayoutRng::new(seed))?.run()
}
