#![warn(missing_docs)]
//! Turn-based 3x3 board game with timed turn handover.
//!
//! The board is owned and mutated only by [`BoardGame`]; cells are
//! write-once per round until a reset clears them. Turn switches and
//! post-round resets run on tick timers so a host frame loop drives all
//! progression through [`BoardGame::tick`].

use handcast_core::{ticks_for_seconds, FrameTick, TickScheduler};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The 8 fixed win lines: 3 rows, 3 columns, 2 diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    /// The starting player.
    X,
    /// The second player.
    O,
}

impl Player {
    /// The opposing player.
    pub fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Unoccupied.
    #[default]
    Empty,
    /// Marked by a player; immutable until the next reset.
    Taken(Player),
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Three in a row.
    Won(Player),
    /// All nine cells occupied with no line.
    Draw,
}

/// Global game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting moves from the current player.
    Playing,
    /// Move accepted; waiting out the handover pause.
    AwaitingTurnSwitch,
    /// Round finished; waiting for the scheduled reset.
    Over(Outcome),
}

/// Win totals. Incremented on wins only; board resets never touch them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Rounds won by X.
    pub wins_x: u32,
    /// Rounds won by O.
    pub wins_o: u32,
}

impl Scoreboard {
    /// Wins recorded for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.wins_x,
            Player::O => self.wins_o,
        }
    }

    fn increment(&mut self, player: Player) {
        match player {
            Player::X => self.wins_x += 1,
            Player::O => self.wins_o += 1,
        }
    }
}

/// Audio cue the host should play for a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// X placed a mark.
    MarkX,
    /// O placed a mark.
    MarkO,
}

impl AudioCue {
    fn for_player(player: Player) -> Self {
        match player {
            Player::X => AudioCue::MarkX,
            Player::O => AudioCue::MarkO,
        }
    }
}

/// An accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Player who placed the mark.
    pub player: Player,
    /// Cell index that was marked.
    pub index: usize,
    /// Sound the host should play.
    pub audio: AudioCue,
    /// Round outcome the placement produced, if any.
    pub outcome: Option<Outcome>,
}

/// Why a selection was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The round is over; a reset is pending.
    RoundOver,
    /// The handover pause is running.
    TurnSwitchPending,
    /// The cell already holds a mark.
    CellOccupied,
    /// Index outside the 9-cell board.
    OutOfBounds,
}

/// Result of a [`BoardGame::select_cell`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectResult {
    /// The mark was placed.
    Placed(Placement),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

/// State transition surfaced by a [`BoardGame::tick`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The handover pause elapsed; it is now this player's turn.
    TurnSwitched(Player),
    /// The post-round delay elapsed and the board was cleared.
    BoardCleared,
}

/// Timer payloads owned by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoardTimer {
    TurnSwitch,
    RoundReset,
}

/// Timing configuration for the handover pause and post-round reset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoardTiming {
    /// Handover pause length in ticks.
    pub turn_switch_ticks: u64,
    /// Delay between a round ending and the automatic reset, in ticks.
    pub reset_ticks: u64,
}

impl Default for BoardTiming {
    fn default() -> Self {
        Self {
            turn_switch_ticks: ticks_for_seconds(2.0),
            reset_ticks: ticks_for_seconds(2.0),
        }
    }
}

/// The 3x3 board game.
#[derive(Debug)]
pub struct BoardGame {
    cells: [Cell; CELL_COUNT],
    current_player: Player,
    phase: Phase,
    scores: Scoreboard,
    timing: BoardTiming,
    scheduler: TickScheduler<BoardTimer>,
    now: FrameTick,
}

impl Default for BoardGame {
    fn default() -> Self {
        Self::new(BoardTiming::default())
    }
}

impl BoardGame {
    /// Create a fresh board with X to move.
    pub fn new(timing: BoardTiming) -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            current_player: Player::X,
            phase: Phase::Playing,
            scores: Scoreboard::default(),
            timing,
            scheduler: TickScheduler::new(),
            now: FrameTick::ZERO,
        }
    }

    /// Cell contents at `index`.
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// All nine cells in board order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Player whose turn it is (or will be, during the handover pause).
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Current game phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Running win totals.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Attempt to mark `index` for the current player.
    ///
    /// Ignored while the round is over, during the handover pause, and
    /// on occupied or out-of-range cells. An accepted move checks the
    /// 8 win lines and either ends the round (scheduling the automatic
    /// reset) or enters the handover pause.
    pub fn select_cell(&mut self, index: usize) -> SelectResult {
        match self.phase {
            Phase::Over(_) => return SelectResult::Ignored(IgnoreReason::RoundOver),
            Phase::AwaitingTurnSwitch => {
                return SelectResult::Ignored(IgnoreReason::TurnSwitchPending)
            }
            Phase::Playing => {}
        }
        if index >= CELL_COUNT {
            debug!(index, "selection out of range");
            return SelectResult::Ignored(IgnoreReason::OutOfBounds);
        }
        if self.cells[index] != Cell::Empty {
            debug!(index, "cell already occupied");
            return SelectResult::Ignored(IgnoreReason::CellOccupied);
        }

        let player = self.current_player;
        self.cells[index] = Cell::Taken(player);
        let audio = AudioCue::for_player(player);

        if self.line_won_by(player) {
            self.scores.increment(player);
            self.phase = Phase::Over(Outcome::Won(player));
            self.scheduler
                .schedule(self.now, self.timing.reset_ticks, BoardTimer::RoundReset);
            info!(%player, wins_x = self.scores.wins_x, wins_o = self.scores.wins_o, "round won");
            return SelectResult::Placed(Placement {
                player,
                index,
                audio,
                outcome: Some(Outcome::Won(player)),
            });
        }

        if self.is_full() {
            self.phase = Phase::Over(Outcome::Draw);
            self.scheduler
                .schedule(self.now, self.timing.reset_ticks, BoardTimer::RoundReset);
            info!("round drawn");
            return SelectResult::Placed(Placement {
                player,
                index,
                audio,
                outcome: Some(Outcome::Draw),
            });
        }

        self.phase = Phase::AwaitingTurnSwitch;
        self.scheduler.schedule(
            self.now,
            self.timing.turn_switch_ticks,
            BoardTimer::TurnSwitch,
        );
        SelectResult::Placed(Placement {
            player,
            index,
            audio,
            outcome: None,
        })
    }

    /// Advance the board clock by one tick and fire due timers.
    pub fn tick(&mut self) -> Vec<TickEvent> {
        self.now = self.now.advance(1);
        let mut events = Vec::new();
        for fired in self.scheduler.fire_due(self.now) {
            match fired.kind {
                BoardTimer::TurnSwitch => {
                    // A reset in the pause window leaves a stale timer;
                    // flipping then would hand the round to O
                    if self.phase != Phase::AwaitingTurnSwitch {
                        debug!("stale turn-switch timer ignored");
                        continue;
                    }
                    self.current_player = self.current_player.other();
                    self.phase = Phase::Playing;
                    events.push(TickEvent::TurnSwitched(self.current_player));
                }
                BoardTimer::RoundReset => {
                    self.reset();
                    events.push(TickEvent::BoardCleared);
                }
            }
        }
        events
    }

    /// Clear all cells, hand the move to X, and resume play.
    ///
    /// Scores are NOT cleared.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
        self.current_player = Player::X;
        self.phase = Phase::Playing;
        debug!("board reset");
    }

    /// Status text for the host's label display.
    pub fn status_line(&self) -> String {
        let score = format!("X:{}  O:{}", self.scores.wins_x, self.scores.wins_o);
        match self.phase {
            Phase::Playing => format!("Turn of {}\n{score}", self.current_player),
            Phase::AwaitingTurnSwitch => format!("Switching turns...\n{score}"),
            Phase::Over(Outcome::Won(player)) => format!("{player} wins!\n{score}"),
            Phase::Over(Outcome::Draw) => format!("Draw!\n{score}"),
        }
    }

    fn line_won_by(&self, player: Player) -> bool {
        WIN_LINES.iter().any(|line| {
            line.iter()
                .all(|&index| self.cells[index] == Cell::Taken(player))
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }
}
