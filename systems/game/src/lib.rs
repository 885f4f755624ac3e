#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-taking duel between two strategies on a shared board.
//!
//! Offense moves first. A move swaps two tiles, settles the board with
//! refills and credits every destroyed tile's AP to the mover. The mover
//! keeps the turn when any cascade match reached `min_extra_move`; otherwise
//! play passes to the opponent and the turn counter advances whenever play
//! returns to offense. Countdown tiles tick at that point.

use std::collections::BTreeMap;

use match3_sim_board::{Board, BoardCache, CacheStats};
use match3_sim_core::{ApPool, ApYield, Color, Randomness, Rules, RulesError, Square, Swap, Tile};
use match3_sim_system_generation::RandomRefill;
use match3_sim_system_moves::has_move;
use match3_sim_system_settler::{settle_with_trace, Refill};
use match3_sim_system_strategy::{Context, GameView, Side, Strategy};
use thiserror::Error;
use tracing::{debug, trace};

/// Observable steps of a game, in the order they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A strategy chose a swap.
    MoveChosen {
        /// Side that chose.
        side: Side,
        /// Chosen swap.
        swap: Swap,
    },
    /// A strategy declined to move.
    Passed {
        /// Side that declined.
        side: Side,
    },
    /// Two tiles were exchanged on the board.
    Swapped {
        /// Exchanged squares.
        swap: Swap,
    },
    /// A tile was destroyed and its AP credited to the mover.
    Destroyed {
        /// Side credited with the tile.
        side: Side,
        /// Square the tile occupied.
        square: Square,
        /// Tile before destruction.
        tile: Tile,
    },
    /// Gravity moved a tile.
    Moved {
        /// Square the tile left.
        from: Square,
        /// Square the tile landed on.
        to: Square,
    },
    /// A critical tile was dropped into a large match.
    CriticalPlaced {
        /// Square of the new critical tile.
        square: Square,
    },
    /// The mover keeps the turn.
    ExtraMove {
        /// Side moving again.
        side: Side,
    },
    /// Play passed to the other side.
    TurnPassed {
        /// Side now to move.
        to: Side,
        /// Turn counter after the pass.
        turn_count: u32,
    },
    /// A countdown tile ran out and reverted to a plain tile.
    CountdownFired {
        /// Square of the countdown tile.
        square: Square,
        /// Color of the countdown tile.
        color: Color,
    },
}

/// Reasons a game refuses to start or continue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Rules failed validation.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// Board side disagrees with the rules.
    #[error("board side {board} does not match the configured side {rules}")]
    SideMismatch {
        /// Side of the provided board.
        board: usize,
        /// Side required by the rules.
        rules: usize,
    },
    /// A strategy chose squares that are off the board or not adjacent.
    #[error("{side} chose {swap}, which does not exchange adjacent squares on the board")]
    IllegalSwap {
        /// Side whose strategy misbehaved.
        side: Side,
        /// Offending swap.
        swap: Swap,
    },
}

/// Action points gathered by one player, per pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApLedger {
    points: BTreeMap<ApPool, u32>,
}

impl ApLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the yield to its pool.
    pub fn credit(&mut self, ap: ApYield) {
        *self.points.entry(ap.pool).or_insert(0) += ap.amount;
    }

    /// Points gathered in the pool.
    #[must_use]
    pub fn get(&self, pool: ApPool) -> u32 {
        self.points.get(&pool).copied().unwrap_or(0)
    }

    /// Points gathered across every pool.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.points.values().sum()
    }

    /// Pools with points, in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (ApPool, u32)> + '_ {
        self.points.iter().map(|(pool, points)| (*pool, *points))
    }
}

/// A strategy and what it has earned.
#[derive(Debug)]
pub struct Player {
    strategy: Box<dyn Strategy>,
    ledger: ApLedger,
    moves_made: u32,
}

impl Player {
    /// Creates a player with an empty ledger.
    #[must_use]
    pub fn new(strategy: impl Strategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
            ledger: ApLedger::new(),
            moves_made: 0,
        }
    }

    /// AP gathered so far.
    #[must_use]
    pub fn ledger(&self) -> &ApLedger {
        &self.ledger
    }

    /// Swaps played so far, excluding passes.
    #[must_use]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }
}

/// A running duel.
pub struct Game<R> {
    board: Board,
    offense: Player,
    defense: Player,
    rules: Rules,
    cache: BoardCache,
    rng: R,
    refill: Box<dyn Refill>,
    move_count: u32,
    turn_count: u32,
    to_move: Side,
}

impl<R: Randomness> Game<R> {
    /// Sets up a game on `board` with offense to move on turn one.
    ///
    /// Empty squares left by cascades are refilled with random tiles,
    /// team-ups included; see [`Game::with_refill`].
    ///
    /// # Errors
    ///
    /// Fails when the rules are invalid or the board side disagrees with them.
    pub fn new(
        board: Board,
        offense: Player,
        defense: Player,
        rules: Rules,
        rng: R,
    ) -> Result<Self, GameError> {
        rules.validate()?;
        if board.side() != rules.board_side {
            return Err(GameError::SideMismatch {
                board: board.side(),
                rules: rules.board_side,
            });
        }

        Ok(Self {
            board,
            offense,
            defense,
            rules,
            cache: BoardCache::new(),
            rng,
            refill: Box::new(RandomRefill::new(true)),
            move_count: 0,
            turn_count: 1,
            to_move: Side::Offense,
        })
    }

    /// Replaces the refill used after each cascade pass.
    #[must_use]
    pub fn with_refill(mut self, refill: impl Refill + 'static) -> Self {
        self.refill = Box::new(refill);
        self
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rules in force.
    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Player on the given side.
    #[must_use]
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Offense => &self.offense,
            Side::Defense => &self.defense,
        }
    }

    /// Moves attempted so far, passes included.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Current turn, starting at one.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Side to move next.
    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Hit and miss counters of the game's cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Snapshot for reporting between steps.
    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            board: &self.board,
            move_count: self.move_count,
            turn_count: self.turn_count,
            to_move: self.to_move,
        }
    }

    /// Reports whether the board has no legal move left.
    ///
    /// The answer is looked up in and stored to the game's cache.
    #[must_use]
    pub fn is_stuck(&mut self) -> bool {
        !has_move(&self.board, &self.rules, &mut self.cache)
    }

    /// Steps until `stop` returns true; `stop` is checked before every move.
    ///
    /// # Errors
    ///
    /// Propagates the first failing [`Game::step`].
    pub fn play<F>(&mut self, mut stop: F, out: &mut Vec<GameEvent>) -> Result<(), GameError>
    where
        F: FnMut(&Self) -> bool,
    {
        while !stop(self) {
            self.step(out)?;
        }
        Ok(())
    }

    /// Plays until `turns` full turns are over.
    ///
    /// # Errors
    ///
    /// Propagates the first failing [`Game::step`].
    pub fn play_turns(&mut self, turns: u32, out: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.play(stop_after_turns::<R>(turns), out)
    }

    /// Plays one move for the side to move.
    ///
    /// # Errors
    ///
    /// Fails when the strategy picks a swap that is off the board or not
    /// between neighbours.
    pub fn step(&mut self, out: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.move_count += 1;
        let side = self.to_move;

        let picked = {
            let view = GameView {
                board: &self.board,
                move_count: self.move_count,
                turn_count: self.turn_count,
                to_move: side,
            };
            let mut context = Context {
                rules: &self.rules,
                cache: &mut self.cache,
                rng: &mut self.rng,
            };
            let player = match side {
                Side::Offense => &mut self.offense,
                Side::Defense => &mut self.defense,
            };
            player.strategy.pick_move(&view, &mut context)
        };

        let Some(swap) = picked else {
            debug!(%side, move_count = self.move_count, "no move chosen");
            out.push(GameEvent::Passed { side });
            self.pass_turn(out);
            return Ok(());
        };

        let on_board = self.board.is_in_bounds(swap.from) && self.board.is_in_bounds(swap.to);
        if !on_board || !swap.from.is_adjacent(swap.to) {
            return Err(GameError::IllegalSwap { side, swap });
        }

        out.push(GameEvent::MoveChosen { side, swap });
        self.board.swap(swap.from, swap.to);
        out.push(GameEvent::Swapped { swap });

        let settlement = settle_with_trace(
            &self.board,
            &self.rules,
            &mut self.rng,
            self.refill.as_mut(),
        );

        let mover = match side {
            Side::Offense => &mut self.offense,
            Side::Defense => &mut self.defense,
        };
        mover.moves_made += 1;

        let mut extra_move = false;
        for pass in &settlement.passes {
            extra_move |= pass.has_extent_at_least(self.rules.min_extra_move);
            for (square, tile) in &pass.destroyed {
                if let Some(ap) = tile.ap() {
                    mover.ledger.credit(ap);
                }
                out.push(GameEvent::Destroyed {
                    side,
                    square: *square,
                    tile: *tile,
                });
            }
            out.extend(
                pass.criticals
                    .iter()
                    .map(|square| GameEvent::CriticalPlaced { square: *square }),
            );
            out.extend(pass.moved.iter().map(|fall| GameEvent::Moved {
                from: fall.from,
                to: fall.to,
            }));
        }
        self.board = settlement.board;

        debug!(
            %side,
            %swap,
            move_count = self.move_count,
            passes = settlement.passes.len(),
            extra_move,
            "move played"
        );

        if extra_move {
            out.push(GameEvent::ExtraMove { side });
        } else {
            self.pass_turn(out);
        }
        Ok(())
    }

    fn pass_turn(&mut self, out: &mut Vec<GameEvent>) {
        self.to_move = self.to_move.opponent();
        if self.to_move == Side::Offense {
            self.turn_count += 1;
        }
        out.push(GameEvent::TurnPassed {
            to: self.to_move,
            turn_count: self.turn_count,
        });

        if self.to_move == Side::Offense {
            self.tick_countdowns(out);
        }
    }

    fn tick_countdowns(&mut self, out: &mut Vec<GameEvent>) {
        let ticked: Vec<(Square, Tile, bool)> = self
            .board
            .tiles()
            .filter_map(|(square, tile)| {
                tile.tick_countdown()
                    .map(|(next, fired)| (square, next, fired))
            })
            .collect();

        for (square, next, fired) in ticked {
            self.board.set(square, next);
            if let (true, Tile::Colored(color)) = (fired, next) {
                trace!(%square, %color, "countdown fired");
                out.push(GameEvent::CountdownFired { square, color });
            }
        }
    }
}

/// Stop condition that ends the game once `turns` full turns are over.
pub fn stop_after_turns<R: Randomness>(turns: u32) -> impl FnMut(&Game<R>) -> bool {
    move |game: &Game<R>| game.turn_count() > turns
}
