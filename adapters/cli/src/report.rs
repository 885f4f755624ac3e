//! Records printed by the simulation drivers.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use match3_sim_core::Randomness;
use match3_sim_system_game::{ApLedger, Game};
use match3_sim_system_strategy::Side;
use serde::Serialize;

/// Writes records either as text lines or as one JSON object per line.
pub(crate) struct Reporter<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Reporter<W> {
    pub(crate) fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub(crate) fn emit<T>(&mut self, record: &T) -> Result<()>
    where
        T: Serialize + fmt::Display,
    {
        if self.json {
            serde_json::to_writer(&mut self.out, record)
                .context("failed to serialize simulation record")?;
            writeln!(self.out).context("failed to write simulation record")?;
        } else {
            writeln!(self.out, "{record}").context("failed to write simulation record")?;
        }
        Ok(())
    }

    /// Free-form text, suppressed in JSON mode.
    pub(crate) fn note(&mut self, text: &str) -> Result<()> {
        if !self.json {
            writeln!(self.out, "{text}").context("failed to write report header")?;
        }
        Ok(())
    }
}

/// Outcome of one random-versus-idle game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct StuckRecord {
    pub(crate) seed: u64,
    pub(crate) turn_count: u32,
    pub(crate) move_count: u32,
}

impl fmt::Display for StuckRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.turn_count)
    }
}

/// AP standings before a move of an AP duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ApSnapshot {
    pub(crate) turn_count: u32,
    pub(crate) move_count: u32,
    pub(crate) offense: BTreeMap<String, u32>,
    pub(crate) defense: BTreeMap<String, u32>,
}

impl ApSnapshot {
    pub(crate) fn capture<R: Randomness>(game: &Game<R>) -> Self {
        Self {
            turn_count: game.turn_count(),
            move_count: game.move_count(),
            offense: pools(game.player(Side::Offense).ledger()),
            defense: pools(game.player(Side::Defense).ledger()),
        }
    }
}

fn pools(ledger: &ApLedger) -> BTreeMap<String, u32> {
    ledger
        .iter()
        .map(|(pool, points)| (pool.to_string(), points))
        .collect()
}

fn write_pools(f: &mut fmt::Formatter<'_>, pools: &BTreeMap<String, u32>) -> fmt::Result {
    for (pool, points) in pools {
        write!(f, " {pool}={points}")?;
    }
    Ok(())
}

impl fmt::Display for ApSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Turn {}, move {}", self.turn_count, self.move_count)?;
        f.write_str("AP O:")?;
        write_pools(f, &self.offense)?;
        f.write_str("\nAP D:")?;
        write_pools(f, &self.defense)?;
        f.write_str("\n---")
    }
}

/// Offense-facing protection left on the board before a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ProtectionRecord {
    pub(crate) sim_id: String,
    pub(crate) num_tiles: usize,
    pub(crate) move_count: u32,
    pub(crate) total_protection: u32,
}

impl fmt::Display for ProtectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.sim_id, self.num_tiles, self.move_count, self.total_protection
        )
    }
}
