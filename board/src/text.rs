//! Pipe-delimited text form of a board.
//!
//! Each row is written as `| a | b | c |` and rows are joined with newlines.
//! Parsing is lenient about padding, a missing leading pipe and blank lines;
//! a blank cell reads as an empty square.

use std::fmt;
use std::str::FromStr;

use match3_sim_core::{Color, Facing, Tile};
use thiserror::Error;

use crate::{Board, BoardError};

/// Reasons a board or tile fails to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    /// A row does not end with a pipe.
    #[error("line {line} is missing its closing `|`")]
    MissingEdge {
        /// One-based line number.
        line: usize,
    },
    /// A token is neither a color nor one of `E`, `C`, `T`.
    #[error("unknown tile token `{0}`")]
    UnknownToken(String),
    /// A colored tile carries an unrecognised subtype or the wrong number of fields.
    #[error("bad special tile `{0}`")]
    BadSubtype(String),
    /// A direction field is neither `<` nor `>`.
    #[error("bad direction `{0}`")]
    BadDirection(String),
    /// A strength or turn count is not a non-negative integer.
    #[error("bad number `{0}`")]
    BadNumber(String),
    /// The rows do not form a square.
    #[error(transparent)]
    Shape(#[from] BoardError),
}

/// Parses a single cell token such as `Y`, `BK P < 12` or `G CD 4`.
///
/// # Errors
///
/// Returns the first malformed field.
pub fn parse_tile(token: &str) -> Result<Tile, ParseBoardError> {
    let fields: Vec<&str> = token.split_whitespace().collect();
    match fields.as_slice() {
        [] | ["E"] => Ok(Tile::Empty),
        ["C"] => Ok(Tile::Critical),
        ["T"] => Ok(Tile::Teamup),
        [color] => Ok(Tile::Colored(parse_color(color)?)),
        [color, "CD", turns] => Ok(Tile::Countdown {
            color: parse_color(color)?,
            turns_left: parse_number(turns)?,
        }),
        [color, kind, facing, strength] => {
            let color = parse_color(color)?;
            let facing = Facing::from_symbol(facing)
                .ok_or_else(|| ParseBoardError::BadDirection((*facing).to_owned()))?;
            let strength = parse_number(strength)?;
            match *kind {
                "S" => Ok(Tile::Strike {
                    color,
                    facing,
                    strength,
                }),
                "A" => Ok(Tile::Attack {
                    color,
                    facing,
                    strength,
                }),
                "P" => Ok(Tile::Protect {
                    color,
                    facing,
                    strength,
                }),
                _ => Err(ParseBoardError::BadSubtype(token.trim().to_owned())),
            }
        }
        _ => Err(ParseBoardError::BadSubtype(token.trim().to_owned())),
    }
}

fn parse_color(code: &str) -> Result<Color, ParseBoardError> {
    Color::from_code(code).ok_or_else(|| ParseBoardError::UnknownToken(code.to_owned()))
}

fn parse_number(value: &str) -> Result<u32, ParseBoardError> {
    value
        .parse()
        .map_err(|_| ParseBoardError::BadNumber(value.to_owned()))
}

fn parse_row(line: &str, number: usize) -> Result<Vec<Tile>, ParseBoardError> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let body = trimmed
        .strip_suffix('|')
        .ok_or(ParseBoardError::MissingEdge { line: number })?;
    body.split('|').map(parse_tile).collect()
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| parse_row(line, index + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Board::from_rows(rows)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str("|")?;
            for tile in row {
                write!(f, " {tile} |")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_tile, ParseBoardError};
    use crate::{Board, BoardError};
    use match3_sim_core::{Color, Facing, Square, Tile};

    #[test]
    fn special_tokens_parse() {
        assert_eq!(
            parse_tile(" Y S < 12 "),
            Ok(Tile::Strike {
                color: Color::Yellow,
                facing: Facing::Offense,
                strength: 12,
            })
        );
        assert_eq!(
            parse_tile("P P > 3"),
            Ok(Tile::Protect {
                color: Color::Purple,
                facing: Facing::Defense,
                strength: 3,
            })
        );
        assert_eq!(
            parse_tile("BK CD 5"),
            Ok(Tile::Countdown {
                color: Color::Black,
                turns_left: 5,
            })
        );
        assert_eq!(parse_tile("   "), Ok(Tile::Empty));
    }

    #[test]
    fn malformed_tokens_are_reported() {
        assert_eq!(
            parse_tile("Q"),
            Err(ParseBoardError::UnknownToken("Q".to_owned()))
        );
        assert_eq!(
            parse_tile("Y X < 3"),
            Err(ParseBoardError::BadSubtype("Y X < 3".to_owned()))
        );
        assert_eq!(
            parse_tile("Y S ^ 3"),
            Err(ParseBoardError::BadDirection("^".to_owned()))
        );
        assert_eq!(
            parse_tile("Y CD x"),
            Err(ParseBoardError::BadNumber("x".to_owned()))
        );
    }

    #[test]
    fn padded_rows_with_trailing_newline_parse() {
        let text = "| Y | Y  | R   | Y |\n| R | R  | Y   | Y |\n| Y | G  | BL  | G |\n| P | BL | BK  | G |\n";
        let board: Board = text.parse().expect("board parses");
        assert_eq!(board.side(), 4);
        assert_eq!(board.at(Square::new(3, 1)), Tile::Colored(Color::Blue));
        assert_eq!(
            board.to_string(),
            "| Y | Y | R | Y |\n| R | R | Y | Y |\n| Y | G | BL | G |\n| P | BL | BK | G |"
        );
    }

    #[test]
    fn blank_cells_are_empty() {
        let board: Board = "| Y |   |\n|   | T |".parse().expect("board parses");
        assert_eq!(board.at(Square::new(0, 1)), Tile::Empty);
        assert_eq!(board.at(Square::new(1, 0)), Tile::Empty);
        assert_eq!(board.to_string(), "| Y | E |\n| E | T |");
    }

    #[test]
    fn non_square_text_is_rejected() {
        let error = "| Y | R |\n| Y | R |\n| Y | R |"
            .parse::<Board>()
            .expect_err("three rows of two");
        assert_eq!(
            error,
            ParseBoardError::Shape(BoardError::NotSquare {
                row: 0,
                len: 2,
                side: 3,
            })
        );
    }

    #[test]
    fn missing_closing_pipe_is_rejected() {
        let error = "| Y | R\n| Y | R |".parse::<Board>().expect_err("open row");
        assert_eq!(error, ParseBoardError::MissingEdge { line: 1 });
    }
}
