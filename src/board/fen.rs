use std::str::FromStr;

use super::error::FenError;
use super::{Board, CastleSide, CastlingRights, Color, GameState, Piece, PieceType, Square};

impl GameState {
    /// Parse a position from FEN notation.
    ///
    /// The half-move clock and full-move number are optional and default to
    /// `0` and `1`. Each side must have exactly one king, and the side that
    /// just moved may not be left in check.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling_rights = CastlingRights::none();
        for c in parts[2].chars() {
            match c {
                'K' => castling_rights.set(Color::White, CastleSide::King),
                'Q' => castling_rights.set(Color::White, CastleSide::Queen),
                'k' => castling_rights.set(Color::Black, CastleSide::King),
                'q' => castling_rights.set(Color::Black, CastleSide::Queen),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        let en_passant_target = match parts[3] {
            "-" => None,
            text => {
                let invalid = || FenError::InvalidEnPassant {
                    found: text.to_string(),
                };
                let sq: Square = text.parse().map_err(|_| invalid())?;
                Some(sq)
            }
        };

        let halfmove_clock = parse_counter(parts.get(4))?.unwrap_or(0);
        let fullmove_number = parse_counter(parts.get(5))?.unwrap_or(1);

        GameState::from_setup(
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
        )
        .validated()
    }

    /// Reject set-ups that cannot arise in play: an en passant target with no
    /// pawn that just moved past it, or the side not on move standing in check.
    pub(crate) fn validated(self) -> Result<Self, FenError> {
        if let Some(target) = self.en_passant_target {
            if !en_passant_target_is_valid(&self.board, self.side_to_move, target) {
                return Err(FenError::InvalidEnPassant {
                    found: target.to_string(),
                });
            }
        }

        let waiting = self.side_to_move.opponent();
        if self.is_in_check(waiting) {
            return Err(FenError::OpponentInCheck {
                color: waiting.to_string(),
            });
        }
        Ok(self)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some(piece) = self.board.piece_at(Square::at(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

/// Rank of a valid en passant target when `side_to_move` is about to move.
fn en_passant_rank(side_to_move: Color) -> usize {
    match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    }
}

/// The target must be empty, on the right rank, with the pushed enemy pawn
/// one step past it and its start square vacated.
fn en_passant_target_is_valid(board: &Board, side_to_move: Color, target: Square) -> bool {
    let pusher = side_to_move.opponent();
    let step = pusher.pawn_direction();
    let pawn = Piece::new(pusher, PieceType::Pawn);

    target.rank() == en_passant_rank(side_to_move)
        && board.is_empty(target)
        && target
            .offset(-step, 0)
            .is_some_and(|origin| board.is_empty(origin))
        && target
            .offset(step, 0)
            .is_some_and(|landed| board.piece_at(landed) == Some(pawn))
}

fn parse_placement(text: &str) -> Result<Board, FenError> {
    let rows: Vec<&str> = text.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidRankCount { found: rows.len() });
    }

    let mut board = Board::empty();
    let mut kings = [0usize; 2];
    for (row_idx, row) in rows.iter().enumerate() {
        let rank = 7 - row_idx;
        let mut file = 0;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            if file >= 8 {
                return Err(FenError::InvalidFileCount {
                    rank: rank + 1,
                    files: file + 1,
                });
            }
            if piece.kind == PieceType::King {
                kings[piece.color.index()] += 1;
                // Board::place refuses a second king; report it as a count instead
                if kings[piece.color.index()] > 1 {
                    file += 1;
                    continue;
                }
            }
            board.place(Square::at(rank, file), piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::InvalidFileCount {
                rank: rank + 1,
                files: file,
            });
        }
    }

    for color in Color::BOTH {
        if kings[color.index()] != 1 {
            return Err(FenError::InvalidKingCount {
                color: color.to_string(),
                found: kings[color.index()],
            });
        }
    }
    Ok(board)
}

fn parse_counter(field: Option<&&str>) -> Result<Option<u32>, FenError> {
    field
        .map(|text| {
            text.parse().map_err(|_| FenError::InvalidCounter {
                found: (*text).to_string(),
            })
        })
        .transpose()
}

impl FromStr for GameState {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::try_from_fen(s)
    }
}
