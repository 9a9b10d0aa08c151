//! Core value types shared by board state, move generation, and search.

use std::fmt;

use crate::board::mailbox;
use crate::errors::ChessError;

/// Side to move or piece ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Array index for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// The other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Piece kind without ownership information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// All piece kinds in table-index order.
pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Kinds a pawn reaching the last rank can become.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

impl PieceKind {
    /// Array index for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN letter for this kind.
    #[inline]
    pub const fn fen_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Inverse of [`fen_letter`](Self::fen_letter), case-insensitive.
    #[inline]
    pub const fn from_fen_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece occupying one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    #[inline]
    pub const fn fen_char(self) -> char {
        let letter = self.kind.fen_letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    /// Piece for a FEN letter; uppercase means white.
    #[inline]
    pub const fn from_fen_char(letter: char) -> Option<Self> {
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceKind::from_fen_letter(letter) {
            Some(kind) => Some(Self { color, kind }),
            None => None,
        }
    }
}

/// A playable board square, stored as its validated mailbox index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Square for a file and rank, both `0..=7`.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file > 7 || rank > 7 {
            return None;
        }
        Some(Self(mailbox::index_of(file, rank) as u8))
    }

    /// Wrap a raw mailbox index if it lands on the playing surface.
    #[inline]
    pub const fn from_mailbox(index: i16) -> Option<Self> {
        if mailbox::is_on_board(index) {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Parse algebraic square text such as `"e4"`.
    pub fn from_algebraic(text: &str) -> Result<Self, ChessError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(text.to_owned()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Self::new(file, rank).ok_or_else(|| ChessError::InvalidSquare(text.to_owned()))
    }

    /// Index into the 120-cell mailbox array.
    #[inline]
    pub const fn mailbox(self) -> usize {
        self.0 as usize
    }

    /// File, `0..=7` for a through h.
    #[inline]
    pub const fn file(self) -> u8 {
        mailbox::file_of(self.0 as usize)
    }

    /// Rank, `0..=7` for 1 through 8.
    #[inline]
    pub const fn rank(self) -> u8 {
        mailbox::rank_of(self.0 as usize)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

/// A candidate move: origin, destination, and an optional promotion kind.
///
/// Castling and en passant carry no marker; they are recognized from the
/// board when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_letter())?;
        }
        Ok(())
    }
}

/// Castling availability bitmask, one bit per right.
pub type CastlingRights = u8;

/// White may castle kingside.
pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
/// White may castle queenside.
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
/// Black may castle kingside.
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
/// Black may castle queenside.
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
/// All four rights at once.
pub const CASTLE_ALL: CastlingRights = CASTLE_WHITE_KINGSIDE
    | CASTLE_WHITE_QUEENSIDE
    | CASTLE_BLACK_KINGSIDE
    | CASTLE_BLACK_QUEENSIDE;
