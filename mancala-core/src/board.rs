//! Kalah board: pit labels, fixed topology and the sowing rule

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InvalidMove, MancalaError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Pits owned by each side
pub const PITS_PER_SIDE: usize = 6;

/// Pits on the whole board (stores excluded)
pub const NUM_PITS: usize = 12;

/// Pits plus the two stores
pub const NUM_CELLS: usize = 14;

/// Seeds placed in every pit at the start of a match
pub const SEEDS_PER_PIT: u8 = 4;

/// Seeds in play for a standard match
pub const TOTAL_SEEDS: u32 = SEEDS_PER_PIT as u32 * NUM_PITS as u32;

const STORE_ONE: usize = 12;
const STORE_TWO: usize = 13;

// ============================================================================
// PLAYER
// ============================================================================

/// Side of the board. `One` owns pits A-F and store 1, `Two` owns G-L and store 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// This side's store
    pub fn store(self) -> Cell {
        Cell::Store(self)
    }

    /// Own pits in declared order. Search tries moves in this order.
    pub fn pits(self) -> [Pit; PITS_PER_SIDE] {
        match self {
            Player::One => [Pit::A, Pit::B, Pit::C, Pit::D, Pit::E, Pit::F],
            Player::Two => [Pit::G, Pit::H, Pit::I, Pit::J, Pit::K, Pit::L],
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "P1"),
            Player::Two => write!(f, "P2"),
        }
    }
}

impl FromStr for Player {
    type Err = MancalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "p1" | "one" => Ok(Player::One),
            "2" | "p2" | "two" => Ok(Player::Two),
            _ => Err(ConfigError::UnknownPlayer(s.to_string()).into()),
        }
    }
}

// ============================================================================
// PIT AND CELL
// ============================================================================

/// One of the twelve sowable pits, labelled A-L
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub struct Pit(u8);

impl Pit {
    pub const A: Pit = Pit(0);
    pub const B: Pit = Pit(1);
    pub const C: Pit = Pit(2);
    pub const D: Pit = Pit(3);
    pub const E: Pit = Pit(4);
    pub const F: Pit = Pit(5);
    pub const G: Pit = Pit(6);
    pub const H: Pit = Pit(7);
    pub const I: Pit = Pit(8);
    pub const J: Pit = Pit(9);
    pub const K: Pit = Pit(10);
    pub const L: Pit = Pit(11);

    pub const ALL: [Pit; NUM_PITS] = [
        Pit::A, Pit::B, Pit::C, Pit::D, Pit::E, Pit::F, Pit::G, Pit::H, Pit::I, Pit::J, Pit::K,
        Pit::L,
    ];

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn owner(self) -> Player {
        if self.index() < PITS_PER_SIDE {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Pit directly across the board, used for captures
    pub fn opposite(self) -> Pit {
        OPPOSITE[self.index()]
    }

    pub fn label(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parse a single letter, case-insensitive
    pub fn from_label(c: char) -> Option<Pit> {
        let upper = c.to_ascii_uppercase();
        if ('A'..='L').contains(&upper) {
            Some(Pit(upper as u8 - b'A'))
        } else {
            None
        }
    }
}

impl From<Pit> for char {
    fn from(pit: Pit) -> char {
        pit.label()
    }
}

impl TryFrom<char> for Pit {
    type Error = InvalidMove;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Pit::from_label(c).ok_or_else(|| InvalidMove::UnknownPit(c.to_string()))
    }
}

impl FromStr for Pit {
    type Err = MancalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Pit::try_from(c)?),
            _ => Err(InvalidMove::UnknownPit(trimmed.to_string()).into()),
        }
    }
}

impl fmt::Display for Pit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Any of the fourteen cells: a pit or a store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Pit(Pit),
    Store(Player),
}

impl Cell {
    pub const fn index(self) -> usize {
        match self {
            Cell::Pit(pit) => pit.index(),
            Cell::Store(Player::One) => STORE_ONE,
            Cell::Store(Player::Two) => STORE_TWO,
        }
    }

    /// Next cell in the sowing cycle (includes both stores)
    pub fn next(self) -> Cell {
        SOW_NEXT[self.index()]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Pit(pit) => write!(f, "{}", pit),
            Cell::Store(Player::One) => write!(f, "1"),
            Cell::Store(Player::Two) => write!(f, "2"),
        }
    }
}

// ============================================================================
// TOPOLOGY
// ============================================================================

/// Sowing successor of each cell, indexed by `Cell::index`.
/// Cycle: A B C D E F 1 L K J I H G 2 A
const SOW_NEXT: [Cell; NUM_CELLS] = [
    Cell::Pit(Pit::B),         // A
    Cell::Pit(Pit::C),         // B
    Cell::Pit(Pit::D),         // C
    Cell::Pit(Pit::E),         // D
    Cell::Pit(Pit::F),         // E
    Cell::Store(Player::One),  // F
    Cell::Store(Player::Two),  // G
    Cell::Pit(Pit::G),         // H
    Cell::Pit(Pit::H),         // I
    Cell::Pit(Pit::I),         // J
    Cell::Pit(Pit::J),         // K
    Cell::Pit(Pit::K),         // L
    Cell::Pit(Pit::L),         // store 1
    Cell::Pit(Pit::A),         // store 2
];

/// Opposite pit, indexed by `Pit::index`
const OPPOSITE: [Pit; NUM_PITS] = [
    Pit::G, Pit::H, Pit::I, Pit::J, Pit::K, Pit::L,
    Pit::A, Pit::B, Pit::C, Pit::D, Pit::E, Pit::F,
];

// ============================================================================
// BOARD STATE
// ============================================================================

/// Result of a successful sow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Last seed landed in the mover's own store
    pub extra_turn: bool,
    /// Cell that received the last seed
    pub landing: Cell,
    /// Seeds moved into the mover's store by a capture (0 if none)
    pub captured: u8,
}

/// Seed counts for all fourteen cells (clone to branch)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct BoardState {
    cells: [u8; NUM_CELLS],
}

/// Unchecked wire form of `BoardState`
#[derive(Deserialize)]
struct RawBoard {
    cells: [u8; NUM_CELLS],
}

impl TryFrom<RawBoard> for BoardState {
    type Error = ConfigError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut pits = [0u8; NUM_PITS];
        pits.copy_from_slice(&raw.cells[..NUM_PITS]);
        BoardState::from_parts(pits, [raw.cells[STORE_ONE], raw.cells[STORE_TWO]])
    }
}

impl BoardState {
    /// Standard opening position: 4 seeds per pit, empty stores
    pub fn new() -> Self {
        let mut cells = [SEEDS_PER_PIT; NUM_CELLS];
        cells[STORE_ONE] = 0;
        cells[STORE_TWO] = 0;
        Self { cells }
    }

    /// Arbitrary position. `pits` is A-L, `stores` is [store 1, store 2].
    pub fn from_parts(pits: [u8; NUM_PITS], stores: [u8; 2]) -> Result<Self, ConfigError> {
        let total: u32 = pits.iter().chain(stores.iter()).map(|&s| s as u32).sum();
        if total > u8::MAX as u32 {
            return Err(ConfigError::BadPosition {
                input: format!("{:?} {:?}", pits, stores),
                reason: format!("{} seeds is more than a cell can hold", total),
            });
        }

        let mut cells = [0u8; NUM_CELLS];
        cells[..NUM_PITS].copy_from_slice(&pits);
        cells[STORE_ONE] = stores[0];
        cells[STORE_TWO] = stores[1];
        Ok(Self { cells })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn seeds(&self, pit: Pit) -> u8 {
        self.cells[pit.index()]
    }

    pub fn get(&self, cell: Cell) -> u8 {
        self.cells[cell.index()]
    }

    pub fn store(&self, player: Player) -> u8 {
        self.get(player.store())
    }

    /// Seeds still in play on a side (store excluded)
    pub fn side_seeds(&self, player: Player) -> u32 {
        player.pits().iter().map(|&p| self.seeds(p) as u32).sum()
    }

    pub fn side_is_empty(&self, player: Player) -> bool {
        player.pits().iter().all(|&p| self.seeds(p) == 0)
    }

    pub fn total_seeds(&self) -> u32 {
        self.cells.iter().map(|&s| s as u32).sum()
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Non-empty own pits, in declared order
    pub fn possible_moves(&self, player: Player) -> Vec<Pit> {
        player
            .pits()
            .into_iter()
            .filter(|&p| self.seeds(p) > 0)
            .collect()
    }

    /// Validate and sow. Nothing is mutated if the move is rejected.
    pub fn do_move(&mut self, player: Player, pit: Pit) -> Result<MoveOutcome, MancalaError> {
        self.validate(player, pit)?;
        Ok(self.sow(player, pit))
    }

    fn validate(&self, player: Player, pit: Pit) -> Result<(), InvalidMove> {
        let owner = pit.owner();
        if owner != player {
            return Err(InvalidMove::NotOwned {
                pit,
                owner,
                mover: player,
            });
        }
        if self.seeds(pit) == 0 {
            return Err(InvalidMove::EmptyPit(pit));
        }
        Ok(())
    }

    /// Sow a move already known to be legal
    pub(crate) fn sow(&mut self, player: Player, pit: Pit) -> MoveOutcome {
        let mut seeds = std::mem::take(&mut self.cells[pit.index()]);
        let skipped = player.opponent().store();
        let mut cell = Cell::Pit(pit);

        while seeds > 0 {
            cell = cell.next();
            if cell == skipped {
                continue;
            }
            self.cells[cell.index()] += 1;
            seeds -= 1;
        }

        if cell == player.store() {
            return MoveOutcome {
                extra_turn: true,
                landing: cell,
                captured: 0,
            };
        }

        let mut captured = 0;
        if let Cell::Pit(landing) = cell {
            if landing.owner() == player && self.seeds(landing) == 1 {
                let opposite = landing.opposite();
                let across = self.seeds(opposite);
                if across > 0 {
                    captured = across + 1;
                    self.cells[opposite.index()] = 0;
                    self.cells[landing.index()] = 0;
                    self.cells[player.store().index()] += captured;
                }
            }
        }

        MoveOutcome {
            extra_turn: false,
            landing: cell,
            captured,
        }
    }

    /// Move every pit's seeds into its owner's store
    pub(crate) fn sweep(&mut self) {
        for player in Player::BOTH {
            let mut remaining = 0u8;
            for pit in player.pits() {
                remaining += std::mem::take(&mut self.cells[pit.index()]);
            }
            self.cells[player.store().index()] += remaining;
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Position notation: `A,B,C,D,E,F/G,H,I,J,K,L/store1,store2`
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |range: std::ops::Range<usize>| {
            self.cells[range]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        write!(
            f,
            "{}/{}/{},{}",
            join(0..PITS_PER_SIDE),
            join(PITS_PER_SIDE..NUM_PITS),
            self.cells[STORE_ONE],
            self.cells[STORE_TWO]
        )
    }
}

impl FromStr for BoardState {
    type Err = MancalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = |reason: &str| ConfigError::BadPosition {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let groups: Vec<&str> = s.trim().split('/').collect();
        if groups.len() != 3 {
            return Err(bad("expected three `/`-separated groups").into());
        }

        let parse_group = |group: &str, expected: usize| -> Result<Vec<u8>, ConfigError> {
            let values = group
                .split(',')
                .map(|v| v.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| bad(&e.to_string()))?;
            if values.len() != expected {
                return Err(bad(&format!("expected {} values in `{}`", expected, group)));
            }
            Ok(values)
        };

        let one = parse_group(groups[0], PITS_PER_SIDE)?;
        let two = parse_group(groups[1], PITS_PER_SIDE)?;
        let stores = parse_group(groups[2], 2)?;

        let mut pits = [0u8; NUM_PITS];
        pits[..PITS_PER_SIDE].copy_from_slice(&one);
        pits[PITS_PER_SIDE..].copy_from_slice(&two);

        Ok(BoardState::from_parts(pits, [stores[0], stores[1]])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(pits: [u8; NUM_PITS], stores: [u8; 2]) -> BoardState {
        BoardState::from_parts(pits, stores).unwrap()
    }

    #[test]
    fn test_initial_position() {
        let b = BoardState::new();
        for pit in Pit::ALL {
            assert_eq!(b.seeds(pit), 4);
        }
        assert_eq!(b.store(Player::One), 0);
        assert_eq!(b.store(Player::Two), 0);
        assert_eq!(b.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_sowing_cycle_visits_every_cell() {
        let mut cell = Cell::Pit(Pit::A);
        let mut seen = [false; NUM_CELLS];
        for _ in 0..NUM_CELLS {
            assert!(!seen[cell.index()], "{} visited twice", cell);
            seen[cell.index()] = true;
            cell = cell.next();
        }
        assert_eq!(cell, Cell::Pit(Pit::A));
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_opposite_pairs() {
        for pit in Pit::ALL {
            assert_eq!(pit.opposite().opposite(), pit);
            assert_ne!(pit.opposite().owner(), pit.owner());
        }
        assert_eq!(Pit::B.opposite(), Pit::H);
        assert_eq!(Pit::L.opposite(), Pit::F);
    }

    #[test]
    fn test_possible_moves_declared_order() {
        let b = board([0, 3, 0, 1, 0, 2, 5, 0, 1, 0, 0, 9], [0, 0]);
        assert_eq!(b.possible_moves(Player::One), vec![Pit::B, Pit::D, Pit::F]);
        assert_eq!(b.possible_moves(Player::Two), vec![Pit::G, Pit::I, Pit::L]);
    }

    #[test]
    fn test_move_into_own_store_grants_extra_turn() {
        let mut b = BoardState::new();
        let outcome = b.do_move(Player::One, Pit::C).unwrap();

        assert!(outcome.extra_turn);
        assert_eq!(outcome.landing, Cell::Store(Player::One));
        assert_eq!(b.seeds(Pit::C), 0);
        assert_eq!(b.seeds(Pit::D), 5);
        assert_eq!(b.seeds(Pit::E), 5);
        assert_eq!(b.seeds(Pit::F), 5);
        assert_eq!(b.store(Player::One), 1);
        for pit in Player::Two.pits() {
            assert_eq!(b.seeds(pit), 4);
        }
        assert_eq!(b.store(Player::Two), 0);
    }

    #[test]
    fn test_player_two_extra_turn() {
        // J sows I, H, G, store 2
        let mut b = BoardState::new();
        let outcome = b.do_move(Player::Two, Pit::J).unwrap();
        assert!(outcome.extra_turn);
        assert_eq!(b.store(Player::Two), 1);
        assert_eq!(b.seeds(Pit::G), 5);
    }

    #[test]
    fn test_capture_from_opposite_pit() {
        let mut b = board([1, 0, 4, 4, 4, 4, 4, 5, 4, 4, 4, 4], [0, 0]);
        let before = b.total_seeds();

        let outcome = b.do_move(Player::One, Pit::A).unwrap();

        assert!(!outcome.extra_turn);
        assert_eq!(outcome.landing, Cell::Pit(Pit::B));
        assert_eq!(outcome.captured, 6);
        assert_eq!(b.seeds(Pit::B), 0);
        assert_eq!(b.seeds(Pit::H), 0);
        assert_eq!(b.store(Player::One), 6);
        assert_eq!(b.total_seeds(), before);
    }

    #[test]
    fn test_no_capture_when_opposite_empty() {
        let mut b = board([1, 0, 4, 4, 4, 4, 4, 0, 4, 4, 4, 4], [0, 0]);
        let outcome = b.do_move(Player::One, Pit::A).unwrap();

        assert_eq!(outcome.captured, 0);
        assert_eq!(b.seeds(Pit::B), 1);
        assert_eq!(b.store(Player::One), 0);
    }

    #[test]
    fn test_no_capture_on_opponent_pit() {
        // F sows store 1, L, K, J
        let mut b = BoardState::new();
        let outcome = b.do_move(Player::One, Pit::F).unwrap();

        assert!(!outcome.extra_turn);
        assert_eq!(outcome.landing, Cell::Pit(Pit::J));
        assert_eq!(outcome.captured, 0);
        assert_eq!(b.seeds(Pit::J), 5);
        assert_eq!(b.store(Player::One), 1);
    }

    #[test]
    fn test_opponent_store_is_skipped() {
        // F sows 1, L..G, skips store 2, lands on A (empty) opposite G (1 seed)
        let mut b = board([0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0], [0, 0]);
        let outcome = b.do_move(Player::One, Pit::F).unwrap();

        assert_eq!(b.store(Player::Two), 0);
        assert_eq!(outcome.landing, Cell::Pit(Pit::A));
        assert_eq!(outcome.captured, 2);
        assert_eq!(b.store(Player::One), 3);
        assert_eq!(b.seeds(Pit::G), 0);
        assert_eq!(b.total_seeds(), 8);
    }

    #[test]
    fn test_full_lap_revisits_source_pit() {
        // 13 seeds go all the way around and the last one lands in the emptied source
        let mut b = board([13, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], [0, 0]);
        let outcome = b.do_move(Player::One, Pit::A).unwrap();

        assert_eq!(outcome.landing, Cell::Pit(Pit::A));
        assert_eq!(outcome.captured, 2);
        assert_eq!(b.seeds(Pit::A), 0);
        assert_eq!(b.seeds(Pit::G), 0);
        assert_eq!(b.store(Player::One), 3);
        assert_eq!(b.store(Player::Two), 0);
        assert_eq!(b.total_seeds(), 13);
    }

    #[test]
    fn test_invalid_moves_leave_board_untouched() {
        let mut b = board([0, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4], [0, 0]);
        let snapshot = b.clone();

        let err = b.do_move(Player::One, Pit::A).unwrap_err();
        assert_eq!(err, MancalaError::InvalidMove(InvalidMove::EmptyPit(Pit::A)));

        let err = b.do_move(Player::One, Pit::G).unwrap_err();
        assert!(matches!(
            err,
            MancalaError::InvalidMove(InvalidMove::NotOwned { pit: Pit::G, .. })
        ));

        assert_eq!(b, snapshot);
    }

    #[test]
    fn test_sweep_moves_pits_to_owner_stores() {
        let mut b = board([0, 0, 0, 0, 0, 0, 1, 2, 3, 0, 0, 4], [20, 18]);
        b.sweep();
        assert_eq!(b.store(Player::One), 20);
        assert_eq!(b.store(Player::Two), 28);
        assert!(Pit::ALL.iter().all(|&p| b.seeds(p) == 0));
        assert_eq!(b.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_pit_parsing() {
        assert_eq!("c".parse::<Pit>().unwrap(), Pit::C);
        assert_eq!(" L ".parse::<Pit>().unwrap(), Pit::L);
        assert!(matches!(
            "M".parse::<Pit>(),
            Err(MancalaError::InvalidMove(InvalidMove::UnknownPit(_)))
        ));
        assert!("AB".parse::<Pit>().is_err());
        assert!("".parse::<Pit>().is_err());
    }

    #[test]
    fn test_pit_serializes_as_label() {
        let json = serde_json::to_string(&Pit::H).unwrap();
        assert_eq!(json, "\"H\"");
        let back: Pit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Pit::H);
        assert!(serde_json::from_str::<Pit>("\"Z\"").is_err());
    }

    #[test]
    fn test_position_notation() {
        let b: BoardState = "1,0,4,4,4,4/4,5,4,4,4,4/3,2".parse().unwrap();
        assert_eq!(b.seeds(Pit::A), 1);
        assert_eq!(b.seeds(Pit::H), 5);
        assert_eq!(b.store(Player::One), 3);
        assert_eq!(b.store(Player::Two), 2);
        assert_eq!(b.to_string(), "1,0,4,4,4,4/4,5,4,4,4,4/3,2");
        assert_eq!(BoardState::new().to_string(), "4,4,4,4,4,4/4,4,4,4,4,4/0,0");

        assert!("4,4,4/4,4,4/0,0".parse::<BoardState>().is_err());
        assert!("4,4,4,4,4,4/4,4,4,4,4,4".parse::<BoardState>().is_err());
        assert!("x,4,4,4,4,4/4,4,4,4,4,4/0,0".parse::<BoardState>().is_err());
        assert!("200,200,0,0,0,0/0,0,0,0,0,0/0,0".parse::<BoardState>().is_err());
    }

    #[test]
    fn test_deserialize_checks_seed_total() {
        let json = serde_json::to_string(&BoardState::new()).unwrap();
        let back: BoardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BoardState::new());

        let overfull = r#"{"cells":[0,0,0,0,0,1,0,0,0,0,0,0,255,0]}"#;
        assert!(serde_json::from_str::<BoardState>(overfull).is_err());

        let full = r#"{"cells":[0,0,0,0,0,1,0,0,0,0,0,0,254,0]}"#;
        let mut board: BoardState = serde_json::from_str(full).unwrap();
        let outcome = board.do_move(Player::One, Pit::F).unwrap();
        assert!(outcome.extra_turn);
        assert_eq!(board.store(Player::One), 255);
    }

    #[test]
    fn test_player_parsing() {
        assert_eq!("p2".parse::<Player>().unwrap(), Player::Two);
        assert_eq!("1".parse::<Player>().unwrap(), Player::One);
        assert!("3".parse::<Player>().is_err());
    }
}
