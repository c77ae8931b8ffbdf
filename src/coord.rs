use std::fmt;

use itertools::Itertools;


pub const NUM_COLS: u8 = 8;
pub const NUM_ROWS: u8 = 8;


// Board coordinate as the server reports it: both axes 1-based, `x` running
// across the files, `y` up the ranks from the host's side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    #[track_caller]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(1 <= x && x <= NUM_COLS);
        assert!(1 <= y && y <= NUM_ROWS);
        Coord { x, y }
    }

    pub fn checked(x: u8, y: u8) -> Option<Self> {
        ((1..=NUM_COLS).contains(&x) && (1..=NUM_ROWS).contains(&y)).then_some(Coord { x, y })
    }

    pub const fn x(self) -> u8 { self.x }
    pub const fn y(self) -> u8 { self.y }

    pub fn all() -> impl Iterator<Item = Coord> {
        (1..=NUM_COLS).cartesian_product(1..=NUM_ROWS).map(|(x, y)| Coord { x, y })
    }

    // Stable wire form: file letter plus rank digit, e.g. (2, 3) -> "b3".
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.x - 1) as char, self.y)
    }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let (file, rank) = (chars.next()?, chars.next()?);
        if chars.next().is_some() || !file.is_ascii_lowercase() || !rank.is_ascii_digit() {
            return None;
        }
        Self::checked(file as u8 - b'a' + 1, rank as u8 - b'0')
    }

    pub fn distance(self, other: Coord) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }

    // Drag payloads carry the source square as the decimal digits of x and y
    // concatenated with no separator. This stays unambiguous only while both
    // axes are single-digit; growing the grid means a wire format change, not
    // a local fix.
    pub fn to_source_token(self) -> String {
        format!("{}{}", self.x, self.y)
    }

    pub fn from_source_token(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let (x, y) = (chars.next()?, chars.next()?);
        if chars.next().is_some() || !x.is_ascii_digit() || !y.is_ascii_digit() {
            return None;
        }
        Self::checked(x as u8 - b'0', y as u8 - b'0')
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}
