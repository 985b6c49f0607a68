use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// Anything that can decide the fate of a single cell from its neighbour count.
pub trait StepRule {
    /// Next state of a cell that is currently `alive` and has `neighbours` live neighbours.
    fn next_state(&self, alive: bool, neighbours: u8) -> bool;
}

/// The B3/S23 rule, evaluated directly.
///
/// A live cell survives with 2 or 3 neighbours, a dead cell is born with exactly 3. Every other
/// combination is dead.
pub fn next_state(alive: bool, neighbours: u8) -> bool {
    matches!((alive, neighbours), (true, 2) | (true, 3) | (false, 3))
}

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }
}

impl StepRule for RuleSet {
    fn next_state(&self, alive: bool, neighbours: u8) -> bool {
        if neighbours > 8 {
            return false;
        }

        let set = if alive {
            self.survivals()
        } else {
            self.births()
        };

        set & (1 << neighbours) != 0
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=8u8)
                .filter(|&n| set & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Rulestring is empty")]
    Empty,

    #[error("Expected 'b' or 's' before '{0}'")]
    MissingPrefix(char),

    #[error("Neighbour count {0} is out of range, expected 0 to 8")]
    OutOfRange(u32),

    #[error("Unexpected character '{0}' in rulestring")]
    InvalidChar(char),
}

/// Parses rulestrings of the form `b3s23`, `B3/S23` or `b36/s23`.
impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Start,
            Birth,
            Survival,
        }

        let s = s.trim();
        if s.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut state = State::Start;
        let (mut b, mut s_set) = (0u16, 0u16);

        for c in s.chars() {
            match c {
                'b' | 'B' => {
                    state = State::Birth;
                }
                's' | 'S' => {
                    state = State::Survival;
                }
                '/' => {}
                n => {
                    let n = n.to_digit(10).ok_or(RuleSetError::InvalidChar(n))?;

                    if n > 8 {
                        return Err(RuleSetError::OutOfRange(n));
                    }

                    match state {
                        State::Start => return Err(RuleSetError::MissingPrefix(c)),
                        State::Birth => b |= 1 << n,
                        State::Survival => s_set |= 1 << n,
                    }
                }
            }
        }

        Ok(RuleSet::new(b, s_set))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn b3s23_matches_direct_rule() {
        for alive in [false, true] {
            for n in 0..=8 {
                assert_eq!(
                    B3S23.next_state(alive, n),
                    next_state(alive, n),
                    "alive = {alive}, n = {n}"
                );
            }
        }
    }

    #[test]
    fn parse_forms() {
        assert_eq!("b3s23".parse::<RuleSet>().unwrap(), B3S23);
        assert_eq!("B3/S23".parse::<RuleSet>().unwrap(), B3S23);
        assert_eq!(
            "b36/s23".parse::<RuleSet>().unwrap(),
            RuleSet::new(0b100_1000, 0b1100)
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<RuleSet>(), Err(RuleSetError::Empty));
        assert_eq!("3s23".parse::<RuleSet>(), Err(RuleSetError::MissingPrefix('3')));
        assert_eq!("b9s23".parse::<RuleSet>(), Err(RuleSetError::OutOfRange(9)));
        assert_eq!("b3x23".parse::<RuleSet>(), Err(RuleSetError::InvalidChar('x')));
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(B3S23.to_string(), "B3/S23");

        let highlife: RuleSet = "b36s23".parse().unwrap();
        assert_eq!(highlife.to_string(), "B36/S23");
        assert_eq!(highlife.to_string().parse::<RuleSet>().unwrap(), highlife);
    }

    #[test]
    fn counts_past_eight_are_dead() {
        let all: RuleSet = "b012345678s012345678".parse().unwrap();
        assert!(all.next_state(true, 8));
        assert!(!all.next_state(true, 9));
    }
}
