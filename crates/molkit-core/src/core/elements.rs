use phf::{Map, phf_map};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Constant chemical data attached to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementProperties {
    /// Maximum number of bonds an atom of this element may hold.
    pub valence: usize,
    /// Atomic weight used for molecular weight sums.
    pub weight: f64,
    /// Position in the canonical element order (C, H, O, then alphabetical).
    pub rank: u8,
}

#[rustfmt::skip]
static ELEMENT_PROPERTIES: Map<&'static str, ElementProperties> = phf_map! {
    "C"  => ElementProperties { valence: 4, weight: 12.0, rank: 0 },
    "H"  => ElementProperties { valence: 1, weight: 1.0,  rank: 1 },
    "O"  => ElementProperties { valence: 2, weight: 16.0, rank: 2 },
    "B"  => ElementProperties { valence: 3, weight: 10.8, rank: 3 },
    "Br" => ElementProperties { valence: 1, weight: 80.0, rank: 4 },
    "Cl" => ElementProperties { valence: 1, weight: 35.5, rank: 5 },
    "F"  => ElementProperties { valence: 1, weight: 19.0, rank: 6 },
    "Mg" => ElementProperties { valence: 2, weight: 24.3, rank: 7 },
    "N"  => ElementProperties { valence: 3, weight: 14.0, rank: 8 },
    "P"  => ElementProperties { valence: 3, weight: 31.0, rank: 9 },
    "S"  => ElementProperties { valence: 2, weight: 32.1, rank: 10 },
};

static SYMBOL_LOOKUP: Map<&'static str, Element> = phf_map! {
    "H" => Element::H,
    "B" => Element::B,
    "C" => Element::C,
    "N" => Element::N,
    "O" => Element::O,
    "F" => Element::F,
    "Mg" => Element::Mg,
    "P" => Element::P,
    "S" => Element::S,
    "Cl" => Element::Cl,
    "Br" => Element::Br,
};

/// The closed set of elements a molecule can be built from.
///
/// Elements are ordered by their canonical rank rather than alphabetically or by
/// atomic number, so sorting a collection of elements yields formula order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    Mg,
    P,
    S,
    Cl,
    Br,
}

impl Element {
    /// Every supported element, in canonical order.
    pub const ALL: [Element; 11] = [
        Element::C,
        Element::H,
        Element::O,
        Element::B,
        Element::Br,
        Element::Cl,
        Element::F,
        Element::Mg,
        Element::N,
        Element::P,
        Element::S,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Mg => "Mg",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Br => "Br",
        }
    }

    /// Looks up the constant property record for this element.
    pub fn properties(self) -> &'static ElementProperties {
        // Every variant has an entry; see `property_table_covers_every_element`.
        &ELEMENT_PROPERTIES[self.symbol()]
    }

    pub fn valence(self) -> usize {
        self.properties().valence
    }

    pub fn weight(self) -> f64 {
        self.properties().weight
    }

    pub fn canonical_rank(self) -> u8 {
        self.properties().rank
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_rank().cmp(&other.canonical_rank())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown element symbol '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses a case-sensitive element symbol such as `"C"` or `"Cl"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SYMBOL_LOOKUP
            .get(s)
            .copied()
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl TryFrom<String> for Element {
    type Error = ParseElementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_table_covers_every_element() {
        for element in Element::ALL {
            assert!(ELEMENT_PROPERTIES.contains_key(element.symbol()));
            assert_eq!(SYMBOL_LOOKUP.get(element.symbol()), Some(&element));
        }
        assert_eq!(ELEMENT_PROPERTIES.len(), Element::ALL.len());
    }

    #[test]
    fn valences_match_common_bonding_capacity() {
        assert_eq!(Element::H.valence(), 1);
        assert_eq!(Element::B.valence(), 3);
        assert_eq!(Element::C.valence(), 4);
        assert_eq!(Element::N.valence(), 3);
        assert_eq!(Element::O.valence(), 2);
        assert_eq!(Element::F.valence(), 1);
        assert_eq!(Element::Mg.valence(), 2);
        assert_eq!(Element::P.valence(), 3);
        assert_eq!(Element::S.valence(), 2);
        assert_eq!(Element::Cl.valence(), 1);
        assert_eq!(Element::Br.valence(), 1);
    }

    #[test]
    fn weights_are_fixed_constants() {
        assert_eq!(Element::H.weight(), 1.0);
        assert_eq!(Element::C.weight(), 12.0);
        assert_eq!(Element::O.weight(), 16.0);
        assert_eq!(Element::Mg.weight(), 24.3);
        assert_eq!(Element::S.weight(), 32.1);
        assert_eq!(Element::Cl.weight(), 35.5);
        assert_eq!(Element::Br.weight(), 80.0);
    }

    #[test]
    fn sorting_yields_canonical_order() {
        let mut elements = vec![
            Element::S,
            Element::H,
            Element::Br,
            Element::O,
            Element::C,
            Element::N,
            Element::Mg,
            Element::B,
            Element::P,
            Element::F,
            Element::Cl,
        ];
        elements.sort();
        assert_eq!(elements, Element::ALL.to_vec());
    }

    #[test]
    fn canonical_ranks_are_distinct_and_dense() {
        let mut ranks: Vec<u8> = Element::ALL.iter().map(|e| e.canonical_rank()).collect();
        ranks.sort();
        assert_eq!(ranks, (0..11).collect::<Vec<u8>>());
    }

    #[test]
    fn from_str_parses_known_symbols() {
        assert_eq!("C".parse(), Ok(Element::C));
        assert_eq!("Cl".parse(), Ok(Element::Cl));
        assert_eq!("Mg".parse(), Ok(Element::Mg));
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert_eq!(
            "CL".parse::<Element>(),
            Err(ParseElementError("CL".to_string()))
        );
        assert!("c".parse::<Element>().is_err());
        assert!("Xe".parse::<Element>().is_err());
        assert!("".parse::<Element>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for element in Element::ALL {
            assert_eq!(element.to_string().parse(), Ok(element));
        }
    }
}
