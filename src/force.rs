use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumIter;


// White is the first-moving (host) side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter)]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            Force::White => "white",
            Force::Black => "black",
        }
    }

    // The server is not consistent about casing ("WHITE" in piece lists,
    // "white" in move broadcasts), so parse ignoring case.
    pub fn from_wire_name(s: &str) -> Option<Force> {
        if s.eq_ignore_ascii_case("white") {
            Some(Force::White)
        } else if s.eq_ignore_ascii_case("black") {
            Some(Force::Black)
        } else {
            None
        }
    }
}

impl Serialize for Force {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Force {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Force::from_wire_name(&s).ok_or_else(|| D::Error::custom(format!("unknown force: {s:?}")))
    }
}
