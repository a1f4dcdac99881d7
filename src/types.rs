use crate::error::Error;
use std::fmt;
use std::str::FromStr;

// Fast hash maps using AHash instead of the default SipHash.
// Also import `HashMapExt` when you need `::new()` or `::with_capacity()`.
pub type HashMap<K, V> = ahash::HashMap<K, V>;
pub use ahash::HashMapExt;

/// Alignment orientation as reported by the aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl FromStr for Strand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Err(Error::InvalidStrand { value: s.to_string() }),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Which side of the aligned fragment a flank sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlankKind {
    Upstream,
    Downstream,
}

impl FlankKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlankKind::Upstream => "upstream",
            FlankKind::Downstream => "downstream",
        }
    }
}

impl fmt::Display for FlankKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
