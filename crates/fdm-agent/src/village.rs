//! The surveyed villages.

use std::fmt;
use std::str::FromStr;

use fdm_core::FdmError;

/// Village a household belongs to.  Only used as a grouping key: the
/// trapped-probability model carries one fixed effect per village.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Village {
    AlGaili,
    WawiseGarb,
    /// Reference category of the village fixed effects.
    WadRamliCamp,
    Eltomaniat,
    AlShuhada,
    WawiseOumOjaija,
    WadRamli,
}

impl Village {
    pub const COUNT: usize = 7;

    pub const ALL: [Village; Village::COUNT] = [
        Village::AlGaili,
        Village::WawiseGarb,
        Village::WadRamliCamp,
        Village::Eltomaniat,
        Village::AlShuhada,
        Village::WawiseOumOjaija,
        Village::WadRamli,
    ];

    /// Position in [`Village::ALL`], used to index per-village arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Village::AlGaili         => "Al-Gaili",
            Village::WawiseGarb      => "Wawise Garb",
            Village::WadRamliCamp    => "Wad Ramli Camp",
            Village::Eltomaniat      => "Eltomaniat",
            Village::AlShuhada       => "Al-Shuhada",
            Village::WawiseOumOjaija => "Wawise Oum Ojaija",
            Village::WadRamli        => "Wad Ramli",
        }
    }
}

impl fmt::Display for Village {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Village {
    type Err = FdmError;

    /// Case-insensitive match on the survey name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Village::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FdmError::UnknownKey { kind: "village", key: s.to_owned() })
    }
}
