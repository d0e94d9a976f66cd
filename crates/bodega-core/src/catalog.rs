//! # Domain Catalogs
//!
//! Lookup tables for the digits embedded in box and pallet codes.
//!
//! Decoding never depends on these tables: an unknown caliber is still a
//! valid code. The catalogs only turn digits into labels for display and
//! supply the choices of the pallet creation form.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Caliber
// =============================================================================

/// Egg grade (size and shell color) encoded as two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Caliber {
    EspecialBlanco,
    ExtraBlanco,
    EspecialColor,
    GrandeBlanco,
    ExtraColor,
    GrandeColor,
    MedianoBlanco,
    SucioTrizado,
    TerceraBlanco,
    TerceraColor,
    JumboBlanco,
    MedianoColor,
    JumboColor,
    CuartaBlanco,
    CuartaColor,
}

impl Caliber {
    /// Every caliber, in the order the creation form lists them.
    pub const ALL: [Caliber; 15] = [
        Caliber::EspecialBlanco,
        Caliber::ExtraBlanco,
        Caliber::GrandeBlanco,
        Caliber::MedianoBlanco,
        Caliber::TerceraBlanco,
        Caliber::CuartaBlanco,
        Caliber::JumboBlanco,
        Caliber::EspecialColor,
        Caliber::ExtraColor,
        Caliber::GrandeColor,
        Caliber::MedianoColor,
        Caliber::TerceraColor,
        Caliber::CuartaColor,
        Caliber::JumboColor,
        Caliber::SucioTrizado,
    ];

    /// The two digits written into codes.
    pub const fn code(&self) -> &'static str {
        match self {
            Caliber::EspecialBlanco => "01",
            Caliber::ExtraBlanco => "02",
            Caliber::EspecialColor => "03",
            Caliber::GrandeBlanco => "04",
            Caliber::ExtraColor => "05",
            Caliber::GrandeColor => "06",
            Caliber::MedianoBlanco => "07",
            Caliber::SucioTrizado => "08",
            Caliber::TerceraBlanco => "09",
            Caliber::TerceraColor => "11",
            Caliber::JumboBlanco => "12",
            Caliber::MedianoColor => "13",
            Caliber::JumboColor => "14",
            Caliber::CuartaBlanco => "15",
            Caliber::CuartaColor => "16",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Caliber::EspecialBlanco => "ESPECIAL BCO",
            Caliber::ExtraBlanco => "EXTRA BCO",
            Caliber::EspecialColor => "ESPECIAL COLOR",
            Caliber::GrandeBlanco => "GRANDE BCO",
            Caliber::ExtraColor => "EXTRA COLOR",
            Caliber::GrandeColor => "GRANDE COLOR",
            Caliber::MedianoBlanco => "MEDIANO BCO",
            Caliber::SucioTrizado => "SUCIO / TRIZADO",
            Caliber::TerceraBlanco => "TERCERA BCO",
            Caliber::TerceraColor => "TERCERA COLOR",
            Caliber::JumboBlanco => "JUMBO BCO",
            Caliber::MedianoColor => "MEDIANO COLOR",
            Caliber::JumboColor => "JUMBO COLOR",
            Caliber::CuartaBlanco => "CUARTA BCO",
            Caliber::CuartaColor => "CUARTA COLOR",
        }
    }

    /// Looks up a caliber by its two-digit code. `10` is unassigned.
    pub fn from_code(code: &str) -> Option<Self> {
        Caliber::ALL.into_iter().find(|c| c.code() == code)
    }
}

// =============================================================================
// Company
// =============================================================================

/// Producer company behind a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Company {
    LomasAltas,
    SantaMarta,
    Coliumo,
    ElMonte,
    Libre,
}

impl Company {
    pub const ALL: [Company; 5] = [
        Company::LomasAltas,
        Company::SantaMarta,
        Company::Coliumo,
        Company::ElMonte,
        Company::Libre,
    ];

    pub const fn number(&self) -> u8 {
        match self {
            Company::LomasAltas => 1,
            Company::SantaMarta => 2,
            Company::Coliumo => 3,
            Company::ElMonte => 4,
            Company::Libre => 5,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Company::LomasAltas => "Lomas Altas",
            Company::SantaMarta => "Santa Marta",
            Company::Coliumo => "Coliumo",
            Company::ElMonte => "El monte",
            Company::Libre => "Libre",
        }
    }

    /// Two-digit form used by pallet codes ("01").
    pub fn pallet_code(&self) -> String {
        format!("{:02}", self.number())
    }

    /// Accepts both the one-digit box form ("1") and the two-digit pallet
    /// form ("01").
    pub fn from_code(code: &str) -> Option<Self> {
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number: u8 = code.parse().ok()?;
        Company::ALL.into_iter().find(|c| c.number() == number)
    }
}

// =============================================================================
// Box Format
// =============================================================================

/// Packing format of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BoxFormat {
    /// 180 eggs.
    Standard180,
    /// 360 eggs.
    Double360,
    /// Mixed contents declared line by line.
    Custom,
}

impl BoxFormat {
    pub const ALL: [BoxFormat; 3] = [BoxFormat::Standard180, BoxFormat::Double360, BoxFormat::Custom];

    pub const fn code(&self) -> &'static str {
        match self {
            BoxFormat::Standard180 => "1",
            BoxFormat::Double360 => "2",
            BoxFormat::Custom => "3",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            BoxFormat::Standard180 => "Formato 1 (180 unidades)",
            BoxFormat::Double360 => "Formato 2 (360 unidades)",
            BoxFormat::Custom => "Formato 3 (Custom)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        BoxFormat::ALL.into_iter().find(|f| f.code() == code)
    }
}

// =============================================================================
// Shift
// =============================================================================

/// Work shift selected when creating a pallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub const fn code(&self) -> &'static str {
        match self {
            Shift::Morning => "1",
            Shift::Afternoon => "2",
            Shift::Night => "3",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Turno 1 (Mañana)",
            Shift::Afternoon => "Turno 2 (Tarde)",
            Shift::Night => "Turno 3 (Noche)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Shift::ALL.into_iter().find(|s| s.code() == code)
    }
}
