//! Document assembly modules.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, independently toggleable step of document assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Type,
    Date,
    Title,
    Fields,
    Artworks,
    Persons,
    Views,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Type,
        Module::Date,
        Module::Title,
        Module::Fields,
        Module::Artworks,
        Module::Persons,
        Module::Views,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Type => "type",
            Module::Date => "date",
            Module::Title => "title",
            Module::Fields => "fields",
            Module::Artworks => "artworks",
            Module::Persons => "persons",
            Module::Views => "views",
        }
    }

    /// Whether the module runs overlap queries against the record's anchor.
    pub fn uses_overlap_queries(&self) -> bool {
        matches!(self, Module::Artworks | Module::Persons | Module::Views)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of enabled modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleSet(BTreeSet<Module>);

impl ModuleSet {
    /// Every module enabled.
    pub fn all() -> Self {
        Self(Module::ALL.into_iter().collect())
    }

    pub fn contains(&self, module: Module) -> bool {
        self.0.contains(&module)
    }

    pub fn iter(&self) -> impl Iterator<Item = Module> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ModuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Module> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
