use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// News outlets whose front-page headlines are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outlet {
    Ynet,
    IsraelHayom,
    Haaretz,
    Maariv,
    Nrg,
    Mako,
    Walla,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown outlet '{0}'")]
pub struct UnknownOutlet(pub String);

impl Outlet {
    pub const ALL: [Outlet; 7] = [
        Outlet::Ynet,
        Outlet::IsraelHayom,
        Outlet::Haaretz,
        Outlet::Maariv,
        Outlet::Nrg,
        Outlet::Mako,
        Outlet::Walla,
    ];

    /// Name as written in the headline log and in class levels.
    pub fn name(self) -> &'static str {
        match self {
            Outlet::Ynet => "YNET",
            Outlet::IsraelHayom => "ISRAEL_HAYOM",
            Outlet::Haaretz => "HAARETZ",
            Outlet::Maariv => "MAARIV",
            Outlet::Nrg => "NRG",
            Outlet::Mako => "MAKO",
            Outlet::Walla => "WALLA",
        }
    }

    /// Two-letter code used in output file names.
    pub fn code(self) -> &'static str {
        match self {
            Outlet::Ynet => "yn",
            Outlet::IsraelHayom => "ih",
            Outlet::Haaretz => "ha",
            Outlet::Maariv => "mv",
            Outlet::Nrg => "nr",
            Outlet::Mako => "mk",
            Outlet::Walla => "wa",
        }
    }

    pub fn dir_name(self) -> String {
        self.name().to_lowercase()
    }

    pub fn domain(self) -> String {
        format!("www.{}.co.il/", self.dir_name().replace('_', ""))
    }

    pub fn index_file(self) -> &'static str {
        match self {
            Outlet::Ynet => "home/0,7340,L-8,00.html",
            _ => "index.html",
        }
    }

    pub fn charset(self) -> &'static str {
        match self {
            Outlet::Nrg => "windows-1255",
            _ => "UTF8",
        }
    }
}

impl fmt::Display for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Outlet {
    type Err = UnknownOutlet;

    /// Accepts either the log name (`ISRAEL_HAYOM`) or the two-letter code (`ih`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Outlet::ALL
            .iter()
            .copied()
            .find(|o| o.name().eq_ignore_ascii_case(s) || o.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOutlet(s.to_string()))
    }
}

/// Parses a comma-separated outlet list; `ALL` expands to every outlet.
/// Order is preserved and duplicates are dropped.
pub fn parse_outlet_list(s: &str) -> Result<Vec<Outlet>, UnknownOutlet> {
    let mut out: Vec<Outlet> = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if part.eq_ignore_ascii_case("all") {
            for o in Outlet::ALL {
                if !out.contains(&o) { out.push(o); }
            }
            continue;
        }
        let o: Outlet = part.parse()?;
        if !out.contains(&o) { out.push(o); }
    }
    Ok(out)
}
