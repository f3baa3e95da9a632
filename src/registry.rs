//! The fixed technology lookup table.

use std::collections::HashSet;
use std::sync::OnceLock;

use thiserror::Error;

use crate::model::LabelEntry;

const BUILTIN_TABLE: &str = include_str!("../assets/technologies.json");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed technology table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("technology {0:?} is listed twice")]
    Duplicate(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelRegistry {
    entries: Vec<LabelEntry>,
}

impl LabelRegistry {
    pub fn from_json(raw: &str) -> Result<Self, RegistryError> {
        let entries: Vec<LabelEntry> = serde_json::from_str(raw)?;
        let mut seen = HashSet::new();
        for e in &entries {
            if !seen.insert(e.name.as_str()) {
                return Err(RegistryError::Duplicate(e.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Process-wide table, parsed on first use. A broken table renders nothing.
    pub fn builtin() -> &'static LabelRegistry {
        static REGISTRY: OnceLock<LabelRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            LabelRegistry::from_json(BUILTIN_TABLE).unwrap_or_else(|e| {
                log::error!("technology table unusable: {e}");
                LabelRegistry::default()
            })
        })
    }

    pub fn resolve(&self, name: &str) -> Option<&LabelEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Resolve names in input order. Unknown names are skipped and repeated
    /// names produce a single entry.
    pub fn resolve_all<I>(&self, names: I) -> Vec<LabelEntry>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for name in names {
            let name = name.as_ref();
            match self.resolve(name) {
                Some(entry) if seen.insert(entry.name.as_str()) => out.push(entry.clone()),
                Some(_) => {}
                None => log::debug!("no label configured for {name:?}"),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HexColor, Point2};

    #[test]
    fn builtin_table_loads_all_entries() {
        let reg = LabelRegistry::builtin();
        assert_eq!(reg.entries.len(), 8);
        for name in [
            "TypeScript",
            "JavaScript",
            "AWS",
            "React Router",
            "Zustand",
            "Firebase",
            "Material UI",
            "Chrome Extensions",
        ] {
            assert!(reg.resolve(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn unknown_name_is_dropped_silently() {
        let reg = LabelRegistry::builtin();
        let labels = reg.resolve_all(&["TypeScript", "Unknown"]);
        assert_eq!(labels.len(), 1);
        let ts = &labels[0];
        assert_eq!(ts.name, "TypeScript");
        assert_eq!(ts.color, HexColor::parse("#3178c6").unwrap());
        assert_eq!(ts.flat, Point2::new(20.0, 60.0));
        assert_eq!((ts.spatial.x, ts.spatial.y, ts.spatial.z), (-4.0, 4.0, 0.0));
    }

    #[test]
    fn known_names_resolve_once_in_input_order() {
        let reg = LabelRegistry::builtin();
        let names = vec![
            "Zustand".to_string(),
            "AWS".to_string(),
            "Zustand".to_string(),
        ];
        let labels = reg.resolve_all(&names);
        let got: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(got, ["Zustand", "AWS"]);
    }

    #[test]
    fn empty_input_renders_nothing() {
        let names: Vec<String> = Vec::new();
        assert!(LabelRegistry::builtin().resolve_all(&names).is_empty());
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let raw = r#"[{"name":"X","color":"blue","flat":{"x":1,"y":2},"spatial":{"x":0,"y":0,"z":0}}]"#;
        assert!(matches!(
            LabelRegistry::from_json(raw),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let one = r##"{"name":"X","color":"#000000","flat":{"x":1,"y":2},"spatial":{"x":0,"y":0,"z":0}}"##;
        let raw = format!("[{one},{one}]");
        assert!(matches!(
            LabelRegistry::from_json(&raw),
            Err(RegistryError::Duplicate(n)) if n == "X"
        ));
    }
}
