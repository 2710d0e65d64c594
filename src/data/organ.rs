//! Organ taxonomy
//!
//! Dose is accumulated from *source* organs (where activity resides) into
//! *target* organs (where dose is reported). For hollow organs the two sets
//! differ: activity sits in the luminal contents while dose is reported to the
//! wall. [`OrganTaxonomy`] carries both ordered sets and the wall → contents
//! pairing.
//!
//! The standard ICRP 89 / OLINDA taxonomy is available as
//! [`OrganTaxonomy::icrp89`] or the shared [`struct@ICRP89`] instance.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the time column in time-activity files
pub const TIME_COLUMN: &str = "Time_Hours";

/// Hollow organs as (wall target, contents source)
pub const WALL_CONTENTS_PAIRS: [(&str, &str); 7] = [
    ("Gallbladder Wall", "Gallbladder Contents"),
    ("LLI Wall", "LLI Contents"),
    ("Small Intestine Wall", "Small Intestine Contents"),
    ("Stomach Wall", "Stomach Contents"),
    ("ULI Wall", "ULI Contents"),
    ("Heart Wall", "Heart Contents"),
    ("Urinary Bladder Wall", "Urinary Bladder Contents"),
];

pub const SOURCE_ORGANS: [&str; 25] = [
    "Adrenals",
    "Brain",
    "Breasts",
    "Gallbladder Contents",
    "LLI Contents",
    "Small Intestine Contents",
    "Stomach Contents",
    "ULI Contents",
    "Heart Contents",
    "Kidneys",
    "Liver",
    "Lungs",
    "Muscle",
    "Ovaries",
    "Pancreas",
    "Red Marrow",
    "Osteogenic Cells",
    "Skin",
    "Spleen",
    "Testes",
    "Thymus",
    "Thyroid",
    "Urinary Bladder Contents",
    "Uterus",
    "Total Body",
];

pub const TARGET_ORGANS: [&str; 25] = [
    "Adrenals",
    "Brain",
    "Breasts",
    "Gallbladder Wall",
    "LLI Wall",
    "Small Intestine Wall",
    "Stomach Wall",
    "ULI Wall",
    "Heart Wall",
    "Kidneys",
    "Liver",
    "Lungs",
    "Muscle",
    "Ovaries",
    "Pancreas",
    "Red Marrow",
    "Osteogenic Cells",
    "Skin",
    "Spleen",
    "Testes",
    "Thymus",
    "Thyroid",
    "Urinary Bladder Wall",
    "Uterus",
    "Total Body",
];

lazy_static! {
    /// Shared ICRP 89 / OLINDA taxonomy
    pub static ref ICRP89: Arc<OrganTaxonomy> = Arc::new(OrganTaxonomy::icrp89());
}

/// Reasons an organ taxonomy is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("Duplicate source organ: {0}")]
    DuplicateSource(String),
    #[error("Duplicate target organ: {0}")]
    DuplicateTarget(String),
    #[error("Wall organ {0} is not a target organ")]
    UnknownWall(String),
    #[error("Contents organ {0} is not a source organ")]
    UnknownContents(String),
    #[error("Wall organ {0} is paired more than once")]
    DuplicateWall(String),
    #[error("Contents organ {0} is paired with more than one wall")]
    SharedContents(String),
    #[error("Contents organ {0} must not be a target organ")]
    ContentsIsTarget(String),
}

/// Ordered source and target organ sets with the wall → contents pairing
///
/// The order of the organ lists is the order used for coefficient table
/// rows/columns and for dose results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaxonomyDef", into = "TaxonomyDef")]
pub struct OrganTaxonomy {
    sources: Vec<String>,
    targets: Vec<String>,
    /// For each target index, the index of its contents source (walls only)
    contents_of: Vec<Option<usize>>,
    source_index: HashMap<String, usize>,
    target_index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct TaxonomyDef {
    sources: Vec<String>,
    targets: Vec<String>,
    wall_contents: Vec<(String, String)>,
}

impl TryFrom<TaxonomyDef> for OrganTaxonomy {
    type Error = TaxonomyError;

    fn try_from(def: TaxonomyDef) -> Result<Self, Self::Error> {
        OrganTaxonomy::new(def.sources, def.targets, def.wall_contents)
    }
}

impl From<OrganTaxonomy> for TaxonomyDef {
    fn from(taxonomy: OrganTaxonomy) -> Self {
        let wall_contents = taxonomy
            .wall_contents_pairs()
            .map(|(w, c)| (w.to_string(), c.to_string()))
            .collect();
        TaxonomyDef {
            sources: taxonomy.sources,
            targets: taxonomy.targets,
            wall_contents,
        }
    }
}

impl OrganTaxonomy {
    /// Build a taxonomy, checking the pairing invariants
    ///
    /// Every wall must be a target, every contents organ a source that is not
    /// itself a target, and the pairing must be one-to-one.
    pub fn new<S: Into<String>>(
        sources: impl IntoIterator<Item = S>,
        targets: impl IntoIterator<Item = S>,
        wall_contents: impl IntoIterator<Item = (S, S)>,
    ) -> Result<Self, TaxonomyError> {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();

        let mut source_index = HashMap::with_capacity(sources.len());
        for (i, organ) in sources.iter().enumerate() {
            if source_index.insert(organ.clone(), i).is_some() {
                return Err(TaxonomyError::DuplicateSource(organ.clone()));
            }
        }
        let mut target_index = HashMap::with_capacity(targets.len());
        for (i, organ) in targets.iter().enumerate() {
            if target_index.insert(organ.clone(), i).is_some() {
                return Err(TaxonomyError::DuplicateTarget(organ.clone()));
            }
        }

        let mut contents_of = vec![None; targets.len()];
        let mut used_contents = HashSet::new();
        for (wall, contents) in wall_contents {
            let (wall, contents): (String, String) = (wall.into(), contents.into());
            let t = *target_index
                .get(&wall)
                .ok_or_else(|| TaxonomyError::UnknownWall(wall.clone()))?;
            let s = *source_index
                .get(&contents)
                .ok_or_else(|| TaxonomyError::UnknownContents(contents.clone()))?;
            if target_index.contains_key(&contents) {
                return Err(TaxonomyError::ContentsIsTarget(contents));
            }
            if contents_of[t].is_some() {
                return Err(TaxonomyError::DuplicateWall(wall));
            }
            if !used_contents.insert(s) {
                return Err(TaxonomyError::SharedContents(contents));
            }
            contents_of[t] = Some(s);
        }

        Ok(OrganTaxonomy {
            sources,
            targets,
            contents_of,
            source_index,
            target_index,
        })
    }

    /// The ICRP 89 adult phantom organ set used by OLINDA
    pub fn icrp89() -> Self {
        Self::new(SOURCE_ORGANS, TARGET_ORGANS, WALL_CONTENTS_PAIRS)
            .expect("built-in ICRP 89 taxonomy is valid")
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn source_index(&self, organ: &str) -> Option<usize> {
        self.source_index.get(organ).copied()
    }

    pub fn target_index(&self, organ: &str) -> Option<usize> {
        self.target_index.get(organ).copied()
    }

    pub fn is_source(&self, organ: &str) -> bool {
        self.source_index.contains_key(organ)
    }

    pub fn is_target(&self, organ: &str) -> bool {
        self.target_index.contains_key(organ)
    }

    /// Index of the contents source paired with the target at `target`, if it is a wall
    pub fn contents_index(&self, target: usize) -> Option<usize> {
        self.contents_of.get(target).copied().flatten()
    }

    /// Contents organ paired with `wall`, if `wall` is a wall target
    pub fn contents_of(&self, wall: &str) -> Option<&str> {
        self.target_index(wall)
            .and_then(|t| self.contents_index(t))
            .map(|s| self.sources[s].as_str())
    }

    /// Iterate (wall, contents) pairs in target order
    pub fn wall_contents_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.contents_of.iter().enumerate().filter_map(|(t, s)| {
            s.map(|s| (self.targets[t].as_str(), self.sources[s].as_str()))
        })
    }

    /// Columns a time-activity file must provide
    pub fn required_columns(&self) -> Vec<String> {
        std::iter::once(TIME_COLUMN.to_string())
            .chain(self.sources.iter().cloned())
            .collect()
    }
}

impl Default for OrganTaxonomy {
    fn default() -> Self {
        Self::icrp89()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icrp89_has_seven_wall_pairs() {
        let taxonomy = OrganTaxonomy::icrp89();
        assert_eq!(taxonomy.sources().len(), 25);
        assert_eq!(taxonomy.targets().len(), 25);
        assert_eq!(taxonomy.wall_contents_pairs().count(), 7);
        assert_eq!(taxonomy.contents_of("Stomach Wall"), Some("Stomach Contents"));
        assert_eq!(taxonomy.contents_of("Liver"), None);
    }

    #[test]
    fn contents_never_reported_as_target() {
        let taxonomy = OrganTaxonomy::icrp89();
        for (_, contents) in taxonomy.wall_contents_pairs() {
            assert!(taxonomy.is_source(contents));
            assert!(!taxonomy.is_target(contents));
        }
    }

    #[test]
    fn rejects_contents_that_is_a_target() {
        let err = OrganTaxonomy::new(
            ["Liver", "Gut Contents"],
            ["Liver", "Gut Wall", "Gut Contents"],
            [("Gut Wall", "Gut Contents")],
        )
        .unwrap_err();
        assert_eq!(err, TaxonomyError::ContentsIsTarget("Gut Contents".into()));
    }

    #[test]
    fn rejects_shared_contents() {
        let err = OrganTaxonomy::new(
            ["A Contents"],
            ["A Wall", "B Wall"],
            [("A Wall", "A Contents"), ("B Wall", "A Contents")],
        )
        .unwrap_err();
        assert_eq!(err, TaxonomyError::SharedContents("A Contents".into()));
    }

    #[test]
    fn rejects_unknown_wall() {
        let err = OrganTaxonomy::new(["A Contents"], ["Liver"], [("A Wall", "A Contents")])
            .unwrap_err();
        assert_eq!(err, TaxonomyError::UnknownWall("A Wall".into()));
    }

    #[test]
    fn serde_round_trip_keeps_pairing() {
        let taxonomy = OrganTaxonomy::icrp89();
        let json = serde_json::to_string(&taxonomy).unwrap();
        let back: OrganTaxonomy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, taxonomy);
    }

    #[test]
    fn required_columns_start_with_time() {
        let columns = ICRP89.required_columns();
        assert_eq!(columns[0], TIME_COLUMN);
        assert_eq!(columns.len(), 26);
    }
}
