//! Province → city → district hierarchy and the value triple selected from it.

use serde::{Deserialize, Serialize};

/// One node of the administrative-region hierarchy.
///
/// Children keep the provider's order. A node without children is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<RegionNode>,
}

impl RegionNode {
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(name: impl Into<String>, children: Vec<RegionNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    fn child(&self, name: &str) -> Option<&RegionNode> {
        self.children.iter().find(|c| c.name == name)
    }

    fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(RegionNode::leaf_count).sum()
        }
    }
}

/// Immutable province list loaded once per selector mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionTree {
    provinces: Vec<RegionNode>,
}

/// Branching summary of a tree, level by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeShape {
    pub provinces: usize,
    pub cities: usize,
    pub districts: usize,
    pub leaves: usize,
}

impl RegionTree {
    #[must_use]
    pub fn new(provinces: Vec<RegionNode>) -> Self {
        Self { provinces }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }

    #[must_use]
    pub fn provinces(&self) -> &[RegionNode] {
        &self.provinces
    }

    /// Cities under `province`, or an empty slice when it is unknown.
    #[must_use]
    pub fn cities(&self, province: &str) -> &[RegionNode] {
        self.provinces
            .iter()
            .find(|p| p.name == province)
            .map(|p| p.children.as_slice())
            .unwrap_or_default()
    }

    /// Districts under `province`/`city`, or an empty slice when either is unknown.
    #[must_use]
    pub fn districts(&self, province: &str, city: &str) -> &[RegionNode] {
        self.provinces
            .iter()
            .find(|p| p.name == province)
            .and_then(|p| p.child(city))
            .map(|c| c.children.as_slice())
            .unwrap_or_default()
    }

    /// True when `province → city → district` is a path in this tree.
    #[must_use]
    pub fn contains_path(&self, province: &str, city: &str, district: &str) -> bool {
        self.districts(province, city)
            .iter()
            .any(|d| d.name == district)
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.provinces.iter().map(RegionNode::leaf_count).sum()
    }

    #[must_use]
    pub fn shape(&self) -> TreeShape {
        let cities: usize = self.provinces.iter().map(|p| p.children.len()).sum();
        let districts: usize = self
            .provinces
            .iter()
            .flat_map(|p| p.children.iter())
            .map(|c| c.children.len())
            .sum();
        TreeShape {
            provinces: self.provinces.len(),
            cities,
            districts,
            leaves: self.leaf_count(),
        }
    }
}

/// A fully specified `[province, city, district]` triple.
///
/// A plain value: it holds no reference back into the [`RegionTree`] it was
/// picked from. "No selection" is expressed as `Option::<RegionSelection>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionSelection {
    pub province: String,
    pub city: String,
    pub district: String,
}

impl RegionSelection {
    #[must_use]
    pub fn new(
        province: impl Into<String>,
        city: impl Into<String>,
        district: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            city: city.into(),
            district: district.into(),
        }
    }

    /// Builds a selection only when all three parts are present and non-blank.
    #[must_use]
    pub fn from_parts(
        province: Option<&str>,
        city: Option<&str>,
        district: Option<&str>,
    ) -> Option<Self> {
        fn filled(s: Option<&str>) -> Option<&str> {
            s.filter(|v| !v.trim().is_empty())
        }
        Some(Self::new(filled(province)?, filled(city)?, filled(district)?))
    }

    #[must_use]
    pub fn as_array(&self) -> [&str; 3] {
        [&self.province, &self.city, &self.district]
    }

    /// The free-form address string handed to the geocoder.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}{}{}", self.province, self.city, self.district)
    }
}
