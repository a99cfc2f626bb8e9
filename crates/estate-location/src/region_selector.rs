//! Cascading province → city → district selector.
//!
//! A selector starts in the loading state and must not offer any options
//! until the hierarchy request has finished. The hierarchy is fetched once
//! per mount; nothing is cached across mounts.

use estate_core::{RegionNode, RegionSelection, RegionTree, TreeShape};

use crate::error::{LocationError, ProviderError};
use crate::notice::Notices;
use crate::provider::RegionProvider;

/// One entry of the rendered cascader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascaderOption {
    pub value: String,
    pub label: String,
    pub children: Vec<CascaderOption>,
}

impl From<&RegionNode> for CascaderOption {
    fn from(node: &RegionNode) -> Self {
        Self {
            value: node.name.clone(),
            label: node.name.clone(),
            children: node.children.iter().map(CascaderOption::from).collect(),
        }
    }
}

/// What the host should render.
#[derive(Debug, PartialEq, Eq)]
pub enum SelectorView<'a> {
    /// Spinner only; the cascade control is not shown.
    Loading,
    /// The cascade control with its top-level (province) options.
    Cascader(&'a [CascaderOption]),
}

#[derive(Debug, Default)]
pub struct RegionSelector {
    /// `None` while the hierarchy request is outstanding.
    tree: Option<RegionTree>,
    options: Vec<CascaderOption>,
    value: Option<RegionSelection>,
}

impl RegionSelector {
    /// A freshly mounted selector whose request has not completed yet.
    #[must_use]
    pub fn loading() -> Self {
        Self::default()
    }

    /// Mounts a selector: one hierarchy request, then ready (possibly empty).
    pub async fn mount<P>(provider: &P, notices: &Notices) -> Self
    where
        P: RegionProvider + ?Sized,
    {
        let mut selector = Self::loading();
        let result = provider.fetch_hierarchy().await;
        selector.finish_loading(result, notices);
        selector
    }

    /// Applies the outcome of the hierarchy request.
    ///
    /// Failures leave an empty tree and raise an error notice; the selector
    /// still leaves the loading state so the host renders zero options.
    pub fn finish_loading(
        &mut self,
        result: Result<Vec<RegionNode>, ProviderError>,
        notices: &Notices,
    ) {
        let provinces = match result {
            Ok(provinces) => {
                if provinces.is_empty() {
                    tracing::warn!("region hierarchy has no provinces; selector will be empty");
                }
                provinces
            }
            Err(ProviderError::Unreachable(reason)) => {
                tracing::error!(%reason, "region hierarchy request failed");
                notices.error("Could not reach the region data service.");
                Vec::new()
            }
            Err(ProviderError::EmptyOrMalformed(reason)) => {
                tracing::error!(%reason, "region hierarchy response unusable");
                notices.error("Failed to load administrative region data.");
                Vec::new()
            }
        };

        let tree = RegionTree::new(provinces);
        self.options = tree.provinces().iter().map(CascaderOption::from).collect();
        tracing::debug!(shape = ?tree.shape(), "region selector ready");
        self.tree = Some(tree);
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.tree.is_none()
    }

    #[must_use]
    pub fn view(&self) -> SelectorView<'_> {
        if self.is_loading() {
            SelectorView::Loading
        } else {
            SelectorView::Cascader(&self.options)
        }
    }

    /// The full cascader option tree; empty while loading or after a failure.
    #[must_use]
    pub fn options(&self) -> &[CascaderOption] {
        &self.options
    }

    /// Level-by-level size of the loaded hierarchy.
    #[must_use]
    pub fn shape(&self) -> TreeShape {
        self.tree.as_ref().map(RegionTree::shape).unwrap_or_default()
    }

    /// Options one level below `path` (provinces for `[]`, cities for
    /// `[province]`, districts for `[province, city]`).
    #[must_use]
    pub fn options_at(&self, path: &[&str]) -> &[CascaderOption] {
        let mut level = self.options.as_slice();
        for name in path {
            match level.iter().find(|o| o.value == *name) {
                Some(option) => level = &option.children,
                None => return &[],
            }
        }
        level
    }

    /// Selects a leaf path and returns the triple to hand to the form.
    ///
    /// The returned value is exactly `[province, city, district]` as given.
    ///
    /// # Errors
    ///
    /// - [`LocationError::SelectorLoading`] while the hierarchy is still loading.
    /// - [`LocationError::InvalidSelection`] if the path is not in the tree.
    pub fn select(
        &mut self,
        province: &str,
        city: &str,
        district: &str,
    ) -> Result<RegionSelection, LocationError> {
        let tree = self.tree.as_ref().ok_or(LocationError::SelectorLoading)?;
        if !tree.contains_path(province, city, district) {
            return Err(LocationError::InvalidSelection {
                province: province.to_string(),
                city: city.to_string(),
                district: district.to_string(),
            });
        }
        let selection = RegionSelection::new(province, city, district);
        self.value = Some(selection.clone());
        Ok(selection)
    }

    /// The currently displayed value.
    #[must_use]
    pub fn value(&self) -> Option<&RegionSelection> {
        self.value.as_ref()
    }

    /// Sets the displayed value from the host (e.g. when editing a listing).
    /// Not validated against the tree: an existing listing may carry names
    /// the provider no longer returns.
    pub fn set_value(&mut self, value: Option<RegionSelection>) {
        self.value = value;
    }
}
