//! Dependent selection chains
//!
//! A [`CascadeController`] holds one selected value per level of a fixed
//! chain (region -> city -> barangay -> location, LCP-NAP -> port). Changing a
//! level clears every level below it; option lists for a level are computed
//! from the value selected one level up.

mod ports;

pub use ports::{NetworkLevel, PortAllocation};

use super::error::FormError;
use super::hierarchy::HierarchyIndex;
use crate::domain::common::geo::{GeoEntity, GeoKind};
use std::fmt::Debug;

/// Level of a dependent chain. `CHAIN` lists all levels top-down.
pub trait CascadeLevel: Copy + Eq + Debug + 'static {
    const CHAIN: &'static [Self];

    fn name(&self) -> &'static str;

    fn depth(&self) -> usize {
        Self::CHAIN
            .iter()
            .position(|level| level == self)
            .unwrap_or(0)
    }

    fn parent(&self) -> Option<Self> {
        match self.depth() {
            0 => None,
            depth => Some(Self::CHAIN[depth - 1]),
        }
    }
}

/// Value/label pair for a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Supplies the valid options of a level given the selected parent value.
/// `parent` is `None` only for the first level of the chain.
pub trait OptionSource<L: CascadeLevel> {
    fn options(&self, level: L, parent: Option<i64>) -> Vec<SelectOption>;
}

/// Ordered (level, value) pairs of a controller, top-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeSelection<L: CascadeLevel>(Vec<(L, i64)>);

impl<L: CascadeLevel> CascadeSelection<L> {
    pub fn new(pairs: Vec<(L, i64)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, level: L) -> Option<i64> {
        self.0
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, value)| *value)
    }

    pub fn pairs(&self) -> &[(L, i64)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeController<L: CascadeLevel> {
    values: Vec<Option<i64>>,
    _chain: std::marker::PhantomData<L>,
}

impl<L: CascadeLevel> CascadeController<L> {
    pub fn new() -> Self {
        Self {
            values: vec![None; L::CHAIN.len()],
            _chain: std::marker::PhantomData,
        }
    }

    /// Select `value` at `level` and clear every level below it.
    ///
    /// Descendants are cleared even when the value did not change. Whether
    /// `value` is a valid child of the current parent is not checked here:
    /// selectors are populated from [`options_for`](Self::options_for).
    /// A level whose parent is unset is left untouched.
    pub fn set_level(&mut self, level: L, value: i64) {
        if let Some(parent) = level.parent() {
            if self.value(parent).is_none() {
                log::debug!(
                    "{} = {} ignored: {}",
                    level.name(),
                    value,
                    FormError::MissingAncestorSelection {
                        level: level.name(),
                        ancestor: parent.name(),
                    }
                );
                return;
            }
        }
        let depth = level.depth();
        self.values[depth] = Some(value);
        self.clear_below(depth);
    }

    /// Clear `level` and everything below it
    pub fn clear_level(&mut self, level: L) {
        let depth = level.depth();
        self.values[depth] = None;
        self.clear_below(depth);
    }

    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|value| *value = None);
    }

    pub fn value(&self, level: L) -> Option<i64> {
        self.values[level.depth()]
    }

    /// Lowest level that currently holds a value
    pub fn deepest(&self) -> Option<L> {
        L::CHAIN
            .iter()
            .rev()
            .find(|level| self.value(**level).is_some())
            .copied()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn selection(&self) -> CascadeSelection<L> {
        CascadeSelection(
            L::CHAIN
                .iter()
                .map_while(|level| self.value(*level).map(|value| (*level, value)))
                .collect(),
        )
    }

    /// Valid options at `level`, empty while the parent level is unset
    pub fn options_for<S: OptionSource<L>>(&self, level: L, source: &S) -> Vec<SelectOption> {
        match level.parent() {
            None => source.options(level, None),
            Some(parent) => match self.value(parent) {
                Some(parent_value) => source.options(level, Some(parent_value)),
                None => {
                    log::trace!(
                        "{}",
                        FormError::MissingAncestorSelection {
                            level: level.name(),
                            ancestor: parent.name(),
                        }
                    );
                    Vec::new()
                }
            },
        }
    }

    /// Seed from a stored record (edit mode).
    ///
    /// Keeps the longest top-down prefix in which every value is an option
    /// of its parent; the remaining levels stay empty.
    pub fn restore<S: OptionSource<L>>(&mut self, stored: &CascadeSelection<L>, source: &S) {
        self.reset();
        for level in L::CHAIN {
            let Some(value) = stored.get(*level) else {
                break;
            };
            let valid = self
                .options_for(*level, source)
                .iter()
                .any(|option| option.value == value);
            if !valid {
                log::debug!(
                    "restore stopped at {}: {} is not a valid option",
                    level.name(),
                    value
                );
                break;
            }
            self.set_level(*level, value);
        }
    }

    fn clear_below(&mut self, depth: usize) {
        for value in self.values.iter_mut().skip(depth + 1) {
            *value = None;
        }
    }
}

impl<L: CascadeLevel> Default for CascadeController<L> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Geographic chain
// ============================================================================

impl CascadeLevel for GeoKind {
    const CHAIN: &'static [Self] = &[
        GeoKind::Region,
        GeoKind::City,
        GeoKind::Barangay,
        GeoKind::Location,
    ];

    fn name(&self) -> &'static str {
        self.code()
    }
}

pub type GeoCascade = CascadeController<GeoKind>;

impl OptionSource<GeoKind> for HierarchyIndex<GeoEntity> {
    fn options(&self, level: GeoKind, parent: Option<i64>) -> Vec<SelectOption> {
        let entities = match parent {
            None => self.roots(level),
            Some(_) => self.children_of(parent, level),
        };
        entities
            .into_iter()
            .map(|entity| SelectOption::new(entity.id, entity.name.clone()))
            .collect()
    }
}
