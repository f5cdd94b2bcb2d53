//! Parent -> children lookup over flat reference data
//!
//! The index is built once per form open and is immutable afterwards.
//! Children keep the order in which the backend returned them.

use super::error::HierarchyError;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Entity that can be placed into a [`HierarchyIndex`].
///
/// Ids are only unique within a kind: each level comes from its own table.
pub trait HierarchyNode {
    type Kind: Copy + Eq + Hash + Debug;

    fn node_id(&self) -> i64;
    fn parent_id(&self) -> Option<i64>;
    fn kind(&self) -> Self::Kind;
    /// Kind the parent of this entity has, `None` for top-level entities
    fn parent_kind(&self) -> Option<Self::Kind>;
}

#[derive(Debug, Clone)]
pub struct HierarchyIndex<T: HierarchyNode> {
    entities: Vec<T>,
    by_id: HashMap<(T::Kind, i64), usize>,
    by_parent: HashMap<Option<i64>, Vec<usize>>,
}

impl<T: HierarchyNode> HierarchyIndex<T> {
    /// Group entities by parent id. An empty list gives a valid, empty index.
    pub fn build(entities: Vec<T>) -> Self {
        let mut by_id = HashMap::with_capacity(entities.len());
        let mut by_parent: HashMap<Option<i64>, Vec<usize>> = HashMap::new();

        for (pos, entity) in entities.iter().enumerate() {
            by_id.insert((entity.kind(), entity.node_id()), pos);
            by_parent.entry(entity.parent_id()).or_default().push(pos);
        }

        Self {
            entities,
            by_id,
            by_parent,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, kind: T::Kind, id: i64) -> Option<&T> {
        self.by_id.get(&(kind, id)).map(|&pos| &self.entities[pos])
    }

    /// Children of `parent_id` with the expected kind, in build order.
    ///
    /// `None` parent yields nothing: top-level entities are queried with
    /// [`roots`](Self::roots).
    pub fn children_of(&self, parent_id: Option<i64>, expected_kind: T::Kind) -> Vec<&T> {
        let Some(parent_id) = parent_id else {
            return Vec::new();
        };
        self.select(Some(parent_id), expected_kind)
    }

    /// Same as [`children_of`](Self::children_of), but reports an index
    /// built from an empty list.
    pub fn try_children_of(
        &self,
        parent_id: Option<i64>,
        expected_kind: T::Kind,
    ) -> Result<Vec<&T>, HierarchyError> {
        if self.entities.is_empty() {
            return Err(HierarchyError::EmptyInput);
        }
        Ok(self.children_of(parent_id, expected_kind))
    }

    /// Entities without a parent of the given kind (regions, LCP-NAP nodes)
    pub fn roots(&self, kind: T::Kind) -> Vec<&T> {
        self.select(None, kind)
    }

    /// Ids from the top-level ancestor down to `id`, inclusive.
    /// Each step looks the parent up under the kind its child expects.
    pub fn ancestor_path(&self, kind: T::Kind, id: i64) -> Result<Vec<i64>, HierarchyError> {
        let mut path = Vec::new();
        let mut current = Some((kind, id));

        while let Some((current_kind, current_id)) = current {
            let entity = self
                .get(current_kind, current_id)
                .ok_or_else(|| HierarchyError::UnknownEntity {
                    kind: format!("{:?}", current_kind),
                    id: current_id,
                })?;
            path.push(current_id);
            // Malformed data may form a cycle
            if path.len() > self.entities.len() {
                break;
            }
            current = entity.parent_kind().zip(entity.parent_id());
        }

        path.reverse();
        Ok(path)
    }

    fn select(&self, parent_id: Option<i64>, kind: T::Kind) -> Vec<&T> {
        self.by_parent
            .get(&parent_id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&pos| &self.entities[pos])
                    .filter(|entity| entity.kind() == kind)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<T: HierarchyNode> Default for HierarchyIndex<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            by_id: HashMap::new(),
            by_parent: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::geo::{GeoEntity, GeoKind};

    fn sample() -> Vec<GeoEntity> {
        vec![
            GeoEntity::new(1, "NCR", GeoKind::Region, None),
            GeoEntity::new(10, "Quezon City", GeoKind::City, Some(1)),
            GeoEntity::new(11, "Manila", GeoKind::City, Some(1)),
            GeoEntity::new(100, "Batasan Hills", GeoKind::Barangay, Some(10)),
            GeoEntity::new(101, "Commonwealth", GeoKind::Barangay, Some(10)),
            GeoEntity::new(110, "Ermita", GeoKind::Barangay, Some(11)),
            GeoEntity::new(2, "CAR", GeoKind::Region, None),
        ]
    }

    #[test]
    fn test_children_are_exactly_matching_subset_in_order() {
        let entities = sample();
        let index = HierarchyIndex::build(entities.clone());

        for parent in [1, 10, 11, 100, 2, 999] {
            for kind in GeoKind::all() {
                let got: Vec<i64> = index
                    .children_of(Some(parent), kind)
                    .iter()
                    .map(|e| e.id)
                    .collect();
                let expected: Vec<i64> = entities
                    .iter()
                    .filter(|e| e.parent_id == Some(parent) && e.kind == kind)
                    .map(|e| e.id)
                    .collect();
                assert_eq!(got, expected, "parent {parent}, kind {kind:?}");
            }
        }
    }

    #[test]
    fn test_children_keep_build_order() {
        let index = HierarchyIndex::build(vec![
            GeoEntity::new(1, "NCR", GeoKind::Region, None),
            GeoEntity::new(12, "Pasig", GeoKind::City, Some(1)),
            GeoEntity::new(10, "Caloocan", GeoKind::City, Some(1)),
        ]);
        let names: Vec<&str> = index
            .children_of(Some(1), GeoKind::City)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pasig", "Caloocan"]);
    }

    #[test]
    fn test_null_parent_and_kind_mismatch_are_empty() {
        let index = HierarchyIndex::build(sample());
        assert!(index.children_of(None, GeoKind::Region).is_empty());
        assert!(index.children_of(Some(1), GeoKind::Barangay).is_empty());
        assert_eq!(index.roots(GeoKind::Region).len(), 2);
    }

    #[test]
    fn test_empty_index() {
        let index: HierarchyIndex<GeoEntity> = HierarchyIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.children_of(Some(1), GeoKind::City).is_empty());
        assert_eq!(
            index.try_children_of(Some(1), GeoKind::City).unwrap_err(),
            HierarchyError::EmptyInput
        );
    }

    #[test]
    fn test_ancestor_path() {
        let index = HierarchyIndex::build(sample());
        assert_eq!(index.ancestor_path(GeoKind::Barangay, 101).unwrap(), vec![1, 10, 101]);
        assert_eq!(index.ancestor_path(GeoKind::Region, 2).unwrap(), vec![2]);
        assert_eq!(
            index.ancestor_path(GeoKind::Barangay, 555).unwrap_err(),
            HierarchyError::UnknownEntity {
                kind: "Barangay".into(),
                id: 555,
            }
        );
    }

    #[test]
    fn test_same_id_in_different_kinds() {
        let index = HierarchyIndex::build(vec![
            GeoEntity::new(1, "NCR", GeoKind::Region, None),
            GeoEntity::new(1, "Manila", GeoKind::City, Some(1)),
            GeoEntity::new(7, "Ermita", GeoKind::Barangay, Some(1)),
        ]);

        assert_eq!(index.get(GeoKind::Region, 1).map(|e| e.name.as_str()), Some("NCR"));
        assert_eq!(index.get(GeoKind::City, 1).map(|e| e.name.as_str()), Some("Manila"));
        assert!(index.get(GeoKind::Barangay, 1).is_none());
        assert_eq!(index.ancestor_path(GeoKind::Barangay, 7).unwrap(), vec![1, 1, 7]);
        assert_eq!(index.ancestor_path(GeoKind::City, 1).unwrap(), vec![1, 1]);

        let barangays: Vec<i64> = index
            .children_of(Some(1), GeoKind::Barangay)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(barangays, vec![7]);
    }
}
