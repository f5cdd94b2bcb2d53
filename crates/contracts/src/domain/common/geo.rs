use crate::shared::cascade::CascadeSelection;
use crate::shared::hierarchy::{HierarchyIndex, HierarchyNode};
use crate::shared::validation::ValidationRule;
use serde::{Deserialize, Serialize};

/// Level of the geographic reference hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoKind {
    Region,
    City,
    Barangay,
    Location,
}

impl GeoKind {
    /// Path segment of the reference-data endpoint
    pub fn code(&self) -> &'static str {
        match self {
            GeoKind::Region => "region",
            GeoKind::City => "city",
            GeoKind::Barangay => "barangay",
            GeoKind::Location => "location",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GeoKind::Region => "Region",
            GeoKind::City => "City",
            GeoKind::Barangay => "Barangay",
            GeoKind::Location => "Location",
        }
    }

    /// Kind a parent of this kind must have
    pub fn parent_kind(&self) -> Option<GeoKind> {
        match self {
            GeoKind::Region => None,
            GeoKind::City => Some(GeoKind::Region),
            GeoKind::Barangay => Some(GeoKind::City),
            GeoKind::Location => Some(GeoKind::Barangay),
        }
    }

    pub fn all() -> [GeoKind; 4] {
        [
            GeoKind::Region,
            GeoKind::City,
            GeoKind::Barangay,
            GeoKind::Location,
        ]
    }
}

/// Geographic reference entity (region, city, barangay or location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoEntity {
    pub id: i64,
    pub name: String,
    pub kind: GeoKind,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<i64>,
}

impl GeoEntity {
    pub fn new(id: i64, name: impl Into<String>, kind: GeoKind, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent_id,
        }
    }
}

impl HierarchyNode for GeoEntity {
    type Kind = GeoKind;

    fn node_id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    fn kind(&self) -> GeoKind {
        self.kind
    }

    fn parent_kind(&self) -> Option<GeoKind> {
        self.kind.parent_kind()
    }
}

/// Geographic part of a form, flattened into the form DTO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeoAddress {
    #[serde(rename = "regionId")]
    pub region_id: Option<i64>,
    #[serde(rename = "cityId")]
    pub city_id: Option<i64>,
    #[serde(rename = "barangayId")]
    pub barangay_id: Option<i64>,
    #[serde(rename = "locationId")]
    pub location_id: Option<i64>,
}

impl GeoAddress {
    pub fn from_selection(selection: &CascadeSelection<GeoKind>) -> Self {
        Self {
            region_id: selection.get(GeoKind::Region),
            city_id: selection.get(GeoKind::City),
            barangay_id: selection.get(GeoKind::Barangay),
            location_id: selection.get(GeoKind::Location),
        }
    }

    /// Rebuild the chain above the deepest set level from `index`.
    ///
    /// Records written by older screens may only carry the location or
    /// barangay. An id missing from the index leaves the address as it is.
    pub fn complete_from(&self, index: &HierarchyIndex<GeoEntity>) -> Self {
        let ids = [self.region_id, self.city_id, self.barangay_id, self.location_id];
        let Some((depth, id)) = ids
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, id)| id.map(|id| (depth, id)))
        else {
            return *self;
        };
        let kind = GeoKind::all()[depth];

        match index.ancestor_path(kind, id) {
            Ok(path) if path.len() == depth + 1 => {
                let mut chain = path.into_iter().map(Some);
                Self {
                    region_id: chain.next().flatten(),
                    city_id: chain.next().flatten(),
                    barangay_id: chain.next().flatten(),
                    location_id: chain.next().flatten(),
                }
            }
            Ok(path) => {
                log::debug!("{} {} has a broken ancestor chain {:?}", kind.code(), id, path);
                *self
            }
            Err(e) => {
                log::debug!("cannot complete address: {}", e);
                *self
            }
        }
    }

    /// Top-down prefix of the set ids, for seeding a cascade in edit mode
    pub fn to_selection(&self) -> CascadeSelection<GeoKind> {
        let ids = [
            (GeoKind::Region, self.region_id),
            (GeoKind::City, self.city_id),
            (GeoKind::Barangay, self.barangay_id),
            (GeoKind::Location, self.location_id),
        ];
        CascadeSelection::new(
            ids.into_iter()
                .map_while(|(kind, id)| id.map(|id| (kind, id)))
                .collect(),
        )
    }

    pub fn field_name(kind: GeoKind) -> &'static str {
        match kind {
            GeoKind::Region => "regionId",
            GeoKind::City => "cityId",
            GeoKind::Barangay => "barangayId",
            GeoKind::Location => "locationId",
        }
    }

    /// "X is required" rules for every level from region down to `through`
    pub fn required_rules(through: GeoKind) -> Vec<ValidationRule> {
        GeoKind::all()
            .into_iter()
            .take_while(|kind| kind.parent_kind() != Some(through))
            .map(|kind| {
                ValidationRule::required(
                    Self::field_name(kind),
                    format!("{} is required", kind.display_name()),
                )
            })
            .collect()
    }
}
