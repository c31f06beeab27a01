//! Conversion of GeoJSON features into projected index features.

use std::collections::HashMap;
use std::sync::Arc;

use super::error::IndexError;
use crate::coord;
use crate::geojson::{FeatureCollection, ProviderProperties};

/// A source feature projected into normalized world space.
///
/// Shared between every tile whose source list contains it.
#[derive(Debug, Clone)]
pub(crate) struct ProjectedFeature {
    pub id: u64,
    /// Vertices as `[x, y]` in `[0, 1]²`
    pub points: Vec<[f64; 2]>,
    pub min: [f64; 2],
    pub max: [f64; 2],
    pub tags: Arc<ProviderProperties>,
}

impl ProjectedFeature {
    pub fn new(id: u64, points: Vec<[f64; 2]>, tags: Arc<ProviderProperties>) -> Self {
        let (min, max) = bbox(&points);
        Self {
            id,
            points,
            min,
            max,
            tags,
        }
    }

    /// Copy of this feature restricted to `points`, sharing the same tags.
    pub fn with_points(&self, points: Vec<[f64; 2]>) -> Self {
        Self::new(self.id, points, Arc::clone(&self.tags))
    }
}

fn bbox(points: &[[f64; 2]]) -> ([f64; 2], [f64; 2]) {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in points {
        for axis in 0..2 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    (min, max)
}

/// Project every feature of the collection, assigning stable ids.
///
/// Explicit numeric ids are used when every feature has one; otherwise all
/// ids are the features' positions in the collection.
pub(crate) fn convert(
    collection: &FeatureCollection,
) -> Result<Vec<Arc<ProjectedFeature>>, IndexError> {
    let use_explicit = collection
        .features
        .iter()
        .all(|f| f.explicit_id().is_some());

    let mut seen: HashMap<u64, usize> = HashMap::with_capacity(collection.len());
    let mut projected = Vec::with_capacity(collection.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let id = match feature.explicit_id() {
            Some(id) if use_explicit => id,
            _ => index as u64,
        };
        if let Some(first) = seen.insert(id, index) {
            return Err(IndexError::DuplicateId {
                id,
                first,
                second: index,
            });
        }

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(IndexError::MissingGeometry { index })?;
        let vertices = geometry.vertices();
        if vertices.is_empty() {
            return Err(IndexError::EmptyGeometry { index });
        }

        let mut points = Vec::with_capacity(vertices.len());
        for position in vertices {
            let (lng, lat) = match position.as_slice() {
                [lng, lat, ..] => (*lng, *lat),
                _ => {
                    return Err(IndexError::InvalidCoordinate {
                        index,
                        reason: format!("expected [lng, lat], got {} values", position.len()),
                    })
                }
            };
            if !(lat.is_finite() && (-90.0..=90.0).contains(&lat)) {
                return Err(IndexError::InvalidCoordinate {
                    index,
                    reason: format!("latitude {} is out of range", lat),
                });
            }
            if !(lng.is_finite() && (-180.0..=180.0).contains(&lng)) {
                return Err(IndexError::InvalidCoordinate {
                    index,
                    reason: format!("longitude {} is out of range", lng),
                });
            }
            let (x, y) = coord::project(lat, lng);
            points.push([x, y]);
        }

        projected.push(Arc::new(ProjectedFeature::new(
            id,
            points,
            Arc::new(feature.properties.clone()),
        )));
    }

    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::{Feature, Geometry};

    fn point(id: Option<u64>, lat: f64, lng: f64) -> Feature {
        Feature::point(id, ProviderProperties::new("P", lat, lng))
    }

    #[test]
    fn test_explicit_ids_are_kept() {
        let collection = FeatureCollection::new(vec![point(Some(40), 1.0, 1.0), point(Some(7), 2.0, 2.0)]);
        let features = convert(&collection).unwrap();
        assert_eq!(features[0].id, 40);
        assert_eq!(features[1].id, 7);
    }

    #[test]
    fn test_missing_id_generates_positional_ids() {
        let collection = FeatureCollection::new(vec![point(Some(40), 1.0, 1.0), point(None, 2.0, 2.0)]);
        let features = convert(&collection).unwrap();
        assert_eq!(features[0].id, 0);
        assert_eq!(features[1].id, 1);
    }

    #[test]
    fn test_duplicate_explicit_id() {
        let collection = FeatureCollection::new(vec![
            point(Some(5), 1.0, 1.0),
            point(Some(6), 1.0, 1.0),
            point(Some(5), 2.0, 2.0),
        ]);
        assert_eq!(
            convert(&collection).unwrap_err(),
            IndexError::DuplicateId {
                id: 5,
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn test_missing_geometry() {
        let mut feature = point(None, 1.0, 1.0);
        feature.geometry = None;
        let collection = FeatureCollection::new(vec![point(None, 0.0, 0.0), feature]);
        assert_eq!(
            convert(&collection).unwrap_err(),
            IndexError::MissingGeometry { index: 1 }
        );
    }

    #[test]
    fn test_rejects_out_of_range_longitude() {
        let mut feature = point(None, 1.0, 1.0);
        feature.geometry = Some(Geometry::Point {
            coordinates: vec![190.0, 1.0],
        });
        let err = convert(&FeatureCollection::new(vec![feature])).unwrap_err();
        assert!(matches!(err, IndexError::InvalidCoordinate { index: 0, .. }));
    }

    #[test]
    fn test_rejects_short_position() {
        let mut feature = point(None, 1.0, 1.0);
        feature.geometry = Some(Geometry::Point {
            coordinates: vec![1.0],
        });
        let err = convert(&FeatureCollection::new(vec![feature])).unwrap_err();
        assert!(err.to_string().contains("got 1 values"));
    }

    #[test]
    fn test_empty_multipoint() {
        let mut feature = point(None, 1.0, 1.0);
        feature.geometry = Some(Geometry::MultiPoint {
            coordinates: vec![],
        });
        let err = convert(&FeatureCollection::new(vec![feature])).unwrap_err();
        assert_eq!(err, IndexError::EmptyGeometry { index: 0 });
    }

    #[test]
    fn test_bbox_covers_all_points() {
        let tags = Arc::new(ProviderProperties::new("P", 0.0, 0.0));
        let feature = ProjectedFeature::new(1, vec![[0.2, 0.7], [0.4, 0.1]], tags);
        assert_eq!(feature.min, [0.2, 0.1]);
        assert_eq!(feature.max, [0.4, 0.7]);
    }
}
