// table/mixins.rs

use crate::dataframe::dataframe::Value;
use std::fmt::Debug;

/// Capability interface for columns of rich domain objects.
///
/// A mixin that has a primitive representation returns its component
/// columns from [`flatten`](MixinColumn::flatten), as `(component_name,
/// values)` pairs in a fixed order. An empty component name means the flat
/// column keeps the base column name unchanged.
///
/// A mixin that keeps the default `None` has no primitive representation;
/// the bridge drops such columns silently when converting to a DataFrame.
pub trait MixinColumn: Debug {
    /// Number of rows in the column.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn flatten(&self) -> Option<Vec<(String, Vec<Option<Value>>)>> {
        None
    }
}

/// Sky positions as right ascension / declination pairs in degrees.
///
/// Flattens to the `ra` and `dec` components, in that order, so a column
/// named `sc` becomes the flat columns `sc.ra` and `sc.dec`.
#[derive(Debug, Clone)]
pub struct SkyCoordColumn {
    ra: Vec<f64>,
    dec: Vec<f64>,
}

impl SkyCoordColumn {
    pub fn new(ra: Vec<f64>, dec: Vec<f64>) -> Result<Self, &'static str> {
        if ra.len() != dec.len() {
            return Err("ra and dec must have the same length.");
        }
        Ok(SkyCoordColumn { ra, dec })
    }

    pub fn ra(&self) -> &[f64] {
        &self.ra
    }

    pub fn dec(&self) -> &[f64] {
        &self.dec
    }
}

impl MixinColumn for SkyCoordColumn {
    fn len(&self) -> usize {
        self.ra.len()
    }

    fn flatten(&self) -> Option<Vec<(String, Vec<Option<Value>>)>> {
        let to_values = |comps: &[f64]| comps.iter().map(|v| Some(Value::Float(*v))).collect();
        Some(vec![
            ("ra".to_string(), to_values(&self.ra)),
            ("dec".to_string(), to_values(&self.dec)),
        ])
    }
}

/// Physical quantities: magnitudes tagged with a unit label.
///
/// Flattens to a single unnamed component, so the flat column keeps the
/// base name and carries the bare magnitudes. The unit label itself is not
/// serialized.
#[derive(Debug, Clone)]
pub struct QuantityColumn {
    values: Vec<f64>,
    unit: String,
}

impl QuantityColumn {
    pub fn new(values: Vec<f64>, unit: &str) -> Self {
        QuantityColumn {
            values,
            unit: unit.to_string(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl MixinColumn for QuantityColumn {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn flatten(&self) -> Option<Vec<(String, Vec<Option<Value>>)>> {
        let values = self.values.iter().map(|v| Some(Value::Float(*v))).collect();
        Some(vec![(String::new(), values)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_coord_components_in_fixed_order() {
        let sc = SkyCoordColumn::new(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        let components = sc.flatten().expect("SkyCoordColumn must flatten");

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].0, "ra");
        assert_eq!(components[1].0, "dec");
        assert_eq!(components[0].1[1], Some(Value::Float(2.0)));
        assert_eq!(components[1].1[0], Some(Value::Float(3.0)));
    }

    #[test]
    fn test_sky_coord_rejects_mismatched_lengths() {
        assert!(SkyCoordColumn::new(vec![1.0], vec![3.0, 4.0]).is_err());
    }

    #[test]
    fn test_quantity_flattens_to_bare_magnitudes() {
        let q = QuantityColumn::new(vec![5.0, 6.0], "m");
        let components = q.flatten().expect("QuantityColumn must flatten");

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].0, "", "single component keeps the base name");
        assert_eq!(
            components[0].1,
            vec![Some(Value::Float(5.0)), Some(Value::Float(6.0))]
        );
        assert_eq!(q.unit(), "m");
    }

    #[test]
    fn test_default_flatten_is_absent() {
        // A mixin with no flattening rule, e.g. an opaque object column
        #[derive(Debug)]
        struct Opaque(usize);

        impl MixinColumn for Opaque {
            fn len(&self) -> usize {
                self.0
            }
        }

        assert!(Opaque(3).flatten().is_none());
    }
}
