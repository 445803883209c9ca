//! Basic statistics over quantitative columns
//!
//! These functions only read through field views.

use crate::catalog::ColumnKind;
use crate::error::{Error, Result};
use crate::storage::RowStore;

/// Arithmetic mean of column `name`; 0 for an empty store
pub fn mean(store: &RowStore, name: &str) -> Result<f64> {
    let values = quantitative_values(store, name)?;
    if values.is_empty() {
        return Ok(0.0);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator) of column `name`; 0 below two rows
pub fn variance(store: &RowStore, name: &str) -> Result<f64> {
    let values = quantitative_values(store, name)?;
    if values.len() < 2 {
        return Ok(0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let squares: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Ok(squares / (n - 1.0))
}

/// Sample standard deviation of column `name`
pub fn stdev(store: &RowStore, name: &str) -> Result<f64> {
    Ok(variance(store, name)?.sqrt())
}

fn quantitative_values(store: &RowStore, name: &str) -> Result<Vec<f64>> {
    let column = store.schema().require(name)?;
    if let ColumnKind::Categorical = column.kind() {
        return Err(Error::TypeMismatch {
            column: name.to_string(),
            expected: "quantitative".to_string(),
            found: "categorical".to_string(),
        });
    }
    store
        .column_fields(name)?
        .map(|field| field.as_f64())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Column, ColumnRole, NumericType, Schema};
    use crate::storage::Value;

    fn store_with(values: &[f64]) -> RowStore {
        let schema = Schema::from_columns(vec![
            Column::quantitative("x", ColumnRole::Explanatory, NumericType::F64),
            Column::categorical("tag", ColumnRole::Other, 4),
        ])
        .unwrap();
        let mut store = RowStore::new(schema).unwrap();
        for &v in values {
            store.append_values(&[Value::from(v), Value::from("t")]).unwrap();
        }
        store
    }

    #[test]
    fn test_mean_and_variance() {
        let store = store_with(&[1.5, 2.5]);
        assert_eq!(mean(&store, "x").unwrap(), 2.0);
        assert_eq!(variance(&store, "x").unwrap(), 0.5);
        assert!((stdev(&store, "x").unwrap() - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_small_stores() {
        let empty = store_with(&[]);
        assert_eq!(mean(&empty, "x").unwrap(), 0.0);
        assert_eq!(variance(&empty, "x").unwrap(), 0.0);

        let single = store_with(&[7.0]);
        assert_eq!(mean(&single, "x").unwrap(), 7.0);
        assert_eq!(variance(&single, "x").unwrap(), 0.0);
        assert_eq!(stdev(&single, "x").unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_categorical_and_missing() {
        let store = store_with(&[1.0, 2.0]);
        assert!(matches!(
            mean(&store, "tag"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            stdev(&store, "tag"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            variance(&store, "missing"),
            Err(Error::ColumnNotFound(_))
        ));
    }
}
