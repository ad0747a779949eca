//! Features Module - Online Preprocessing
//!
//! - `scaler.rs` - Incrementally-fit standardizing scaler (running mean/var)
//! - `vectorizer.rs` - Hashing-trick vectorizer producing fixed-length vectors

pub mod scaler;
pub mod vectorizer;

pub use scaler::StandardScaler;
pub use vectorizer::HashingVectorizer;

/// Partition a raw feature mapping into numeric and categorical subsets.
///
/// A value parses as numeric when it is a finite `f64`; everything else
/// (protocol names, flags, empty fields, NaN/inf spellings) is routed to the
/// categorical path rather than treated as an error.
pub fn partition(features: &[(String, String)]) -> (Vec<(String, f64)>, Vec<(String, String)>) {
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();

    for (name, raw) in features {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => numeric.push((name.clone(), value)),
            _ => categorical.push((name.clone(), raw.clone())),
        }
    }

    (numeric, categorical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_partition_routes_unparseable_to_categorical() {
        let features = mapping(&[("0", "1.5"), ("1", "tcp"), ("2", "0"), ("3", "NaN")]);
        let (numeric, categorical) = partition(&features);

        assert_eq!(numeric.len(), 2);
        assert_eq!(numeric[0], ("0".to_string(), 1.5));
        assert_eq!(categorical.len(), 2);
        assert_eq!(categorical[0].1, "tcp");
        assert_eq!(categorical[1].1, "NaN");
    }
}
