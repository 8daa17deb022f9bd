//! Input dataset and the size mapping from raw values to sphere radii.
//!
//! A dataset is an ordered list of `(name, value)` entries. Order matters: it
//! is both the placement order along the X axis and the camera visiting order.

use crate::constants::{SAMPLE_DATASET, SCALE_FACTOR};
use crate::error::{FlybyError, Result};
use std::collections::HashSet;

/// One labeled magnitude from the input dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: String,
    pub value: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ordered collection of items, in visiting order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub items: Vec<Item>,
}

impl Dataset {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The built-in sample used when no dataset file is supplied.
    pub fn sample() -> Self {
        SAMPLE_DATASET
            .iter()
            .map(|&(name, value)| Item::new(name, value))
            .collect()
    }

    /// Parse the text form: one `name = value` (or `name: value`) per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Names may contain
    /// spaces; the value is everything after the first separator.
    pub fn parse(text: &str) -> Result<Self> {
        let mut items = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_no = idx + 1;
            let (name, value) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .ok_or_else(|| FlybyError::Parse {
                    line: line_no,
                    msg: "expected `name = value`".to_string(),
                })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(FlybyError::Parse {
                    line: line_no,
                    msg: "missing name".to_string(),
                });
            }
            let value: f64 = value.trim().parse().map_err(|_| FlybyError::Parse {
                line: line_no,
                msg: format!("`{}` is not a number", value.trim()),
            })?;
            items.push(Item::new(name, value));
        }
        let dataset = Self::new(items);
        dataset.warn_duplicate_names();
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    fn warn_duplicate_names(&self) {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.name.as_str()) {
                log::warn!("[dataset] duplicate name `{}`; labels will be ambiguous", item.name);
            }
        }
    }
}

impl FromIterator<Item> for Dataset {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An item together with its normalized visual radius.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledItem {
    pub item: Item,
    pub scale: f32,
}

/// Options for [`map_sizes`].
///
/// - `scale_factor`: radius given to the item with the largest value
/// - `validate`: reject non-positive or non-finite values up front
#[derive(Clone, Copy, Debug)]
pub struct MapOptions {
    pub scale_factor: f32,
    pub validate: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            scale_factor: SCALE_FACTOR,
            validate: true,
        }
    }
}

/// Convert raw values into radii: `scale = value / max_value * scale_factor`.
///
/// Input order is preserved and the maximum item gets exactly `scale_factor`.
/// The ratio is taken in `f64` and narrowed only for the final radius. The
/// largest value must be positive and finite even when validation is off.
pub fn map_sizes(items: &[Item], opts: MapOptions) -> Result<Vec<ScaledItem>> {
    if items.is_empty() {
        return Err(FlybyError::EmptyDataset);
    }
    if !(opts.scale_factor.is_finite() && opts.scale_factor > 0.0) {
        return Err(FlybyError::InvalidScaleFactor(opts.scale_factor));
    }
    if opts.validate {
        if let Some(bad) = items
            .iter()
            .find(|it| !(it.value.is_finite() && it.value > 0.0))
        {
            return Err(FlybyError::InvalidValue {
                name: bad.name.clone(),
                value: bad.value,
            });
        }
    }

    let max_value = items
        .iter()
        .map(|it| it.value)
        .fold(f64::NEG_INFINITY, f64::max);
    if !(max_value.is_finite() && max_value > 0.0) {
        let name = items
            .iter()
            .find(|it| it.value == max_value)
            .map_or_else(String::new, |it| it.name.clone());
        return Err(FlybyError::InvalidValue {
            name,
            value: max_value,
        });
    }

    Ok(items
        .iter()
        .map(|it| ScaledItem {
            item: it.clone(),
            scale: ((it.value / max_value) as f32) * opts.scale_factor,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_separators_and_skips_comments() {
        let text = "# loc per component\nMail = 2301\n\nJob Creator: 2754.5\n";
        let ds = Dataset::parse(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.items[0], Item::new("Mail", 2301.0));
        assert_eq!(ds.items[1], Item::new("Job Creator", 2754.5));
    }

    #[test]
    fn parse_reports_line_numbers() {
        let err = Dataset::parse("A = 1\nB = lots\n").unwrap_err();
        match err {
            FlybyError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            Dataset::parse("no separator here"),
            Err(FlybyError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            Dataset::parse(" = 4"),
            Err(FlybyError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn sample_dataset_is_ordered_and_positive() {
        let ds = Dataset::sample();
        assert_eq!(ds.len(), SAMPLE_DATASET.len());
        assert_eq!(ds.items[0].name, "Mail");
        assert!(ds.iter().all(|it| it.value > 0.0));
    }

    #[test]
    fn validation_can_be_disabled() {
        let items = vec![Item::new("a", 4.0), Item::new("b", 0.0), Item::new("c", -2.0)];
        let opts = MapOptions {
            scale_factor: 1.0,
            validate: false,
        };
        let scaled = map_sizes(&items, opts).unwrap();
        assert_eq!(scaled[0].scale, 1.0);
        assert_eq!(scaled[1].scale, 0.0);
        assert_eq!(scaled[2].scale, -0.5);
    }

    #[test]
    fn non_positive_maximum_is_rejected_without_validation() {
        let opts = MapOptions {
            scale_factor: 2.0,
            validate: false,
        };
        let zeros = vec![Item::new("a", 0.0), Item::new("b", 0.0)];
        assert!(matches!(
            map_sizes(&zeros, opts),
            Err(FlybyError::InvalidValue { value, .. }) if value == 0.0
        ));
        let negative = vec![Item::new("a", -1.0), Item::new("b", -4.0)];
        assert!(matches!(
            map_sizes(&negative, opts),
            Err(FlybyError::InvalidValue { name, .. }) if name == "a"
        ));
    }

    #[test]
    fn large_values_keep_full_precision() {
        let ds = Dataset::parse("Big = 16777217
").unwrap();
        assert_eq!(ds.items[0].value, 16_777_217.0);
        let scaled = map_sizes(&ds.items, MapOptions::default()).unwrap();
        assert_eq!(scaled[0].scale, SCALE_FACTOR);
    }

    #[test]
    fn rejects_bad_scale_factor() {
        let items = vec![Item::new("a", 1.0)];
        for sf in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let opts = MapOptions {
                scale_factor: sf,
                validate: true,
            };
            assert!(matches!(
                map_sizes(&items, opts),
                Err(FlybyError::InvalidScaleFactor(_))
            ));
        }
    }
}
