use crate::error::QuakeStyleError;
use quakemap_common::types::HexColor;
use quakemap_scales::threshold::ThresholdScale;
use serde::{Deserialize, Serialize};

/// Upper depth bounds (km, exclusive) of the default buckets
pub const DEFAULT_DEPTH_THRESHOLDS: [f64; 5] = [10.0, 30.0, 50.0, 70.0, 90.0];

/// Default ramp, shallow to extremely deep
pub const DEFAULT_DEPTH_COLORS: [HexColor; 6] = [
    HexColor::new(0x00, 0xFF, 0x00),
    HexColor::new(0xFF, 0xFF, 0x00),
    HexColor::new(0xFF, 0xA5, 0x00),
    HexColor::new(0xFF, 0x7F, 0x00),
    HexColor::new(0xFF, 0x45, 0x00),
    HexColor::new(0x8B, 0x00, 0x00),
];

/// One depth bucket: depths strictly below `upper_bound` (and at or above the previous rule's
/// bound) get `color`. `None` marks the open-ended deepest bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthColorRule {
    #[serde(default)]
    pub upper_bound: Option<f64>,
    pub color: HexColor,
}

impl DepthColorRule {
    pub fn bounded(upper_bound: f64, color: HexColor) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            color,
        }
    }

    pub fn unbounded(color: HexColor) -> Self {
        Self {
            upper_bound: None,
            color,
        }
    }
}

/// Ordered depth buckets shared by marker styling and the legend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<DepthColorRule>", into = "Vec<DepthColorRule>")]
pub struct DepthColorTable {
    rules: Vec<DepthColorRule>,
    classifier: ColorClassifier,
}

impl DepthColorTable {
    pub fn try_new(rules: Vec<DepthColorRule>) -> Result<Self, QuakeStyleError> {
        let Some((last, bounded)) = rules.split_last() else {
            return Err(QuakeStyleError::EmptyTable);
        };
        if last.upper_bound.is_some() {
            return Err(QuakeStyleError::MissingUnboundedRule);
        }

        let mut thresholds = Vec::with_capacity(bounded.len());
        for (i, rule) in bounded.iter().enumerate() {
            match rule.upper_bound {
                Some(bound) => thresholds.push(bound),
                None => return Err(QuakeStyleError::UnboundedRuleNotLast(i)),
            }
        }

        let colors: Vec<HexColor> = rules.iter().map(|rule| rule.color).collect();
        let scale = ThresholdScale::try_new(colors, thresholds, last.color)?;

        Ok(Self {
            rules,
            classifier: ColorClassifier { scale },
        })
    }

    pub fn rules(&self) -> &[DepthColorRule] {
        &self.rules
    }

    /// The bounded rules' upper bounds, ascending
    pub fn thresholds(&self) -> &[f64] {
        self.classifier.scale.thresholds()
    }

    pub fn colors(&self) -> &[HexColor] {
        self.classifier.scale.range()
    }

    pub fn classifier(&self) -> &ColorClassifier {
        &self.classifier
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for DepthColorTable {
    fn default() -> Self {
        let mut rules: Vec<DepthColorRule> = DEFAULT_DEPTH_THRESHOLDS
            .iter()
            .zip(DEFAULT_DEPTH_COLORS.iter())
            .map(|(bound, color)| DepthColorRule::bounded(*bound, *color))
            .collect();
        rules.push(DepthColorRule::unbounded(DEFAULT_DEPTH_COLORS[5]));
        Self::try_new(rules).expect("default depth color table is valid")
    }
}

impl PartialEq for DepthColorTable {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl TryFrom<Vec<DepthColorRule>> for DepthColorTable {
    type Error = QuakeStyleError;

    fn try_from(value: Vec<DepthColorRule>) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DepthColorTable> for Vec<DepthColorRule> {
    fn from(value: DepthColorTable) -> Self {
        value.rules
    }
}

/// Maps a depth in kilometers to its bucket color.
///
/// Negative depths land in the shallowest bucket and `NaN` in the deepest one.
#[derive(Debug, Clone)]
pub struct ColorClassifier {
    scale: ThresholdScale<HexColor>,
}

impl ColorClassifier {
    pub fn classify(&self, depth: f64) -> HexColor {
        self.scale.scale(depth)
    }

    /// Bucket index for `depth`, `0` being the shallowest
    pub fn bucket(&self, depth: f64) -> usize {
        self.scale
            .bucket(depth)
            .unwrap_or(self.scale.range().len() - 1)
    }

    /// The `[lower, upper)` depths classified into bucket `index`, `None` marking an open side
    pub fn extent(&self, index: usize) -> Option<(Option<f64>, Option<f64>)> {
        self.scale.invert_extent(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hex(s: &str) -> HexColor {
        s.parse().unwrap()
    }

    #[rstest]
    #[case(-5.0, "#00FF00")]
    #[case(0.0, "#00FF00")]
    #[case(9.9, "#00FF00")]
    #[case(10.0, "#FFFF00")]
    #[case(29.99, "#FFFF00")]
    #[case(30.0, "#FFA500")]
    #[case(50.0, "#FF7F00")]
    #[case(70.0, "#FF4500")]
    #[case(89.9, "#FF4500")]
    #[case(90.0, "#8B0000")]
    #[case(700.0, "#8B0000")]
    fn test_default_classification(#[case] depth: f64, #[case] expected: &str) {
        let table = DepthColorTable::default();
        assert_eq!(table.classifier().classify(depth), hex(expected));
    }

    #[test]
    fn test_nan_depth_is_deepest() {
        let table = DepthColorTable::default();
        assert_eq!(table.classifier().classify(f64::NAN), hex("#8B0000"));
        assert_eq!(table.classifier().bucket(f64::NAN), 5);
    }

    #[test]
    fn test_default_table_shape() {
        let table = DepthColorTable::default();
        assert_eq!(table.len(), 6);
        assert_eq!(table.thresholds(), &DEFAULT_DEPTH_THRESHOLDS);
        assert_eq!(table.colors(), &DEFAULT_DEPTH_COLORS);
        assert_eq!(table.rules().last().unwrap().upper_bound, None);
    }

    #[test]
    fn test_bucket_extents() {
        let table = DepthColorTable::default();
        let classifier = table.classifier();
        assert_eq!(classifier.extent(0), Some((None, Some(10.0))));
        assert_eq!(classifier.extent(2), Some((Some(30.0), Some(50.0))));
        assert_eq!(classifier.extent(5), Some((Some(90.0), None)));
        assert_eq!(classifier.extent(6), None);

        for index in 0..table.len() {
            if let Some((Some(lower), _)) = classifier.extent(index) {
                assert_eq!(classifier.bucket(lower), index);
            }
        }
    }

    #[test]
    fn test_classification_is_monotonic() {
        let table = DepthColorTable::default();
        let classifier = table.classifier();
        let mut previous = 0;
        for step in -100..=8000 {
            let bucket = classifier.bucket(step as f64 * 0.1);
            assert!(bucket >= previous);
            assert!(table.colors().contains(&classifier.classify(step as f64 * 0.1)));
            previous = bucket;
        }
    }

    #[test]
    fn test_invalid_tables() {
        assert_eq!(
            DepthColorTable::try_new(vec![]).unwrap_err(),
            QuakeStyleError::EmptyTable
        );
        assert_eq!(
            DepthColorTable::try_new(vec![DepthColorRule::bounded(10.0, HexColor::BLACK)])
                .unwrap_err(),
            QuakeStyleError::MissingUnboundedRule
        );
        assert_eq!(
            DepthColorTable::try_new(vec![
                DepthColorRule::unbounded(HexColor::BLACK),
                DepthColorRule::unbounded(HexColor::BLACK),
            ])
            .unwrap_err(),
            QuakeStyleError::UnboundedRuleNotLast(0)
        );
        assert!(matches!(
            DepthColorTable::try_new(vec![
                DepthColorRule::bounded(30.0, HexColor::BLACK),
                DepthColorRule::bounded(10.0, HexColor::BLACK),
                DepthColorRule::unbounded(HexColor::BLACK),
            ]),
            Err(QuakeStyleError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_table_from_json() {
        let table: DepthColorTable = serde_json::from_str(
            r##"[
                {"upper_bound": 100, "color": "#0000ff"},
                {"color": "red"}
            ]"##,
        )
        .unwrap();
        assert_eq!(table.classifier().classify(99.0), hex("#0000FF"));
        assert_eq!(table.classifier().classify(100.0), hex("#FF0000"));

        let err = serde_json::from_str::<DepthColorTable>(r##"[{"upper_bound": 1, "color": "red"}]"##);
        assert!(err.is_err());
    }
}
