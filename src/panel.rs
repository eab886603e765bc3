//! Display-only panels shown next to the canvas: legend, header and quality metrics

use std::fmt;

use crate::config::{MarkerColor, MarkerPalette};
use crate::domain::{AnnotationSet, MinutiaKind, QualityGrade, QualityMetrics};
use crate::render::MarkerKind;

/// One legend row: marker kind, its color and how many are present
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub kind: MarkerKind,
    pub color: MarkerColor,
    pub count: usize,
}

impl LegendEntry {
    pub fn title(&self) -> &'static str {
        match self.kind {
            MarkerKind::Ending => "Ridge Endings",
            MarkerKind::Bifurcation => "Bifurcations",
            MarkerKind::Core => "Core Points",
            MarkerKind::Delta => "Delta Points",
        }
    }
}

impl fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.count)
    }
}

/// Legend rows in display order
pub fn legend(annotations: &AnnotationSet, palette: &MarkerPalette) -> [LegendEntry; 4] {
    [
        LegendEntry {
            kind: MarkerKind::Ending,
            color: palette.ending,
            count: annotations.count(MinutiaKind::Ending),
        },
        LegendEntry {
            kind: MarkerKind::Bifurcation,
            color: palette.bifurcation,
            count: annotations.count(MinutiaKind::Bifurcation),
        },
        LegendEntry {
            kind: MarkerKind::Core,
            color: palette.core,
            count: annotations.core.len(),
        },
        LegendEntry {
            kind: MarkerKind::Delta,
            color: palette.delta,
            count: annotations.delta.len(),
        },
    ]
}

/// Classification and ridge count shown above the canvas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub classification: String,
    pub ridge_count: u32,
}

impl Header {
    pub fn ridges_badge(&self) -> String {
        format!("{} ridges", self.ridge_count)
    }

    /// Title of the fullscreen inspection view
    pub fn inspection_title(&self) -> String {
        format!("Fingerprint Visualization - {}", self.classification)
    }
}

/// The three headline quality numbers plus the overall grade
#[derive(Clone, Debug, PartialEq)]
pub struct QualityPanel {
    pub overall: String,
    pub ridge_clarity: String,
    pub sharpness: String,
    pub grade: QualityGrade,
}

impl QualityPanel {
    /// `None` when the analysis carried no metrics: the panel is omitted
    pub fn from_metrics(metrics: Option<&QualityMetrics>) -> Option<Self> {
        let m = metrics?;
        Some(Self {
            overall: format!("{}%", m.overall_quality),
            ridge_clarity: format!("{}%", m.ridge_clarity),
            sharpness: format!("{:.1}", m.sharpness),
            grade: m.grade(),
        })
    }
}

impl fmt::Display for QualityPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall Quality: {} ({})", self.overall, self.grade.label())?;
        writeln!(f, "Ridge Clarity: {}", self.ridge_clarity)?;
        write!(f, "Sharpness: {}", self.sharpness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoreDeltaPoint, MinutiaPoint};

    #[test]
    fn test_legend_counts() {
        let set = AnnotationSet::new(
            vec![
                MinutiaPoint::new(MinutiaKind::Ending, 1.0, 1.0),
                MinutiaPoint::new(MinutiaKind::Bifurcation, 2.0, 2.0),
                MinutiaPoint::new(MinutiaKind::Bifurcation, 3.0, 3.0),
            ],
            vec![CoreDeltaPoint::new(4.0, 4.0)],
            vec![],
        );
        let rows = legend(&set, &MarkerPalette::default());
        let text: Vec<String> = rows.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            [
                "Ridge Endings (1)",
                "Bifurcations (2)",
                "Core Points (1)",
                "Delta Points (0)"
            ]
        );
        assert_eq!(rows[2].color, MarkerPalette::default().core);
    }

    #[test]
    fn test_quality_panel_omitted_without_metrics() {
        assert!(QualityPanel::from_metrics(None).is_none());
    }

    #[test]
    fn test_quality_panel_formatting() {
        let metrics = QualityMetrics {
            sharpness: 812.456,
            contrast: 40.0,
            brightness: 120.0,
            noise_level: 3.0,
            ridge_clarity: 64.5,
            overall_quality: 72.0,
        };
        let panel = QualityPanel::from_metrics(Some(&metrics)).unwrap();
        assert_eq!(panel.overall, "72%");
        assert_eq!(panel.ridge_clarity, "64.5%");
        assert_eq!(panel.sharpness, "812.5");
        assert_eq!(panel.grade, QualityGrade::Good);
    }

    #[test]
    fn test_header_text() {
        let header = Header {
            classification: "Whorl".into(),
            ridge_count: 14,
        };
        assert_eq!(header.ridges_badge(), "14 ridges");
        assert_eq!(header.inspection_title(), "Fingerprint Visualization - Whorl");
    }
}
