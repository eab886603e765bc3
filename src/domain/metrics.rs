//! Image quality metrics reported by the analysis backend (display only)

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub sharpness: f32,
    pub contrast: f32,
    pub brightness: f32,
    pub noise_level: f32,
    pub ridge_clarity: f32,
    /// Overall score in [0, 100]
    pub overall_quality: f32,
}

/// Coarse grade for the overall quality badge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityGrade {
    pub fn label(self) -> &'static str {
        match self {
            QualityGrade::Excellent => "Excellent",
            QualityGrade::Good => "Good",
            QualityGrade::Fair => "Fair",
            QualityGrade::Poor => "Poor",
        }
    }
}

impl QualityMetrics {
    pub fn grade(&self) -> QualityGrade {
        match self.overall_quality {
            q if q >= 85.0 => QualityGrade::Excellent,
            q if q >= 70.0 => QualityGrade::Good,
            q if q >= 50.0 => QualityGrade::Fair,
            _ => QualityGrade::Poor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(overall: f32) -> QualityMetrics {
        QualityMetrics {
            sharpness: 0.0,
            contrast: 0.0,
            brightness: 0.0,
            noise_level: 0.0,
            ridge_clarity: 0.0,
            overall_quality: overall,
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(metrics(85.0).grade(), QualityGrade::Excellent);
        assert_eq!(metrics(84.9).grade(), QualityGrade::Good);
        assert_eq!(metrics(70.0).grade(), QualityGrade::Good);
        assert_eq!(metrics(50.0).grade(), QualityGrade::Fair);
        assert_eq!(metrics(12.0).grade(), QualityGrade::Poor);
    }
}
