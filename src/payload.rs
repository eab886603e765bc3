//! Analysis payload supplied by the results view
//!
//! This is the validation boundary: unknown minutia kinds are rejected by
//! deserialization and non-finite coordinates by [`AnalysisPayload::validate`],
//! so the compositor only ever sees well-formed points.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::{AnnotationSet, CoreDeltaPoint, MinutiaPoint, QualityMetrics};
use crate::panel::Header;

fn default_classification() -> String {
    "Unknown".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    /// Source of the uploaded image
    pub original_image: String,
    /// Source of the enhanced image, when the backend produced one
    #[serde(default, alias = "enhanced_image_path")]
    pub enhanced_image: Option<String>,
    #[serde(default)]
    pub minutiae_points: Vec<MinutiaPoint>,
    #[serde(default)]
    pub core_points: Vec<CoreDeltaPoint>,
    #[serde(default)]
    pub delta_points: Vec<CoreDeltaPoint>,
    #[serde(default)]
    pub ridge_count: u32,
    #[serde(default = "default_classification")]
    pub classification: String,
    #[serde(default)]
    pub quality_metrics: Option<QualityMetrics>,
}

impl AnalysisPayload {
    pub fn new(original_image: impl Into<String>) -> Self {
        Self {
            original_image: original_image.into(),
            enhanced_image: None,
            minutiae_points: Vec::new(),
            core_points: Vec::new(),
            delta_points: Vec::new(),
            ridge_count: 0,
            classification: default_classification(),
            quality_metrics: None,
        }
    }

    /// Parse and validate a JSON payload
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let payload: Self = serde_json::from_str(text).context("parsing analysis payload")?;
        payload.validate()?;
        Ok(payload)
    }

    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.original_image.trim().is_empty() {
            anyhow::bail!("original image source is empty");
        }
        let annotations = self.annotations();
        if let Some(bad) = annotations.positions().find(|p| !p.is_finite()) {
            anyhow::bail!("non-finite annotation coordinate ({}, {})", bad.x, bad.y);
        }
        Ok(())
    }

    pub fn annotations(&self) -> AnnotationSet {
        AnnotationSet::new(
            self.minutiae_points.clone(),
            self.core_points.clone(),
            self.delta_points.clone(),
        )
    }

    pub fn header(&self) -> Header {
        Header {
            classification: self.classification.clone(),
            ridge_count: self.ridge_count,
        }
    }
}
