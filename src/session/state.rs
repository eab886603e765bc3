use std::time::Duration;

use crate::config::RendererConfig;
use crate::domain::{AnnotationSet, ImageVariant, QualityMetrics, ViewState};
use crate::export::{ExportEvent, ExportQueue};
use crate::panel::{self, Header, LegendEntry, QualityPanel};
use crate::payload::AnalysisPayload;
use crate::render::{self, FrameStatus, Surface};
use crate::source::{AnnotatedImage, ImageHandle, LoadState};

/// An image source that still has to be fetched
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub variant: ImageVariant,
    pub source: String,
}

/// One open visualization: inputs, view state and both drawing surfaces
#[derive(Debug)]
pub struct Session {
    pub(crate) config: RendererConfig,
    pub(crate) image: AnnotatedImage,
    pub(crate) annotations: AnnotationSet,
    pub(crate) header: Header,
    pub(crate) quality: Option<QualityMetrics>,
    pub(crate) view: ViewState,
    pub(crate) primary: Surface,
    pub(crate) inspection: Option<Surface>,
    pub(crate) exports: ExportQueue,
    pub(crate) events: Vec<ExportEvent>,
}

impl Session {
    /// Start a session for `payload`; images begin in the loading state
    pub fn new(config: RendererConfig, payload: &AnalysisPayload) -> anyhow::Result<Self> {
        payload.validate()?;
        let primary = Surface::new(config.primary_size)?;
        let exports = ExportQueue::new(Duration::from_secs(config.export_timeout_secs));
        let image = image_for(payload);
        let view = initial_view(&config, image.has_enhanced());

        let mut session = Self {
            config,
            image,
            annotations: payload.annotations(),
            header: payload.header(),
            quality: payload.quality_metrics,
            view,
            primary,
            inspection: None,
            exports,
            events: Vec::new(),
        };
        session.redraw();
        Ok(session)
    }

    /// Replace the analysis shown; view state is reset and queued exports fail
    pub fn load(&mut self, payload: &AnalysisPayload) -> anyhow::Result<()> {
        payload.validate()?;
        let cancelled = self.exports.cancel_all("visualization was replaced");
        self.events.extend(cancelled);

        self.image = image_for(payload);
        self.annotations = payload.annotations();
        self.header = payload.header();
        self.quality = payload.quality_metrics;
        self.view = initial_view(&self.config, self.image.has_enhanced());
        self.redraw();
        Ok(())
    }

    /// Sources still in the loading state, original first
    pub fn pending_loads(&self) -> Vec<LoadRequest> {
        let mut requests = Vec::new();
        if self.image.base.state == LoadState::Loading {
            requests.push(LoadRequest {
                variant: ImageVariant::Original,
                source: self.image.base.source.clone(),
            });
        }
        if let Some(enhanced) = &self.image.enhanced
            && enhanced.state == LoadState::Loading
        {
            requests.push(LoadRequest {
                variant: ImageVariant::Enhanced,
                source: enhanced.source.clone(),
            });
        }
        requests
    }

    /// Recompose every open surface from the current inputs
    pub(crate) fn redraw(&mut self) -> FrameStatus {
        let status = render::render(
            &mut self.primary,
            &self.image,
            &self.annotations,
            &self.view,
            &self.config.palette,
        );
        log::debug!("Primary frame: {:?} at {}", status, self.view.zoom_label());

        if status.is_composited() && !self.exports.is_empty() {
            let done = self.exports.fulfill(&self.primary);
            self.events.extend(done);
        }

        if let Some(inspection) = self.inspection.as_mut() {
            render::render(
                inspection,
                &self.image,
                &self.annotations,
                &self.view,
                &self.config.palette,
            );
        }
        status
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn image(&self) -> &AnnotatedImage {
        &self.image
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn primary(&self) -> &Surface {
        &self.primary
    }

    pub fn inspection(&self) -> Option<&Surface> {
        self.inspection.as_ref()
    }

    pub fn is_inspecting(&self) -> bool {
        self.inspection.is_some()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn legend(&self) -> [LegendEntry; 4] {
        panel::legend(&self.annotations, &self.config.palette)
    }

    pub fn quality_panel(&self) -> Option<QualityPanel> {
        QualityPanel::from_metrics(self.quality.as_ref())
    }

    /// Whether the "Enhanced" choice should be enabled
    pub fn enhanced_selectable(&self) -> bool {
        self.view.enhanced_available()
    }

    pub fn pending_exports(&self) -> usize {
        self.exports.len()
    }

    /// Drain completed and failed exports
    pub fn take_export_events(&mut self) -> Vec<ExportEvent> {
        std::mem::take(&mut self.events)
    }
}

fn image_for(payload: &AnalysisPayload) -> AnnotatedImage {
    AnnotatedImage::new(
        ImageHandle::pending(payload.original_image.clone()),
        payload.enhanced_image.clone().map(ImageHandle::pending),
    )
}

fn initial_view(config: &RendererConfig, enhanced_available: bool) -> ViewState {
    let mut view = ViewState::new(enhanced_available, config.preferred_variant);
    view.show_minutiae = config.show_minutiae;
    view.show_core_delta = config.show_core_delta;
    view
}
