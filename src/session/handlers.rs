//! Session message handlers
//!
//! Every transition is total and synchronous, and ends in a redraw of all
//! open surfaces.

use std::time::Instant;

use super::messages::{ExportMsg, ImageMsg, InspectMsg, Msg, ViewMsg};
use super::state::Session;
use crate::domain::ImageVariant;
use crate::export::capture_event;
use crate::render::Surface;
use crate::source::LoadState;

impl Session {
    /// Apply one message
    pub fn update(&mut self, msg: impl Into<Msg>) {
        match msg.into() {
            Msg::View(msg) => self.handle_view(msg),
            Msg::Image(msg) => self.handle_image(msg),
            Msg::Export(msg) => self.handle_export(msg),
            Msg::Inspect(msg) => self.handle_inspect(msg),
        }
    }

    // ========================================================================
    // View handlers
    // ========================================================================

    fn handle_view(&mut self, msg: ViewMsg) {
        match msg {
            ViewMsg::ZoomIn => self.view.zoom_in(),
            ViewMsg::ZoomOut => self.view.zoom_out(),
            ViewMsg::ResetZoom => self.view.reset_zoom(),
            ViewMsg::SetVariant(variant) => self.view.set_variant(variant),
            ViewMsg::ToggleLayer(layer) => self.view.toggle_layer(layer),
        }
        self.redraw();
    }

    // ========================================================================
    // Image handlers
    // ========================================================================

    fn handle_image(&mut self, msg: ImageMsg) {
        match msg {
            ImageMsg::Loaded {
                variant,
                source,
                raster,
            } => {
                let Some(handle) = self.image.handle_mut(variant) else {
                    return;
                };
                // A load for a previous payload may land after the image was replaced
                if handle.source != source {
                    log::debug!("Ignoring stale image load for {}", source);
                    return;
                }
                log::debug!(
                    "{:?} image loaded: {}x{}",
                    variant,
                    raster.width(),
                    raster.height()
                );
                handle.state = LoadState::Loaded(raster);
            }
            ImageMsg::Failed {
                variant,
                source,
                reason,
            } => {
                let Some(handle) = self.image.handle_mut(variant) else {
                    return;
                };
                if handle.source != source {
                    return;
                }
                log::warn!("Failed to load {}: {}", source, reason);
                handle.state = LoadState::Failed(reason);
                if variant == ImageVariant::Enhanced {
                    self.view.disable_enhanced();
                }
            }
        }
        self.redraw();
    }

    // ========================================================================
    // Export handlers
    // ========================================================================

    fn handle_export(&mut self, msg: ExportMsg) {
        match msg {
            ExportMsg::Request { timestamp_ms, at } => {
                let ticket = self.exports.issue_ticket();
                if self.primary.is_composited() {
                    let event = capture_event(ticket, &self.primary, timestamp_ms);
                    self.events.push(event);
                } else {
                    self.exports.defer(ticket, timestamp_ms, at);
                }
            }
            ExportMsg::Tick(now) => self.expire_exports(now),
        }
    }

    fn expire_exports(&mut self, now: Instant) {
        let expired = self.exports.expire(now);
        self.events.extend(expired);
    }

    // ========================================================================
    // Inspection handlers
    // ========================================================================

    fn handle_inspect(&mut self, msg: InspectMsg) {
        let open = match msg {
            InspectMsg::Open => true,
            InspectMsg::Close => false,
            InspectMsg::Toggle => self.inspection.is_none(),
        };

        if !open {
            self.inspection = None;
            return;
        }
        if self.inspection.is_some() {
            return;
        }

        match Surface::new(self.config.inspection_size) {
            Ok(mut surface) => {
                crate::render::render(
                    &mut surface,
                    &self.image,
                    &self.annotations,
                    &self.view,
                    &self.config.palette,
                );
                self.inspection = Some(surface);
            }
            Err(err) => log::error!("Could not open inspection view: {:?}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::config::{RendererConfig, SurfaceSize};
    use crate::domain::{CoreDeltaPoint, Layer, MinutiaKind, MinutiaPoint};
    use crate::export::{ExportEvent, file_name};
    use crate::payload::AnalysisPayload;
    use crate::session::LoadRequest;
    use crate::source::Raster;

    fn payload(enhanced: bool) -> AnalysisPayload {
        let mut p = AnalysisPayload::new("original.png");
        if enhanced {
            p.enhanced_image = Some("enhanced.png".into());
        }
        p.minutiae_points = vec![
            MinutiaPoint::new(MinutiaKind::Ending, 100.0, 100.0),
            MinutiaPoint::new(MinutiaKind::Bifurcation, 200.0, 150.0),
        ];
        p.core_points = vec![CoreDeltaPoint::new(150.0, 120.0)];
        p
    }

    fn raster(value: u8) -> Raster {
        Raster::from_rgba(&RgbaImage::from_pixel(900, 700, Rgba([value, value, value, 255]))).unwrap()
    }

    fn loaded(variant: ImageVariant, source: &str, value: u8) -> ImageMsg {
        ImageMsg::Loaded {
            variant,
            source: source.into(),
            raster: raster(value),
        }
    }

    fn session(enhanced: bool) -> Session {
        Session::new(RendererConfig::default(), &payload(enhanced)).unwrap()
    }

    fn request(ts: i64, at: Instant) -> ExportMsg {
        ExportMsg::Request { timestamp_ms: ts, at }
    }

    fn is_red(p: [u8; 4]) -> bool {
        p[0] > 200 && p[1] < 90 && p[2] < 90
    }

    fn is_gray(p: Option<[u8; 4]>, value: u8) -> bool {
        p.is_some_and(|[r, g, b, a]| {
            a == 255 && [r, g, b].iter().all(|&c| c.abs_diff(value) <= 2)
        })
    }

    #[test]
    fn test_pending_loads_lists_both_variants() {
        let s = session(true);
        assert_eq!(
            s.pending_loads(),
            vec![
                LoadRequest {
                    variant: ImageVariant::Original,
                    source: "original.png".into()
                },
                LoadRequest {
                    variant: ImageVariant::Enhanced,
                    source: "enhanced.png".into()
                },
            ]
        );
    }

    #[test]
    fn test_nothing_drawn_until_image_loads() {
        let mut s = session(false);
        assert!(!s.primary().is_composited());
        assert!(s.primary().data().iter().all(|&b| b == 0));

        s.update(loaded(ImageVariant::Original, "original.png", 128));
        assert!(s.primary().is_composited());
        assert!(s.pending_loads().is_empty());
    }

    #[test]
    fn test_zoom_in_moves_marker() {
        let mut s = session(false);
        s.update(loaded(ImageVariant::Original, "original.png", 128));
        assert!(s.primary().pixel(100, 100).is_some_and(is_red));

        s.update(ViewMsg::ZoomIn);
        assert_eq!(s.view().zoom(), 1.5);
        assert!(s.primary().pixel(150, 150).is_some_and(is_red));
        assert!(!s.primary().pixel(100, 100).is_some_and(is_red));

        s.update(ViewMsg::ResetZoom);
        assert!(s.primary().pixel(100, 100).is_some_and(is_red));
    }

    #[test]
    fn test_repeated_zoom_stays_clamped() {
        let mut s = session(false);
        for _ in 0..10 {
            s.update(ViewMsg::ZoomIn);
        }
        assert_eq!(s.view().zoom(), 5.0);
        for _ in 0..10 {
            s.update(ViewMsg::ZoomOut);
        }
        assert_eq!(s.view().zoom(), 0.5);
    }

    #[test]
    fn test_enhanced_unavailable_without_image() {
        let mut s = session(false);
        assert!(!s.enhanced_selectable());
        s.update(ViewMsg::SetVariant(ImageVariant::Enhanced));
        assert_eq!(s.view().active_variant(), ImageVariant::Original);
    }

    #[test]
    fn test_enhanced_is_preferred_when_present() {
        let mut s = session(true);
        assert_eq!(s.view().active_variant(), ImageVariant::Enhanced);

        // Only the original has loaded: the enhanced frame is still pending
        s.update(loaded(ImageVariant::Original, "original.png", 128));
        assert!(!s.primary().is_composited());

        s.update(loaded(ImageVariant::Enhanced, "enhanced.png", 40));
        assert!(is_gray(s.primary().pixel(500, 300), 40));

        s.update(ViewMsg::SetVariant(ImageVariant::Original));
        assert!(is_gray(s.primary().pixel(500, 300), 128));
    }

    #[test]
    fn test_failed_enhanced_falls_back_to_original() {
        let mut s = session(true);
        s.update(loaded(ImageVariant::Original, "original.png", 128));
        s.update(ImageMsg::Failed {
            variant: ImageVariant::Enhanced,
            source: "enhanced.png".into(),
            reason: "corrupt".into(),
        });
        assert_eq!(s.view().active_variant(), ImageVariant::Original);
        assert!(!s.enhanced_selectable());
        assert!(s.primary().is_composited());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut s = session(false);
        s.update(loaded(ImageVariant::Original, "previous.png", 128));
        assert!(!s.primary().is_composited());
        assert_eq!(s.pending_loads().len(), 1);
    }

    #[test]
    fn test_export_deferred_until_first_frame() {
        let mut s = session(false);
        let now = Instant::now();
        s.update(request(7, now));
        assert!(s.take_export_events().is_empty());
        assert_eq!(s.pending_exports(), 1);

        s.update(loaded(ImageVariant::Original, "original.png", 128));
        let events = s.take_export_events();
        assert_eq!(s.pending_exports(), 0);
        match &events[..] {
            [ExportEvent::Completed { snapshot, .. }] => {
                assert_eq!(snapshot.file_name, file_name(7));
                let decoded = image::load_from_memory(&snapshot.png).unwrap().to_rgba8();
                assert_eq!(decoded.dimensions(), (600, 400));
                assert!(is_red(decoded.get_pixel(100, 100).0));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn test_export_immediate_after_render() {
        let mut s = session(false);
        s.update(loaded(ImageVariant::Original, "original.png", 128));
        s.update(request(9, Instant::now()));
        let events = s.take_export_events();
        assert!(matches!(&events[..], [ExportEvent::Completed { snapshot, .. }] if snapshot.timestamp_ms == 9));
    }

    #[test]
    fn test_export_times_out_when_image_never_loads() {
        let mut s = session(false);
        let start = Instant::now();
        s.update(request(1, start));
        s.update(ExportMsg::Tick(start + Duration::from_secs(11)));

        let events = s.take_export_events();
        assert!(matches!(&events[..], [ExportEvent::Failed { .. }]));
        assert_eq!(s.pending_exports(), 0);
    }

    #[test]
    fn test_export_failed_image_stays_deferred() {
        let mut s = session(false);
        s.update(ImageMsg::Failed {
            variant: ImageVariant::Original,
            source: "original.png".into(),
            reason: "404".into(),
        });
        s.update(request(1, Instant::now()));
        assert!(s.take_export_events().is_empty());
        assert_eq!(s.pending_exports(), 1);
    }

    #[test]
    fn test_inspection_shares_view_and_inputs() {
        let mut s = session(false);
        s.update(loaded(ImageVariant::Original, "original.png", 128));
        s.update(ViewMsg::ZoomIn);
        let before = *s.view();

        s.update(InspectMsg::Open);
        assert_eq!(*s.view(), before);
        let inspection = s.inspection().unwrap();
        assert_eq!((inspection.width(), inspection.height()), (800, 600));
        assert!(inspection.pixel(150, 150).is_some_and(is_red));

        // The overlapping region matches the primary frame pixel for pixel
        for (x, y) in [(150, 150), (10, 10), (300, 180), (599, 399)] {
            assert_eq!(s.primary().pixel(x, y), inspection.pixel(x, y));
        }

        s.update(ViewMsg::ToggleLayer(Layer::Minutiae));
        assert!(!s.inspection().unwrap().pixel(150, 150).is_some_and(is_red));

        s.update(InspectMsg::Toggle);
        assert!(!s.is_inspecting());
        assert_eq!(s.view().zoom(), 1.5);
        assert!(!s.view().show_minutiae);
    }

    #[test]
    fn test_invalid_inspection_size_keeps_it_closed() {
        let config = RendererConfig {
            inspection_size: SurfaceSize::new(0, 0),
            ..Default::default()
        };
        let mut s = Session::new(config, &payload(false)).unwrap();
        s.update(InspectMsg::Open);
        assert!(!s.is_inspecting());
    }

    #[test]
    fn test_load_resets_view_and_cancels_exports() {
        let mut s = session(true);
        s.update(ViewMsg::ZoomIn);
        s.update(ViewMsg::ToggleLayer(Layer::CoreDelta));
        s.update(request(1, Instant::now()));

        s.load(&payload(false)).unwrap();
        assert_eq!(s.view().zoom(), 1.0);
        assert!(s.view().show_core_delta);
        assert_eq!(s.view().active_variant(), ImageVariant::Original);
        assert!(matches!(&s.take_export_events()[..], [ExportEvent::Failed { .. }]));
        assert_eq!(s.pending_exports(), 0);
    }

    #[test]
    fn test_panels() {
        let s = session(false);
        assert_eq!(s.legend()[0].to_string(), "Ridge Endings (1)");
        assert!(s.quality_panel().is_none());
        assert_eq!(s.header().classification, "Unknown");
    }
}
