//! Bridges asynchronous image loading back into session messages

use super::messages::ImageMsg;
use super::state::LoadRequest;
use crate::source::load_image;

/// Load one requested source and describe the outcome as a message
pub async fn fetch(request: LoadRequest) -> ImageMsg {
    let LoadRequest { variant, source } = request;
    match load_image(source.clone()).await {
        Ok(raster) => ImageMsg::Loaded {
            variant,
            source,
            raster,
        },
        Err(err) => ImageMsg::Failed {
            variant,
            source,
            reason: format!("{err:#}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RendererConfig;
    use crate::domain::ImageVariant;
    use crate::payload::AnalysisPayload;
    use crate::session::Session;

    #[tokio::test(flavor = "current_thread")]
    async fn test_fetch_feeds_session() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("original.png");
        image::RgbaImage::from_pixel(640, 480, image::Rgba([128, 128, 128, 255]))
            .save(&original)
            .unwrap();

        let mut payload = AnalysisPayload::new(original.display().to_string());
        payload.enhanced_image = Some(dir.path().join("missing.png").display().to_string());
        let mut session = Session::new(RendererConfig::default(), &payload).unwrap();

        for request in session.pending_loads() {
            let msg = fetch(request).await;
            session.update(msg);
        }

        assert!(session.pending_loads().is_empty());
        assert!(session.primary().is_composited());
        assert_eq!(session.view().active_variant(), ImageVariant::Original);
        assert!(session.image().enhanced.as_ref().unwrap().is_failed());
    }
}
