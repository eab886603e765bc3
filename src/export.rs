//! PNG export of the composited surface
//!
//! Exports requested before the first full frame are queued and fulfilled by
//! the first successful composite. Queued requests expire after a timeout.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use image::RgbaImage;

use crate::config::SaveLocation;
use crate::render::Surface;

/// Prefix of every exported file name
pub const FILE_PREFIX: &str = "fingerprint_visualization_";

/// `fingerprint_visualization_<millis>.png`
pub fn file_name(timestamp_ms: i64) -> String {
    format!("{FILE_PREFIX}{timestamp_ms}.png")
}

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Read back the surface and encode it as an 8-bit RGBA PNG
pub fn export_png(surface: &Surface) -> anyhow::Result<Vec<u8>> {
    let img = surface.to_rgba_image();
    let mut buffer = Vec::new();
    write_png(&mut buffer, &img).context("encoding PNG")?;
    Ok(buffer)
}

/// An encoded frame ready to be offered as a download
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub file_name: String,
    pub timestamp_ms: i64,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl Snapshot {
    pub fn capture(surface: &Surface, timestamp_ms: i64) -> anyhow::Result<Self> {
        let png = export_png(surface)?;
        log::debug!(
            "Exported {}x{} frame ({} bytes)",
            surface.width(),
            surface.height(),
            png.len()
        );
        Ok(Self {
            file_name: file_name(timestamp_ms),
            timestamp_ms,
            width: surface.width(),
            height: surface.height(),
            png,
        })
    }

    /// Write into `dir` through a temporary file, so readers never see a partial PNG
    pub fn save_in(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        let mut file = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(".png.part")
            .tempfile_in(dir)?;
        io::Write::write_all(&mut file, &self.png)?;

        let path = dir.join(&self.file_name);
        file.persist(&path)
            .with_context(|| format!("saving {}", path.display()))?;
        Ok(path)
    }

    pub fn save(&self, location: SaveLocation) -> anyhow::Result<PathBuf> {
        let dir = location
            .dir()
            .ok_or_else(|| anyhow::anyhow!("no directory for {:?}", location))?;
        self.save_in(&dir)
    }
}

/// Identifies one export request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExportTicket(pub u64);

/// Result of an export request, drained by the caller
#[derive(Clone, Debug, PartialEq)]
pub enum ExportEvent {
    Completed {
        ticket: ExportTicket,
        snapshot: Snapshot,
    },
    Failed {
        ticket: ExportTicket,
        reason: String,
    },
}

#[derive(Clone, Debug)]
struct PendingExport {
    ticket: ExportTicket,
    timestamp_ms: i64,
    requested_at: Instant,
}

/// Export requests waiting for the first composited frame
#[derive(Clone, Debug)]
pub struct ExportQueue {
    next_ticket: u64,
    pending: Vec<PendingExport>,
    timeout: Duration,
}

impl ExportQueue {
    pub fn new(timeout: Duration) -> Self {
        Self {
            next_ticket: 0,
            pending: Vec::new(),
            timeout,
        }
    }

    pub fn issue_ticket(&mut self) -> ExportTicket {
        self.next_ticket += 1;
        ExportTicket(self.next_ticket)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn defer(&mut self, ticket: ExportTicket, timestamp_ms: i64, now: Instant) {
        log::debug!("Export {:?} deferred until the first frame", ticket);
        self.pending.push(PendingExport {
            ticket,
            timestamp_ms,
            requested_at: now,
        });
    }

    /// Encode every queued request from `surface`, oldest first
    pub fn fulfill(&mut self, surface: &Surface) -> Vec<ExportEvent> {
        self.pending
            .drain(..)
            .map(|p| capture_event(p.ticket, surface, p.timestamp_ms))
            .collect()
    }

    /// Drop requests older than the timeout and report them as failed
    pub fn expire(&mut self, now: Instant) -> Vec<ExportEvent> {
        let timeout = self.timeout;
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|p| now.saturating_duration_since(p.requested_at) >= timeout);
        self.pending = kept;

        expired
            .into_iter()
            .map(|p| {
                log::warn!("Export {:?} timed out waiting for the image", p.ticket);
                ExportEvent::Failed {
                    ticket: p.ticket,
                    reason: format!("image did not load within {}s", timeout.as_secs()),
                }
            })
            .collect()
    }

    /// Fail every queued request, e.g. when the image is replaced
    pub fn cancel_all(&mut self, reason: &str) -> Vec<ExportEvent> {
        self.pending
            .drain(..)
            .map(|p| ExportEvent::Failed {
                ticket: p.ticket,
                reason: reason.to_string(),
            })
            .collect()
    }
}

/// Capture `surface` for `ticket`, turning encode errors into a failure event
pub fn capture_event(ticket: ExportTicket, surface: &Surface, timestamp_ms: i64) -> ExportEvent {
    match Snapshot::capture(surface, timestamp_ms) {
        Ok(snapshot) => ExportEvent::Completed { ticket, snapshot },
        Err(err) => {
            log::error!("Failed to export frame: {:?}", err);
            ExportEvent::Failed {
                ticket,
                reason: format!("{err:#}"),
            }
        }
    }
}
