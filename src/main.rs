use std::path::PathBuf;

use anyhow::Context;
use ridgeview::domain::{ImageVariant, Layer};
use ridgeview::export::{ExportEvent, Snapshot, now_millis};
use ridgeview::session::{self, ExportMsg, InspectMsg, ViewMsg};
use ridgeview::{AnalysisPayload, RendererConfig, Session};

const USAGE: &str = "usage: ridgeview <payload.json> [--out DIR] [--zoom-in N] [--zoom-out N] \
                     [--original] [--hide-minutiae] [--hide-core-delta] [--inspect] [--save-defaults]";

#[derive(Debug, Default)]
struct Args {
    payload: PathBuf,
    out: Option<PathBuf>,
    zoom_in: u32,
    zoom_out: u32,
    original: bool,
    hide_minutiae: bool,
    hide_core_delta: bool,
    inspect: bool,
    save_defaults: bool,
    help: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut payload = None;

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--out" => args.out = Some(argv.next().context(USAGE)?.into()),
            "--zoom-in" => args.zoom_in = argv.next().context(USAGE)?.parse()?,
            "--zoom-out" => args.zoom_out = argv.next().context(USAGE)?.parse()?,
            "--original" => args.original = true,
            "--hide-minutiae" => args.hide_minutiae = true,
            "--hide-core-delta" => args.hide_core_delta = true,
            "--inspect" => args.inspect = true,
            "--save-defaults" => args.save_defaults = true,
            "-h" | "--help" => {
                args.help = true;
                return Ok(args);
            }
            other if payload.is_none() && !other.starts_with("--") => {
                payload = Some(PathBuf::from(other))
            }
            other => anyhow::bail!("unexpected argument {other:?}\n{USAGE}"),
        }
    }

    args.payload = payload.context(USAGE)?;
    Ok(args)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = RendererConfig::load();
    let payload = AnalysisPayload::from_file(&args.payload)?;
    let mut session = Session::new(config, &payload)?;

    for request in session.pending_loads() {
        let msg = session::fetch(request).await;
        session.update(msg);
    }

    if args.original {
        session.update(ViewMsg::SetVariant(ImageVariant::Original));
    }
    for _ in 0..args.zoom_in {
        session.update(ViewMsg::ZoomIn);
    }
    for _ in 0..args.zoom_out {
        session.update(ViewMsg::ZoomOut);
    }
    if args.hide_minutiae {
        session.update(ViewMsg::ToggleLayer(Layer::Minutiae));
    }
    if args.hide_core_delta {
        session.update(ViewMsg::ToggleLayer(Layer::CoreDelta));
    }

    if args.save_defaults {
        let mut config = session.config().clone();
        remember_view(&mut config, &args);
        config.save();
    }

    let header = session.header();
    println!("{} | {}", header.classification, header.ridges_badge());
    println!("Zoom: {}", session.view().zoom_label());
    for entry in session.legend() {
        println!("{entry}");
    }
    if let Some(panel) = session.quality_panel() {
        println!("{panel}");
    }

    let snapshot = if args.inspect {
        session.update(InspectMsg::Open);
        let surface = session
            .inspection()
            .context("inspection view could not be opened")?;
        if !surface.is_composited() {
            anyhow::bail!("image failed to load, nothing to export");
        }
        println!("{}", session.header().inspection_title());
        Snapshot::capture(surface, now_millis())?
    } else {
        export_primary(&mut session)?
    };

    let path = match &args.out {
        Some(dir) => snapshot.save_in(dir)?,
        None => snapshot.save(session.config().save_location)?,
    };
    println!("Saved {}", path.display());
    Ok(())
}

/// Export the primary surface once every load has settled
fn export_primary(session: &mut Session) -> anyhow::Result<Snapshot> {
    // A deferred export could never complete at this point
    if !session.primary().is_composited() {
        anyhow::bail!("image failed to load, nothing to export");
    }
    session.update(ExportMsg::request_now());
    match session.take_export_events().pop() {
        Some(ExportEvent::Completed { snapshot, .. }) => Ok(snapshot),
        Some(ExportEvent::Failed { reason, .. }) => anyhow::bail!("export failed: {reason}"),
        None => anyhow::bail!("export produced no result"),
    }
}

/// Store the view flags as the defaults for the next run
fn remember_view(config: &mut RendererConfig, args: &Args) {
    if args.original {
        config.preferred_variant = ImageVariant::Original;
    }
    config.show_minutiae = !args.hide_minutiae;
    config.show_core_delta = !args.hide_core_delta;
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    run(args).await
}
