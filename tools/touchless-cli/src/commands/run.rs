//! Drive the pointer from a live landmark stream.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use touchless_common::clock::SessionClock;
use touchless_common::config::AppConfig;
use touchless_control::ControlSession;
use touchless_gesture_core::{FaceGestureEngine, GestureSource, HandGestureEngine};
use touchless_landmark_source::{FrameWriter, JsonlSource, LandmarkSource};
use touchless_pointer_output::backends::{detect_best_backend, DryRunBackend};
use touchless_pointer_output::{PointerBackend, ScreenSize};

use crate::GestureMode;

pub async fn run(
    config: AppConfig,
    mode: GestureMode,
    input: PathBuf,
    record: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let backend: Box<dyn PointerBackend> = if dry_run {
        Box::new(DryRunBackend::new(ScreenSize::default()))
    } else {
        detect_best_backend(None)
    };

    let mut source = open_source(&input)?;
    let clock = SessionClock::start();

    eprintln!("Touchless running ({mode:?} mode, {} backend)", backend.name());
    eprintln!("  Input: {}", source.name());
    if let Some(path) = &record {
        eprintln!("  Recording: {}", path.display());
    }
    eprintln!("Press Ctrl+C to stop...");

    match mode {
        GestureMode::Hand => {
            let engine = HandGestureEngine::with_clock(&config.hand, clock.clone());
            drive(&config, engine, backend, clock, source.as_mut(), record.as_deref()).await
        }
        GestureMode::Face => {
            let engine = FaceGestureEngine::with_clock(&config.face, clock.clone());
            drive(&config, engine, backend, clock, source.as_mut(), record.as_deref()).await
        }
    }
}

fn open_source(input: &Path) -> anyhow::Result<Box<dyn LandmarkSource>> {
    if input == Path::new("-") {
        Ok(Box::new(JsonlSource::new(std::io::stdin().lock(), "stdin")))
    } else {
        Ok(Box::new(JsonlSource::open(input)?))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    Stop,
    Exit,
}

/// The first Ctrl+C asks the loop to stop; a second one while it is still
/// blocked on the stream exits.
fn interrupt(stop_flag: &AtomicBool) -> Interrupt {
    if stop_flag.swap(true, Ordering::SeqCst) {
        Interrupt::Exit
    } else {
        Interrupt::Stop
    }
}

async fn drive<G: GestureSource>(
    config: &AppConfig,
    engine: G,
    backend: Box<dyn PointerBackend>,
    clock: SessionClock,
    source: &mut dyn LandmarkSource,
    record: Option<&Path>,
) -> anyhow::Result<()> {
    let mut session = ControlSession::with_clock(config, engine, backend, clock)?;

    if let Some(path) = record {
        let header = FrameWriter::header(
            session.clock().epoch_wall(),
            config.camera.width,
            config.camera.height,
        );
        session.record_to(FrameWriter::create(path, &header)?);
    }

    let stop_flag = session.stop_flag();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            match interrupt(&stop_flag) {
                Interrupt::Stop => {
                    tracing::info!("Stop requested");
                    eprintln!("Stopping after the next frame; press Ctrl+C again to quit now");
                }
                Interrupt::Exit => {
                    tracing::warn!("Second interrupt, exiting without waiting for the stream");
                    std::process::exit(130);
                }
            }
        }
    });

    // The source blocks on reads; keep the runtime's other workers free.
    let summary = tokio::task::block_in_place(|| session.run(source))?;

    eprintln!();
    eprintln!(
        "Session ended: {} frames, {} actions, {} pointer errors",
        summary.frames, summary.actions, summary.pointer_errors
    );
    Ok(())
}
