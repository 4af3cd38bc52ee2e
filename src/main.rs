//! Terminal heightfield viewer (default binary).
//!
//! Renders once, then redraws only when a key changes the scene or the
//! terminal is resized. `--dump-frame` skips the terminal entirely and prints
//! the frame payload as JSON.

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use heightview::config::Cli;
use heightview::core::{Camera, FramePipeline, Light, PipelineState};
use heightview::input::{describe_key, handle_key_event};
use heightview::loader::load_or_synthesize;
use heightview::term::{CanvasView, FrameBuffer, TerminalRenderer, Viewport};
use heightview::types::Command;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    init_tracing(&cli)?;

    let hf = load_or_synthesize(cli.heightmap.as_deref(), cli.synthetic_size)?;
    let mut pipeline = FramePipeline::initialize(
        &hf,
        cli.render_params(),
        Camera::default(),
        Light::default(),
        cli.policy(),
    );

    for name in &cli.script {
        pipeline.apply_named(name)?;
    }
    if pipeline.state() == PipelineState::Quit {
        info!("script quit before the first frame");
        return Ok(());
    }
    if pipeline.frame().is_none() {
        pipeline.render()?;
    }

    if cli.dump_frame {
        return dump_frame(&pipeline);
    }

    let mut term = TerminalRenderer::new();
    term.enter("heightview")?;

    let result = run(&mut pipeline, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("heightview=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if cli.dump_frame {
        builder.with_writer(io::stderr).init();
    } else {
        // The viewer owns the terminal; without a log file there is nowhere to write.
        builder.with_writer(io::sink).init();
    }
    Ok(())
}

fn dump_frame(pipeline: &FramePipeline) -> Result<()> {
    let Some(frame) = pipeline.frame() else {
        return Ok(());
    };
    let mut out = io::stdout().lock();
    serde_json::to_writer(&mut out, frame)?;
    writeln!(out)?;
    Ok(())
}

fn run(pipeline: &mut FramePipeline, term: &mut TerminalRenderer) -> Result<()> {
    let view = CanvasView::default();
    let mut fb = FrameBuffer::new(0, 0);

    present(pipeline, &view, &mut fb, term)?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match handle_key_event(key) {
                Some(Command::Quit) => {
                    pipeline.apply_command(Command::Quit)?;
                    return Ok(());
                }
                Some(command) => {
                    pipeline.apply_command(command)?;
                    present(pipeline, &view, &mut fb, term)?;
                }
                None => {
                    if let Err(err) = pipeline.unsupported(&describe_key(key)) {
                        warn!(%err, "unmapped key");
                    }
                }
            },
            Event::Resize(..) => {
                term.invalidate();
                present(pipeline, &view, &mut fb, term)?;
            }
            _ => {}
        }
    }
}

/// Rasterize the current frame for the current terminal size and flush it.
fn present(
    pipeline: &FramePipeline,
    view: &CanvasView,
    fb: &mut FrameBuffer,
    term: &mut TerminalRenderer,
) -> Result<()> {
    let Some(frame) = pipeline.frame() else {
        return Ok(());
    };
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    view.render_into(frame, &status_line(pipeline), Viewport::new(w, h), fb);
    term.present(fb)
}

fn status_line(pipeline: &FramePipeline) -> String {
    let scene = pipeline.scene();
    format!(
        " {} | zoom {:.0} | dist {:.2} | renders {} | arrows orbit  +/- zoom  [/] light  q quit",
        scene.params().mode.as_str(),
        scene.zoom(),
        scene.camera().distance(),
        pipeline.render_count(),
    )
}
