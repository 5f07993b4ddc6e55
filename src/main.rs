//! Headless entry point.
//!
//! Ingests the files given on the command line, lays them out end to end on
//! one video and one audio track, plays a few ticks and prints the timeline.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use cutroom::core::time::format_time;
use cutroom::core::TrackId;
use cutroom::media::kind::{mime_for_extension, MediaKind};
use cutroom::timeline::{ClipSource, TrackKind};
use cutroom::{EditorConfig, EditorSession};

const DEMO_TICKS: usize = 10;

/// Headless cutroom session over local media files
#[derive(Parser, Debug)]
#[command(name = "cutroom")]
#[command(about = "Lay media files out on a timeline and play a few ticks", long_about = None)]
struct Cli {
    /// Editor config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Media files to ingest, in timeline order
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    let mut session = EditorSession::new(config);
    let video_track = session.add_track(TrackKind::Video);
    let audio_track = session.add_track(TrackKind::Audio);

    for path in &cli.files {
        if let Err(e) = ingest(&runtime, &mut session, path, video_track, audio_track) {
            eprintln!("{}: {:#}", path.display(), e);
        }
    }

    session.toggle_playback();
    let mut applied = 0;
    while applied < DEMO_TICKS {
        match session.wait_ticks() {
            0 => break,
            due => applied += due,
        }
    }
    session.toggle_playback();
    session.pump();

    print_summary(&session);
    Ok(())
}

fn ingest(
    runtime: &tokio::runtime::Runtime,
    session: &mut EditorSession,
    path: &Path,
    video_track: TrackId,
    audio_track: TrackId,
) -> Result<()> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let Some(mime) = mime_for_extension(extension) else {
        bail!("unknown file extension {:?}", extension);
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = std::fs::read(path).context("Failed to read file")?;
    let entry = runtime.block_on(session.upload(bytes, mime, &name))?;
    println!("Added {} ({}, {})", entry.title, entry.kind, entry.size_label());

    let track = match entry.kind {
        MediaKind::Audio => audio_track,
        MediaKind::Video | MediaKind::Image => video_track,
    };
    let source = ClipSource::from_entry(&entry, &session.config().clip_defaults);
    let start = session
        .timeline()
        .track(track)
        .map(|t| t.duration())
        .unwrap_or_default();
    session.timeline_mut().place_clip(track, &source, Some(start))?;
    Ok(())
}

fn print_summary(session: &EditorSession) {
    let timeline = session.timeline();
    println!();
    for track in timeline.tracks() {
        println!("{} ({} clips)", track.name, track.clips.len());
        for clip in &track.clips {
            println!(
                "  {:<32} {} - {}",
                clip.name,
                format_time(clip.start),
                format_time(clip.end())
            );
        }
    }
    println!(
        "Duration {}, playhead {}, {} media in pool ({} bytes live)",
        format_time(timeline.duration()),
        format_time(timeline.playhead),
        session.registry().len(),
        session.registry().store().live_bytes()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_config_and_files() {
        let cli = Cli::try_parse_from(["cutroom", "--config", "edit.toml", "a.mp4", "b.wav"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("edit.toml")));
        assert_eq!(cli.files, vec![PathBuf::from("a.mp4"), PathBuf::from("b.wav")]);
    }

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["cutroom"]).is_err());
        assert!(Cli::try_parse_from(["cutroom", "--config", "edit.toml"]).is_err());
        assert!(Cli::try_parse_from(["cutroom", "a.mp4", "--config"]).is_err());
    }
}
