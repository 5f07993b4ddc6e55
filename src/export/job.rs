//! Simulated export job.
//!
//! Nothing is rendered or encoded. The job walks progress from 0 to 100 in
//! steps of 10, publishing each value on a watch channel, then logs the
//! settings it would have used.

use std::time::Duration;
use tokio::sync::watch;

use crate::core::error::Result;
use crate::export::settings::ExportSettings;

/// Delay before each progress step
pub const DEFAULT_STEP: Duration = Duration::from_millis(200);
const PROGRESS_STEP: usize = 10;

pub struct ExportJob {
    settings: ExportSettings,
    step: Duration,
    progress: watch::Sender<u8>,
}

impl ExportJob {
    /// Create a job for validated settings
    pub fn new(settings: ExportSettings) -> Result<Self> {
        settings.validate()?;
        let (progress, _) = watch::channel(0);
        Ok(Self {
            settings,
            step: DEFAULT_STEP,
            progress,
        })
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Receiver observing progress percentages
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Run to completion and hand back the settings used
    pub async fn run(self) -> ExportSettings {
        log::info!("Export of {} started", self.settings.output_name());

        for percent in (0..=100u8).step_by(PROGRESS_STEP) {
            tokio::time::sleep(self.step).await;
            self.progress.send_replace(percent);
            log::debug!("Export progress {}%", percent);
        }

        match serde_json::to_string(&self.settings) {
            Ok(json) => log::info!("Exporting video with settings: {}", json),
            Err(_) => log::info!("Exporting video with settings: {:?}", self.settings),
        }
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EditorError;
    use crate::export::settings::Format;

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = ExportSettings {
            quality: 5,
            ..Default::default()
        };
        assert!(matches!(
            ExportJob::new(settings),
            Err(EditorError::InvalidExportSettings(_))
        ));
    }

    #[tokio::test]
    async fn test_progress_sequence() {
        let job = ExportJob::new(ExportSettings::default())
            .unwrap()
            .with_step(Duration::from_millis(1));
        let mut rx = job.subscribe();

        let handle = tokio::spawn(job.run());

        let mut seen = vec![*rx.borrow()];
        while rx.changed().await.is_ok() {
            seen.push(*rx.borrow_and_update());
        }
        let settings = handle.await.unwrap();

        assert_eq!(settings, ExportSettings::default());
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen.iter().all(|p| p % 10 == 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_eleven_steps() {
        let settings = ExportSettings {
            format: Format::Avi,
            ..Default::default()
        };
        let job = ExportJob::new(settings).unwrap();
        let rx = job.subscribe();

        let start = tokio::time::Instant::now();
        let used = job.run().await;

        assert!(start.elapsed() >= DEFAULT_STEP * 11);
        assert_eq!(*rx.borrow(), 100);
        assert_eq!(used.output_name(), "my-video.avi");
    }
}
