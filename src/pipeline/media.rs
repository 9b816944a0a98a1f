//! Audio and video summarizers
//!
//! Audio: transcript via the injected [`Transcriber`], duration via
//! [`MediaTools`]. Video: the audio track is extracted into a temporary WAV
//! (never under the upload root, removed automatically) and delegated to the
//! audio summarizer; the full audio summary — including its error case — is
//! nested under `audio_analysis`.

use super::classify::Kind;
use super::summary::{AudioSummary, Summary, SummaryOutcome, VideoSummary};
use crate::services::{MediaTools, Transcriber};
use std::path::Path;

/// Characters of transcript kept in the preview.
const TRANSCRIPT_PREVIEW_CHARS: usize = 4000;

pub fn summarize_audio(
    path: &Path,
    transcriber: &dyn Transcriber,
    media: &dyn MediaTools,
) -> Result<AudioSummary, String> {
    let transcript = transcriber
        .transcribe(path)
        .map_err(|e| format!("Transcription failed: {}", e))?;

    let duration_sec = media.probe_duration(path);
    let transcript_preview: String = transcript
        .text
        .chars()
        .take(TRANSCRIPT_PREVIEW_CHARS)
        .collect();

    Ok(AudioSummary {
        duration_sec,
        transcript_preview,
    })
}

pub fn summarize_video(
    path: &Path,
    transcriber: &dyn Transcriber,
    media: &dyn MediaTools,
) -> Result<VideoSummary, String> {
    let wav = tempfile::Builder::new()
        .prefix("dossier_audio_")
        .suffix(".wav")
        .tempfile()
        .map_err(|e| format!("Failed to create temp file: {}", e))?;

    media
        .extract_audio(path, wav.path())
        .map_err(|e| format!("Failed to extract audio from video: {}", e))?;

    // The nested audio summary keeps its own error case as data.
    let audio_analysis = match summarize_audio(wav.path(), transcriber, media) {
        Ok(audio) => Summary {
            kind: Kind::Audio,
            outcome: SummaryOutcome::Audio(audio),
        },
        Err(e) => Summary::failed(Kind::Audio, e),
    };

    Ok(VideoSummary {
        duration_sec: media.probe_duration(path),
        audio_analysis: Box::new(audio_analysis),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Transcript;
    use std::path::PathBuf;

    struct StubTranscriber(Result<String, String>);

    impl Transcriber for StubTranscriber {
        fn transcribe(&self, _path: &Path) -> Result<Transcript, String> {
            self.0.clone().map(|text| Transcript { text })
        }
    }

    struct StubMedia {
        extract_ok: bool,
        duration: Option<f64>,
    }

    impl MediaTools for StubMedia {
        fn extract_audio(&self, _input: &Path, output: &Path) -> Result<(), String> {
            if self.extract_ok {
                std::fs::write(output, b"RIFF").map_err(|e| e.to_string())
            } else {
                Err("ffmpeg not installed".to_string())
            }
        }

        fn probe_duration(&self, _path: &Path) -> Option<f64> {
            self.duration
        }
    }

    #[test]
    fn test_audio_summary() {
        let transcriber = StubTranscriber(Ok("hello from the call".to_string()));
        let media = StubMedia {
            extract_ok: true,
            duration: Some(31.5),
        };

        let summary = summarize_audio(&PathBuf::from("call.mp3"), &transcriber, &media).unwrap();
        assert_eq!(summary.duration_sec, Some(31.5));
        assert_eq!(summary.transcript_preview, "hello from the call");
    }

    #[test]
    fn test_audio_transcription_failure_is_an_error() {
        let transcriber = StubTranscriber(Err("whisper-cli not installed".to_string()));
        let media = StubMedia {
            extract_ok: true,
            duration: None,
        };

        let err = summarize_audio(&PathBuf::from("x.wav"), &transcriber, &media).unwrap_err();
        assert!(err.contains("whisper-cli"));
    }

    #[test]
    fn test_transcript_preview_is_bounded() {
        let transcriber = StubTranscriber(Ok("y".repeat(9000)));
        let media = StubMedia {
            extract_ok: true,
            duration: None,
        };

        let summary = summarize_audio(&PathBuf::from("x.m4a"), &transcriber, &media).unwrap();
        assert_eq!(
            summary.transcript_preview.chars().count(),
            TRANSCRIPT_PREVIEW_CHARS
        );
    }

    #[test]
    fn test_video_nests_audio_summary() {
        let transcriber = StubTranscriber(Ok("movie dialogue".to_string()));
        let media = StubMedia {
            extract_ok: true,
            duration: Some(120.0),
        };

        let summary = summarize_video(&PathBuf::from("clip.mp4"), &transcriber, &media).unwrap();
        assert_eq!(summary.duration_sec, Some(120.0));
        assert_eq!(summary.audio_analysis.kind, Kind::Audio);
        assert!(!summary.audio_analysis.is_error());
    }

    #[test]
    fn test_video_extraction_failure_is_an_error() {
        let transcriber = StubTranscriber(Ok(String::new()));
        let media = StubMedia {
            extract_ok: false,
            duration: None,
        };

        let err = summarize_video(&PathBuf::from("clip.mkv"), &transcriber, &media).unwrap_err();
        assert!(err.contains("extract audio"));
    }

    #[test]
    fn test_video_keeps_failed_audio_analysis_as_data() {
        let transcriber = StubTranscriber(Err("model load failed".to_string()));
        let media = StubMedia {
            extract_ok: true,
            duration: Some(5.0),
        };

        let summary = summarize_video(&PathBuf::from("clip.mov"), &transcriber, &media).unwrap();
        assert!(summary.audio_analysis.is_error());
        assert!(summary
            .audio_analysis
            .error()
            .unwrap()
            .contains("model load failed"));
    }
}
