//! Frame-sequence encoding.
//!
//! Frames are piped as PNGs into an ffmpeg child process (h264, yuv420p,
//! the settings every clip in this repo ships with). When ffmpeg is not on
//! PATH the sink falls back to an animated GIF written with the image
//! crate, and says so on stderr.

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use anyhow::{bail, Context, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat, RgbaImage};

enum SinkKind {
    Ffmpeg {
        child: Child,
        stderr: Option<std::thread::JoinHandle<String>>,
    },
    Gif(GifEncoder<std::io::BufWriter<std::fs::File>>),
}

/// Accepts frames one at a time and writes `<stem>.mp4` (or `<stem>.gif`).
pub struct VideoSink {
    kind: SinkKind,
    path: PathBuf,
    fps: u32,
    frames: usize,
}

impl VideoSink {
    /// Open a sink for `stem` under `output_dir`. Tries ffmpeg first; a
    /// spawn failure (binary missing) switches to the GIF fallback.
    pub fn create(output_dir: &Path, stem: &str, fps: u32) -> Result<Self> {
        let mp4_path = output_dir.join(format!("{stem}.mp4"));

        let spawned = Command::new("ffmpeg")
            .args([
                "-y",
                "-f",
                "image2pipe",
                "-vcodec",
                "png",
                "-r",
                &fps.to_string(),
                "-i",
                "-",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
            ])
            .arg(&mp4_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn();

        match spawned {
            Ok(mut child) => {
                // Drain stderr as it arrives; ffmpeg chatters enough on a
                // long encode to fill the pipe and stall the frame loop.
                let stderr = child.stderr.take().map(|mut pipe| {
                    std::thread::spawn(move || {
                        let mut log = String::new();
                        let _ = pipe.read_to_string(&mut log);
                        log
                    })
                });
                Ok(Self {
                    kind: SinkKind::Ffmpeg { child, stderr },
                    path: mp4_path,
                    fps,
                    frames: 0,
                })
            }
            Err(err) => {
                eprintln!("ffmpeg not available ({err}); saving as GIF instead");
                let gif_path = output_dir.join(format!("{stem}.gif"));
                let file = std::fs::File::create(&gif_path)
                    .with_context(|| format!("failed to create {}", gif_path.display()))?;
                let mut encoder = GifEncoder::new_with_speed(std::io::BufWriter::new(file), 10);
                encoder.set_repeat(Repeat::Infinite)?;
                Ok(Self {
                    kind: SinkKind::Gif(encoder),
                    path: gif_path,
                    fps,
                    frames: 0,
                })
            }
        }
    }

    pub fn add_frame(&mut self, frame: &RgbaImage) -> Result<()> {
        match &mut self.kind {
            SinkKind::Ffmpeg { child, .. } => {
                let mut png = Vec::new();
                frame
                    .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
                    .context("failed to encode frame as PNG")?;
                child
                    .stdin
                    .as_mut()
                    .context("ffmpeg stdin closed")?
                    .write_all(&png)
                    .context("failed to pipe frame to ffmpeg")?;
            }
            SinkKind::Gif(encoder) => {
                let delay = Delay::from_numer_denom_ms(1000, self.fps);
                encoder.encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))?;
            }
        }
        self.frames += 1;
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Close the encoder and return the path that was written.
    pub fn finish(self) -> Result<PathBuf> {
        match self.kind {
            SinkKind::Ffmpeg { mut child, stderr } => {
                drop(child.stdin.take());
                let status = child.wait().context("ffmpeg did not exit")?;
                let log = stderr.and_then(|h| h.join().ok()).unwrap_or_default();
                if !status.success() {
                    bail!("ffmpeg encoding failed: {}", log.trim());
                }
            }
            SinkKind::Gif(encoder) => drop(encoder),
        }
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_sink_writes_a_file() {
        let dir = std::env::temp_dir().join("sim_video_sink_test");
        std::fs::create_dir_all(&dir).unwrap();

        let mut sink = VideoSink::create(&dir, "sink_smoke", 30).unwrap();
        let frame = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255]));
        for _ in 0..5 {
            sink.add_frame(&frame).unwrap();
        }
        assert_eq!(sink.frame_count(), 5);

        let path = sink.finish().unwrap();
        assert!(path.exists(), "no output at {}", path.display());
        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len > 0, "output file is empty");

        let _ = std::fs::remove_file(path);
    }
}
