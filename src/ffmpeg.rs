use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::MediaError;
use crate::media::{MediaNotice, MediaPlayer};

const FRAME_QUEUE: usize = 4; // Decoded frames buffered ahead of playback

/// What `FfmpegPlayer::advance` produced this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Idle,    // Paused or nothing loaded
    Pending, // Playing, next frame not due or not decoded yet
    Ready,   // First frame after (re)start is in `frame()`
    Frame,   // A new frame is in `frame()`
    Ended,
    Failed,
}

impl FrameStatus {
    /// The controller-facing notice for this status, if any.
    pub fn notice(self) -> Option<MediaNotice> {
        match self {
            FrameStatus::Ready => Some(MediaNotice::Ready),
            FrameStatus::Ended => Some(MediaNotice::Ended),
            FrameStatus::Failed => Some(MediaNotice::Failed(
                "decoder produced no frames".to_string(),
            )),
            _ => None,
        }
    }
}

// The reader thread sends frames until the pipe closes, then one error.
type Decoded = std::io::Result<Vec<u8>>;

struct Decoder {
    process: Child,
    frames: Receiver<Decoded>,
    reader: JoinHandle<()>,
    frames_read: u64,
}

fn read_frames(mut stdout: BufReader<ChildStdout>, frame_len: usize, tx: SyncSender<Decoded>) {
    loop {
        let mut frame = vec![0; frame_len];
        let result = stdout.read_exact(&mut frame).map(|()| frame);
        let done = result.is_err();
        if tx.send(result).is_err() || done {
            return;
        }
    }
}

/// Decodes a video into fixed-size RGBA frames by piping it through an
/// `ffmpeg` child process.
pub struct FfmpegPlayer {
    binary: String,
    width: i32,
    height: i32,
    fps: u32,
    source: Option<PathBuf>,
    decoder: Option<Decoder>,
    playing: bool,
    clock: f32,
    frame: Vec<u8>,
}

impl FfmpegPlayer {
    pub fn new(width: i32, height: i32, fps: u32) -> FfmpegPlayer {
        FfmpegPlayer {
            binary: "ffmpeg".to_string(),
            width,
            height,
            fps,
            source: None,
            decoder: None,
            playing: false,
            clock: 0.0,
            frame: vec![0; (width.max(0) * height.max(0) * 4) as usize], // 4 bytes per pixel (RGBA)
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> FfmpegPlayer {
        self.binary = binary.into();
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The most recently decoded frame, top row first.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Take the frames due within `dt` seconds of playback. Never blocks:
    /// frames the decoder has not produced yet leave the status `Pending`.
    pub fn advance(&mut self, dt: f32) -> FrameStatus {
        if !self.playing {
            return FrameStatus::Idle;
        }
        let Some(decoder) = self.decoder.as_mut() else {
            return FrameStatus::Idle;
        };

        let frame_time = 1.0 / self.fps.max(1) as f32;
        self.clock += dt.max(0.0);
        if self.clock < frame_time {
            return FrameStatus::Pending;
        }

        // Never fall more than one frame behind; drop the rest of the backlog.
        let mut due = 1;
        if self.clock >= 2.0 * frame_time {
            due = 2;
        }
        self.clock = (self.clock - due as f32 * frame_time).clamp(0.0, frame_time);

        let mut status = FrameStatus::Pending;
        for _ in 0..due {
            let error = match decoder.frames.try_recv() {
                Ok(Ok(frame)) => {
                    self.frame = frame;
                    decoder.frames_read += 1;
                    if decoder.frames_read == 1 {
                        status = FrameStatus::Ready;
                    } else if status != FrameStatus::Ready {
                        status = FrameStatus::Frame;
                    }
                    continue;
                }
                Err(TryRecvError::Empty) => {
                    // Still due; pick it up on the next call.
                    self.clock = frame_time;
                    break;
                }
                Ok(Err(e)) => Some(e),
                Err(TryRecvError::Disconnected) => None,
            };

            if let Some(e) = error.filter(|e| e.kind() != ErrorKind::UnexpectedEof) {
                warn!(error = %e, "failed reading decoded frame");
            }
            let decoded_any = decoder.frames_read > 0;
            self.stop();
            return if decoded_any {
                FrameStatus::Ended
            } else {
                FrameStatus::Failed
            };
        }
        status
    }

    fn spawn(&self, source: &Path) -> Result<Decoder, MediaError> {
        let mut process = Command::new(&self.binary)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(source)
            .args(["-an"])
            .args(["-vf", &format!("scale={}:{}", self.width, self.height)])
            .args(["-r", &format!("{}", self.fps)])
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .arg("-")
            .spawn()
            .map_err(|source| MediaError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        let Some(stdout) = process.stdout.take() else {
            reap(&mut process);
            return Err(MediaError::Io(std::io::Error::other(
                "ffmpeg stdout was not captured",
            )));
        };

        let (tx, frames) = mpsc::sync_channel(FRAME_QUEUE);
        let frame_len = self.frame.len();
        let reader = thread::Builder::new()
            .name("ffmpeg-reader".to_string())
            .spawn(move || read_frames(BufReader::new(stdout), frame_len, tx));
        let reader = match reader {
            Ok(reader) => reader,
            Err(e) => {
                reap(&mut process);
                return Err(MediaError::Io(e));
            }
        };

        debug!(source = %source.display(), "spawned decoder");
        Ok(Decoder {
            process,
            frames,
            reader,
            frames_read: 0,
        })
    }

    fn stop(&mut self) {
        if let Some(decoder) = self.decoder.take() {
            let Decoder {
                mut process,
                frames,
                reader,
                ..
            } = decoder;
            // Kill first so a blocked read sees EOF, drop the receiver so a
            // blocked send fails, then the reader can be joined.
            let _ = process.kill();
            drop(frames);
            if reader.join().is_err() {
                warn!("decoder reader thread panicked");
            }
            if let Err(e) = process.wait() {
                warn!(error = %e, "failed to wait for decoder process");
            }
        }
        self.playing = false;
        self.clock = 0.0;
    }
}

// Killing an already exited process is fine; only reaping matters.
fn reap(process: &mut Child) {
    let _ = process.kill();
    if let Err(e) = process.wait() {
        warn!(error = %e, "failed to wait for decoder process");
    }
}

impl MediaPlayer for FfmpegPlayer {
    fn load(&mut self, source: &Path) -> Result<(), MediaError> {
        if self.source.as_deref() == Some(source) {
            return Ok(());
        }
        self.stop();
        self.source = Some(source.to_path_buf());
        Ok(())
    }

    // The next play() spawns a fresh decoder from the first frame.
    fn rewind(&mut self) {
        self.stop();
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let source = self.source.clone().ok_or(MediaError::NoSource)?;
        if self.decoder.is_none() {
            self.decoder = Some(self.spawn(&source)?);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        // The decoder stays alive; its frame queue simply fills up.
        self.playing = false;
    }
}

impl Drop for FfmpegPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    const MISSING_BINARY: &str = "ffmpeg-binary-that-does-not-exist";
    const FRAME_BYTES: usize = 4 * 4 * 4;

    /// A stand-in decoder: a shell script that ignores ffmpeg's arguments.
    #[cfg(unix)]
    fn fake_decoder(dir: &TempDir, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    fn playing(binary: String) -> FfmpegPlayer {
        // 4x4 at 10 fps: 64-byte frames every 0.1 s.
        let mut player = FfmpegPlayer::new(4, 4, 10).with_binary(binary);
        player.load(Path::new("hero.mp4")).unwrap();
        player.play().unwrap();
        player
    }

    #[cfg(unix)]
    /// Advance by `dt`, then keep polling while the decoder catches up.
    fn next_status(player: &mut FfmpegPlayer, dt: f32) -> FrameStatus {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut status = player.advance(dt);
        while status == FrameStatus::Pending && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            status = player.advance(0.0);
        }
        status
    }

    #[cfg(unix)]
    #[test]
    fn decodes_every_frame_then_ends() {
        let dir = TempDir::new().unwrap();
        let mut player = playing(fake_decoder(&dir, &format!("head -c {} /dev/zero", 4 * FRAME_BYTES)));

        let statuses: Vec<FrameStatus> = (0..5).map(|_| next_status(&mut player, 0.1)).collect();
        assert_eq!(
            statuses,
            vec![
                FrameStatus::Ready,
                FrameStatus::Frame,
                FrameStatus::Frame,
                FrameStatus::Frame,
                FrameStatus::Ended,
            ]
        );
        assert_eq!(player.frame().len(), FRAME_BYTES);
        assert!(!player.is_playing());
        assert_eq!(player.advance(0.1), FrameStatus::Idle);
    }

    #[cfg(unix)]
    #[test]
    fn eof_before_a_whole_frame_fails() {
        let dir = TempDir::new().unwrap();
        let mut player = playing(fake_decoder(&dir, "head -c 10 /dev/zero"));

        let status = next_status(&mut player, 0.1);
        assert_eq!(status, FrameStatus::Failed);
        assert!(matches!(status.notice(), Some(MediaNotice::Failed(_))));
        assert!(!player.is_playing());
    }

    #[cfg(unix)]
    #[test]
    fn frames_wait_until_due() {
        let dir = TempDir::new().unwrap();
        let mut player = playing(fake_decoder(&dir, &format!("head -c {} /dev/zero", 3 * FRAME_BYTES)));

        assert_eq!(next_status(&mut player, 0.1), FrameStatus::Ready);
        assert_eq!(player.advance(0.04), FrameStatus::Pending);
        assert_eq!(next_status(&mut player, 0.1), FrameStatus::Frame);
    }

    #[cfg(unix)]
    #[test]
    fn long_tick_takes_at_most_two_frames() {
        let dir = TempDir::new().unwrap();
        let mut player = playing(fake_decoder(&dir, &format!("head -c {} /dev/zero", 6 * FRAME_BYTES)));
        assert_eq!(next_status(&mut player, 0.1), FrameStatus::Ready);
        // Let the reader queue up the rest.
        std::thread::sleep(Duration::from_millis(100));

        let mut frame_ticks = 0;
        loop {
            match next_status(&mut player, 10.0) {
                FrameStatus::Frame => frame_ticks += 1,
                FrameStatus::Ended => break,
                other => panic!("unexpected {other:?}"),
            }
        }
        // Five frames left, two per tick at most.
        assert!(frame_ticks >= 3, "took {frame_ticks} ticks");
    }

    #[cfg(unix)]
    #[test]
    fn rewind_restarts_from_the_first_frame() {
        let dir = TempDir::new().unwrap();
        let mut player = playing(fake_decoder(&dir, &format!("head -c {} /dev/zero", 4 * FRAME_BYTES)));
        assert_eq!(next_status(&mut player, 0.1), FrameStatus::Ready);
        assert_eq!(next_status(&mut player, 0.1), FrameStatus::Frame);

        player.rewind();
        assert!(!player.is_playing());
        player.play().unwrap();
        assert_eq!(next_status(&mut player, 0.1), FrameStatus::Ready);
    }

    #[cfg(unix)]
    #[test]
    fn stalled_decoder_never_blocks_the_caller() {
        let dir = TempDir::new().unwrap();
        let mut player = playing(fake_decoder(&dir, "exec sleep 5"));

        let started = Instant::now();
        assert_eq!(player.advance(0.1), FrameStatus::Pending);
        assert_eq!(player.advance(0.1), FrameStatus::Pending);
        drop(player);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn play_without_source_is_no_source() {
        let mut player = FfmpegPlayer::new(4, 4, 30);
        assert!(matches!(player.play(), Err(MediaError::NoSource)));
        assert!(!player.is_playing());
    }

    #[test]
    fn spawn_failure_is_reported_not_panicked() {
        let mut player = FfmpegPlayer::new(4, 4, 30).with_binary(MISSING_BINARY);
        player.load(Path::new("hero.mp4")).unwrap();
        let err = player.play().unwrap_err();
        assert!(matches!(err, MediaError::Spawn { .. }));
        assert!(err.to_string().contains(MISSING_BINARY));
        assert!(!player.is_playing());
        assert_eq!(player.advance(1.0), FrameStatus::Idle);
    }

    #[test]
    fn load_records_source_and_frame_buffer_is_sized() {
        let mut player = FfmpegPlayer::new(8, 2, 30);
        player.load(Path::new("a.mp4")).unwrap();
        assert_eq!(player.source(), Some(Path::new("a.mp4")));
        assert_eq!(player.frame().len(), 8 * 2 * 4);
    }

    #[test]
    fn paused_player_is_idle() {
        let mut player = FfmpegPlayer::new(4, 4, 30);
        player.pause();
        assert_eq!(player.advance(0.5), FrameStatus::Idle);
    }

    #[test]
    fn statuses_map_to_notices() {
        assert_eq!(FrameStatus::Ready.notice(), Some(MediaNotice::Ready));
        assert_eq!(FrameStatus::Ended.notice(), Some(MediaNotice::Ended));
        assert!(matches!(FrameStatus::Failed.notice(), Some(MediaNotice::Failed(_))));
        assert_eq!(FrameStatus::Frame.notice(), None);
    }
}
