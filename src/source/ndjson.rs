//! Newline-delimited JSON landmark stream
//!
//! One JSON value per line, one line per camera frame:
//!
//! ```text
//! {"landmarks":[{"id":8,"x":320,"y":240},{"id":12,"x":330,"y":200}],"fingers":[0,1,0,0,0]}
//! {"landmarks":[[8,320,240],[12,330,200]],"fingers":[false,true,true,false,false]}
//! {"hand":null}
//! null
//! ```
//!
//! Landmarks may be objects or `[id, x, y]` triples; finger flags may be
//! booleans or 0/1. A line without landmarks or fingers means no hand. A line
//! that is not a frame (not JSON, wrong shape, invalid UTF-8) is logged and
//! reported as [`Observation::Malformed`]; only read errors end the stream.

use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

use super::{LandmarkSource, Observation, Result};
use crate::gesture::{FingerState, HandFrame, Landmark};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireLandmark {
    Object(Landmark),
    Triple(usize, f64, f64),
}

impl From<WireLandmark> for Landmark {
    fn from(wire: WireLandmark) -> Self {
        match wire {
            WireLandmark::Object(lm) => lm,
            WireLandmark::Triple(id, x, y) => Landmark::new(id, x, y),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireFlag {
    Bool(bool),
    Int(u8),
}

impl WireFlag {
    fn is_up(&self) -> bool {
        match self {
            WireFlag::Bool(b) => *b,
            WireFlag::Int(n) => *n != 0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireFrame {
    #[serde(default)]
    landmarks: Vec<WireLandmark>,
    #[serde(default)]
    fingers: Option<[WireFlag; 5]>,
}

impl WireFrame {
    fn into_observation(self) -> Observation {
        match self.fingers {
            Some(flags) if !self.landmarks.is_empty() => {
                let fingers = FingerState::new([
                    flags[0].is_up(),
                    flags[1].is_up(),
                    flags[2].is_up(),
                    flags[3].is_up(),
                    flags[4].is_up(),
                ]);
                let landmarks = self.landmarks.into_iter().map(Landmark::from);
                Observation::Hand(HandFrame::from_landmarks(landmarks, fingers))
            }
            _ => Observation::NoHand,
        }
    }
}

/// Parse one line of the stream
fn parse_line(line: &str, line_no: usize) -> Observation {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Observation::NoHand;
    }

    match serde_json::from_str::<Option<WireFrame>>(trimmed) {
        Ok(frame) => frame.unwrap_or_default().into_observation(),
        Err(e) => {
            warn!("Line {}: unreadable frame ({}), skipping", line_no, e);
            Observation::Malformed
        }
    }
}

/// Landmark source over a buffered NDJSON reader
pub struct NdjsonSource<R> {
    reader: R,
    line_no: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> NdjsonSource<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: Vec::new(),
        }
    }

    /// Lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> LandmarkSource for NdjsonSource<R> {
    fn next_frame(&mut self) -> Result<Option<Observation>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            debug!("Landmark stream ended after {} lines", self.line_no);
            return Ok(None);
        }

        self.line_no += 1;
        // Invalid UTF-8 becomes U+FFFD and fails to parse as a frame
        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(parse_line(&line, self.line_no)))
    }
}

/// Open an NDJSON source; `-` reads standard input
pub fn open_source(path: &str) -> io::Result<Box<dyn LandmarkSource + Send>> {
    if path == "-" {
        info!("Reading landmarks from stdin");
        Ok(Box::new(NdjsonSource::new(BufReader::new(io::stdin()))))
    } else {
        let file = File::open(Path::new(path))?;
        info!("Reading landmarks from {}", path);
        Ok(Box::new(NdjsonSource::new(BufReader::new(file))))
    }
}
