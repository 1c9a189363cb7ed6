#![allow(dead_code)]

use ratexec::config::{PipelineConfig, RawPipelineConfig};

/// Builder for `PipelineConfig` to simplify test setup.
pub struct PipelineConfigBuilder {
    raw: RawPipelineConfig,
}

impl PipelineConfigBuilder {
    /// Start from a command template, e.g. `&["echo", "{}"]`.
    pub fn new(command: &[&str]) -> Self {
        Self {
            raw: RawPipelineConfig {
                command: command.iter().map(|s| s.to_string()).collect(),
                ..RawPipelineConfig::default()
            },
        }
    }

    pub fn rate(mut self, rate: u32) -> Self {
        self.raw.rate = rate;
        self
    }

    pub fn inflight(mut self, inflight: u32) -> Self {
        self.raw.inflight = inflight;
        self
    }

    pub fn raw(self) -> RawPipelineConfig {
        self.raw
    }

    pub fn build(self) -> PipelineConfig {
        PipelineConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

/// Newline-joined input with a trailing newline, as a byte buffer usable as
/// an `AsyncRead`.
pub fn input_lines<S: AsRef<str>>(lines: &[S]) -> std::io::Cursor<Vec<u8>> {
    let mut buf = String::new();
    for line in lines {
        buf.push_str(line.as_ref());
        buf.push('\n');
    }
    std::io::Cursor::new(buf.into_bytes())
}
