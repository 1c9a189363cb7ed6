// src/config/validate.rs

use crate::config::{MAX_INFLIGHT, MAX_RATE, PipelineConfig, RawPipelineConfig};
use crate::errors::{RatexecError, Result};
use crate::exec::CommandTemplate;

impl TryFrom<RawPipelineConfig> for PipelineConfig {
    type Error = RatexecError;

    fn try_from(raw: RawPipelineConfig) -> std::result::Result<Self, Self::Error> {
        validate_rate(raw.rate)?;
        validate_inflight(raw.inflight)?;
        let template = build_template(raw.command)?;
        Ok(PipelineConfig::new_unchecked(
            raw.rate,
            raw.inflight as usize,
            template,
        ))
    }
}

fn validate_rate(rate: u32) -> Result<()> {
    if rate == 0 {
        return Err(RatexecError::ConfigError(
            "--rate must be >= 1 (got 0)".to_string(),
        ));
    }
    if rate > MAX_RATE {
        return Err(RatexecError::ConfigError(format!(
            "--rate must be <= {MAX_RATE} (got {rate})"
        )));
    }
    Ok(())
}

fn validate_inflight(inflight: u32) -> Result<()> {
    if inflight == 0 {
        return Err(RatexecError::ConfigError(
            "--inflight must be >= 1 (got 0)".to_string(),
        ));
    }
    if inflight > MAX_INFLIGHT {
        return Err(RatexecError::ConfigError(format!(
            "--inflight must be <= {MAX_INFLIGHT} (got {inflight})"
        )));
    }
    Ok(())
}

fn build_template(command: Vec<String>) -> Result<CommandTemplate> {
    let mut tokens = command.into_iter();

    let program = match tokens.next() {
        Some(program) => program,
        None => {
            return Err(RatexecError::ConfigError(
                "a command to run is required".to_string(),
            ));
        }
    };

    if program.trim().is_empty() {
        return Err(RatexecError::ConfigError(
            "the command's executable name must not be empty".to_string(),
        ));
    }

    Ok(CommandTemplate::new(program, tokens.collect()))
}
