//! Review/adjust state machine for one scan.
//!
//! ```text
//! Idle -> AutoProcessing -> Reviewing <-> ManualAdjusting
//!                              |               |
//!                              +--> Accepted <-+
//! ```
//!
//! A [`Session`] is owned by the caller; it holds the config, the cached
//! AUTO output and the current MANUAL output. Nothing is process-wide.

use std::fmt;

use tracing::debug;

use super::{process_auto, process_manual, AutoOutput};
use crate::error::{Result, SessionError};
use crate::models::{BaseColor, ManualAdjustments, PipelineConfig};
use crate::raster::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No scan processed yet, or the last run failed
    Idle,
    /// AUTO path running (only observable while `run_auto` executes)
    AutoProcessing,
    /// AUTO positive is displayed
    Reviewing,
    /// User gamma/factors are applied to the baseline
    ManualAdjusting,
    /// Output delivered; no further transitions
    Accepted,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AutoProcessing => "auto-processing",
            Self::Reviewing => "reviewing",
            Self::ManualAdjusting => "manual-adjusting",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub struct Session {
    config: PipelineConfig,
    state: SessionState,
    auto: Option<AutoOutput>,
    manual: Option<(ManualAdjustments, RgbImage)>,
}

impl Session {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            auto: None,
            manual: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Film base of the current scan, once AUTO has run.
    pub fn base(&self) -> Option<BaseColor> {
        self.auto.as_ref().map(|auto| auto.base)
    }

    /// Adjustments behind the current MANUAL output.
    pub fn adjustments(&self) -> Option<ManualAdjustments> {
        self.manual.as_ref().map(|(adjustments, _)| *adjustments)
    }

    /// Image the caller should display in the current state.
    pub fn current_output(&self) -> Option<&RgbImage> {
        match self.state {
            SessionState::Reviewing => self.auto.as_ref().map(|auto| &auto.positive),
            SessionState::ManualAdjusting | SessionState::Accepted => self
                .manual
                .as_ref()
                .map(|(_, image)| image)
                .or_else(|| self.auto.as_ref().map(|auto| &auto.positive)),
            SessionState::Idle | SessionState::AutoProcessing => None,
        }
    }

    /// Run AUTO on a new scan. Allowed from `Idle` and from `Reviewing`
    /// (re-upload). On failure the session drops back to `Idle`.
    pub fn run_auto(&mut self, scan: &RgbImage) -> Result<&RgbImage> {
        self.require(&[SessionState::Idle, SessionState::Reviewing], "run auto")?;

        self.transition(SessionState::AutoProcessing);
        self.auto = None;
        self.manual = None;

        match process_auto(scan, &self.config) {
            Ok(auto) => {
                self.auto = Some(auto);
                self.transition(SessionState::Reviewing);
                self.output()
            }
            Err(err) => {
                self.transition(SessionState::Idle);
                Err(err)
            }
        }
    }

    /// Switch to MANUAL, starting from the config's manual gamma and factors.
    pub fn enter_manual(&mut self) -> Result<&RgbImage> {
        self.require(&[SessionState::Reviewing], "enter manual mode")?;

        let adjustments = self.config.manual_adjustments();
        let image = self.compute_manual(&adjustments)?;
        self.manual = Some((adjustments, image));
        self.transition(SessionState::ManualAdjusting);
        self.output()
    }

    /// Recompute the MANUAL output from the cached baseline.
    ///
    /// Invalid adjustments leave the previous output in place.
    pub fn adjust(&mut self, adjustments: ManualAdjustments) -> Result<&RgbImage> {
        self.require(&[SessionState::ManualAdjusting], "adjust")?;

        let image = self.compute_manual(&adjustments)?;
        self.manual = Some((adjustments, image));
        self.output()
    }

    /// Return to reviewing the AUTO positive. The MANUAL output is dropped.
    pub fn leave_manual(&mut self) -> Result<&RgbImage> {
        self.require(&[SessionState::ManualAdjusting], "leave manual mode")?;

        self.manual = None;
        self.transition(SessionState::Reviewing);
        self.output()
    }

    /// Accept the displayed output. The session is finished afterwards.
    pub fn accept(&mut self) -> Result<&RgbImage> {
        self.require(
            &[SessionState::Reviewing, SessionState::ManualAdjusting],
            "accept",
        )?;

        self.transition(SessionState::Accepted);
        self.output()
    }

    /// Take the accepted image out of the session.
    pub fn into_accepted(self) -> Result<RgbImage, SessionError> {
        if self.state != SessionState::Accepted {
            return Err(self.invalid("take the accepted output"));
        }
        match (self.manual, self.auto) {
            (Some((_, image)), _) => Ok(image),
            (None, Some(auto)) => Ok(auto.positive),
            (None, None) => Err(SessionError::InvalidTransition {
                state: SessionState::Accepted.name(),
                action: "take the accepted output",
            }),
        }
    }

    fn compute_manual(&self, adjustments: &ManualAdjustments) -> Result<RgbImage> {
        let auto = self
            .auto
            .as_ref()
            .ok_or_else(|| self.invalid("compute manual output"))?;
        process_manual(&auto.baseline, adjustments)
    }

    fn output(&self) -> Result<&RgbImage> {
        self.current_output()
            .ok_or_else(|| self.invalid("read output").into())
    }

    fn require(&self, allowed: &[SessionState], action: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
    }
}
