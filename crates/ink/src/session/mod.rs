//! Stroke capture sessions
//!
//! A [`StrokeSession`] connects the pieces for one brush instance:
//! - input samples go through the [`PressureSampler`]
//! - accepted points are buffered and the newest segment is drawn on the
//!   host's [`StrokeSurface`]
//! - on `end` the buffer is decimated, simplified and smoothed, then either
//!   committed to a [`GeometrySink`] or discarded as degenerate
//!
//! ```text
//! Idle --begin--> Capturing --end--> Finalizing --> Idle
//!                     \--cancel--> Idle
//! ```
//!
//! Everything runs synchronously inside the caller's input handler, one
//! session at a time, so no locking is involved.

mod events;
mod store;

use pressure_ink_config::{BrushConfig, ConfigError};
use tracing::{debug, info};

use crate::decimate::decimate;
use crate::input::InputSample;
use crate::pressure::PressureSampler;
use crate::simplify::PressureSimplifier;
use crate::smooth::CurveSmoother;
use crate::stroke::Stroke;
use crate::surface::{GeometrySink, NullSurface, StrokeSurface};
use crate::types::PressurePoint;

pub use events::StrokeEvent;
pub use store::StrokeStore;

/// Error type for session sequencing and configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("No stroke in progress - call begin() first")]
    NotCapturing,
    #[error("Stroke already in progress - call end() or cancel() first")]
    AlreadyCapturing,
    #[error("Invalid brush configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Capturing,
    Finalizing,
}

/// What `end` did with the captured stroke
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The stroke was handed to the geometry sink
    Committed(Stroke),
    /// The stroke collapsed to nothing and was dropped
    Discarded,
}

type EventListener = Box<dyn FnMut(&StrokeEvent)>;

/// Capture session for one brush instance
pub struct StrokeSession<S: StrokeSurface> {
    config: BrushConfig,
    sampler: PressureSampler,
    smoother: CurveSmoother,
    simplifier: PressureSimplifier,
    surface: S,
    /// Points of the current (or last finished) stroke
    points: Vec<PressurePoint>,
    state: SessionState,
    last_time_ms: u64,
    listeners: Vec<EventListener>,
}

impl<S: StrokeSurface> std::fmt::Debug for StrokeSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeSession")
            .field("state", &self.state)
            .field("point_count", &self.points.len())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl StrokeSession<NullSurface> {
    /// Session without live feedback
    pub fn headless(config: BrushConfig) -> Result<Self, SessionError> {
        Self::new(config, NullSurface)
    }
}

impl<S: StrokeSurface> StrokeSession<S> {
    /// Create a session drawing live feedback onto `surface`
    pub fn new(config: BrushConfig, surface: S) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            sampler: PressureSampler::from_config(&config),
            smoother: CurveSmoother::new(config.base_width),
            simplifier: PressureSimplifier::from_config(&config.simplify),
            config,
            surface,
            points: Vec::new(),
            state: SessionState::Idle,
            last_time_ms: 0,
            listeners: Vec::new(),
        })
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    /// Replace the brush configuration. Only allowed between strokes.
    pub fn set_config(&mut self, config: BrushConfig) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyCapturing);
        }
        config.validate()?;
        self.sampler = PressureSampler::from_config(&config);
        self.smoother = CurveSmoother::new(config.base_width);
        self.simplifier = PressureSimplifier::from_config(&config.simplify);
        self.config = config;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == SessionState::Capturing
    }

    /// Points of the stroke in progress, or of the last finished one
    pub fn points(&self) -> &[PressurePoint] {
        &self.points
    }

    pub fn smoother(&self) -> &CurveSmoother {
        &self.smoother
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Register a listener for [`StrokeEvent`]s
    pub fn add_event_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&StrokeEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: StrokeEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Start a stroke at `sample`.
    ///
    /// The starting sample is also captured as the first move, so a tap
    /// leaves two points at the same position.
    pub fn begin(&mut self, sample: &InputSample) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyCapturing);
        }

        self.points.clear();
        let pressure = self.sampler.on_session_start(sample);
        let point = PressurePoint::new(sample.x, sample.y, pressure);
        self.points.push(point);
        self.last_time_ms = sample.timestamp_ms;
        self.state = SessionState::Capturing;

        debug!(
            "StrokeSession::begin: ({:.1}, {:.1}) pressure={:.4} at {}ms",
            point.x, point.y, pressure, sample.timestamp_ms
        );
        self.emit(StrokeEvent::Started {
            timestamp_ms: sample.timestamp_ms,
            point,
        });

        self.capture(sample);
        Ok(())
    }

    /// Add a mid-stroke sample.
    ///
    /// Returns `Ok(false)` if the sample repeated the last position and was dropped.
    pub fn add_sample(&mut self, sample: &InputSample) -> Result<bool, SessionError> {
        if self.state != SessionState::Capturing {
            return Err(SessionError::NotCapturing);
        }
        Ok(self.capture(sample))
    }

    fn capture(&mut self, sample: &InputSample) -> bool {
        let reading = self.sampler.on_session_sample(sample, &mut self.points);
        self.last_time_ms = self.last_time_ms.max(sample.timestamp_ms);

        if reading.corrected {
            let segments = self.smoother.segments(&self.points);
            self.surface.redraw(&self.points, &segments);
            let point_count = self.points.len();
            self.emit(StrokeEvent::Corrected {
                pressure: reading.pressure,
                point_count,
            });
        }

        let point = PressurePoint::new(sample.x, sample.y, reading.pressure);
        let repeated = self
            .points
            .last()
            .is_some_and(|last| last.same_position(&point));
        if self.points.len() > 1 && repeated {
            debug!(
                "StrokeSession: dropping repeated sample at ({:.1}, {:.1})",
                point.x, point.y
            );
            return false;
        }

        self.points.push(point);
        if let Some(segment) = self.smoother.latest_segment(&self.points) {
            self.surface.draw_quadratic(&segment);
        }
        true
    }

    /// Finish the stroke: decimate, simplify, smooth, then commit or discard.
    pub fn end(&mut self, sink: &mut impl GeometrySink) -> Result<SessionOutcome, SessionError> {
        if self.state != SessionState::Capturing {
            return Err(SessionError::NotCapturing);
        }

        self.state = SessionState::Finalizing;
        self.sampler.on_session_end();

        let captured = self.points.len();
        let mut points = std::mem::take(&mut self.points);

        if let Some(distance) = self.config.decimate {
            points = decimate(&points, distance);
        }
        if self.config.simplify.is_enabled() {
            points = self
                .simplifier
                .simplify(&points, self.config.simplify.highest_quality);
        }

        let geometry = self.smoother.geometry(&points);
        self.points = points;
        self.surface.clear();
        self.state = SessionState::Idle;

        // begin() always stores two points, so in practice only the geometry check fires.
        if self.points.len() < 2 || geometry.is_degenerate() {
            info!(
                "StrokeSession::end: discarding degenerate stroke ({} points captured)",
                captured
            );
            self.emit(StrokeEvent::Discarded {
                point_count: captured,
            });
            return Ok(SessionOutcome::Discarded);
        }

        let stroke = Stroke::new(
            self.points.clone(),
            geometry,
            self.config.base_width,
            self.sampler.start_time_ms(),
            self.last_time_ms,
        );

        info!(
            "StrokeSession::end: committed stroke with {} points ({} captured), {} segments",
            stroke.complexity(),
            captured,
            stroke.geometry.segments.len()
        );

        sink.persist_geometry(stroke.clone());
        self.emit(StrokeEvent::PathCreated {
            stroke: stroke.clone(),
        });
        Ok(SessionOutcome::Committed(stroke))
    }

    /// Abort the stroke without emitting geometry
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Capturing {
            return Err(SessionError::NotCapturing);
        }

        let point_count = self.points.len();
        self.sampler.on_session_end();
        self.points.clear();
        self.surface.clear();
        self.state = SessionState::Idle;

        debug!("StrokeSession::cancel: dropped {} points", point_count);
        self.emit(StrokeEvent::Discarded { point_count });
        Ok(())
    }
}
