//! Session orchestrator.
//!
//! This module provides the session that coordinates the speech engine,
//! the translation and speech services, the background worker and
//! playback, in place of process-wide singletons.

mod controller;
mod form;
mod save;
mod worker;

pub use controller::{PlayOutcome, SaveOutcome, Session, SessionConfig, SessionError};
pub use form::{Form, VOLUME_STEP};
pub use save::{FileFilter, SaveDialog};
pub use worker::{ArtifactOrigin, AudioArtifact, EventSink, WorkerEvent, synthesize_to_temp};
