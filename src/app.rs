//! View controller and export guard.
//!
//! The upload → analyzing → results flow is an explicit finite-state
//! machine: a state value plus a transition function, instead of ad-hoc
//! flags. The export guard enforces at-most-one in-flight export with a
//! scoped release.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::model::Feedback;

/// The three presentation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Waiting for an artwork upload.
    #[default]
    Upload,
    /// A critique request is in flight.
    Analyzing,
    /// Feedback (success or failure) is being shown.
    Results,
}

/// Events that drive view transitions.
#[derive(Debug, Clone)]
pub enum Event {
    /// The user selected or replaced an artwork image.
    ImageSelected(Vec<u8>),
    /// The user asked for a critique.
    AnalyzeRequested,
    /// The critique request resolved, successfully or not.
    FeedbackResolved(Feedback),
    /// Return to the upload state, clearing image and feedback.
    Reset,
}

/// Application state: current view plus the data it presents.
#[derive(Debug, Default)]
pub struct AppState {
    view: View,
    image: Option<Vec<u8>>,
    feedback: Option<Feedback>,
    export_lock: ExportLock,
}

impl AppState {
    /// Create a fresh state in the upload view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// The uploaded artwork bytes, if any.
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    /// The resolved feedback, if any.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Apply an event, returning the view it transitioned to.
    ///
    /// Events that do not apply in the current view are ignored (the view
    /// is returned unchanged): analyze without an image stays in upload,
    /// feedback outside of analyzing is dropped.
    pub fn apply(&mut self, event: Event) -> View {
        match (self.view, event) {
            (View::Upload, Event::ImageSelected(bytes)) => {
                self.image = Some(bytes);
                self.feedback = None;
            }
            (View::Upload, Event::AnalyzeRequested) if self.image.is_some() => {
                self.view = View::Analyzing;
            }
            (View::Analyzing, Event::FeedbackResolved(feedback)) => {
                self.feedback = Some(feedback);
                self.view = View::Results;
            }
            (_, Event::Reset) => {
                self.image = None;
                self.feedback = None;
                self.view = View::Upload;
            }
            (view, event) => {
                log::debug!("ignoring {event:?} in view {view:?}");
            }
        }
        self.view
    }

    /// The export guard shared by this state's export operations.
    pub fn export_lock(&self) -> &ExportLock {
        &self.export_lock
    }
}

/// At-most-one-export guard.
///
/// `try_begin` hands out a ticket only while no other ticket is alive; a
/// re-entrant trigger gets `None` and must treat the call as a no-op.
/// Dropping the ticket releases the lock on every exit path, success or
/// failure. There is no cancellation once an export begins.
#[derive(Debug, Default)]
pub struct ExportLock {
    in_flight: AtomicBool,
}

impl ExportLock {
    /// Create an idle lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to begin an export. Returns `None` while one is in flight.
    pub fn try_begin(&self) -> Option<ExportTicket<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(ExportTicket { lock: self })
        } else {
            log::debug!("export already in flight, ignoring trigger");
            None
        }
    }

    /// Check whether an export is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// RAII ticket for one export operation.
pub struct ExportTicket<'a> {
    lock: &'a ExportLock,
}

impl Drop for ExportTicket<'_> {
    fn drop(&mut self) {
        self.lock.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut state = AppState::new();
        assert_eq!(state.view(), View::Upload);

        state.apply(Event::ImageSelected(vec![1, 2, 3]));
        assert_eq!(state.view(), View::Upload);
        assert!(state.image().is_some());

        assert_eq!(state.apply(Event::AnalyzeRequested), View::Analyzing);
        assert_eq!(
            state.apply(Event::FeedbackResolved(Feedback::success("# A"))),
            View::Results
        );
        assert!(state.feedback().unwrap().is_success());
    }

    #[test]
    fn test_analyze_without_image_is_ignored() {
        let mut state = AppState::new();
        assert_eq!(state.apply(Event::AnalyzeRequested), View::Upload);
    }

    #[test]
    fn test_reset_from_any_view() {
        let mut state = AppState::new();
        state.apply(Event::ImageSelected(vec![0]));
        state.apply(Event::AnalyzeRequested);
        assert_eq!(state.apply(Event::Reset), View::Upload);
        assert!(state.image().is_none());
        assert!(state.feedback().is_none());
    }

    #[test]
    fn test_reselecting_image_clears_feedback() {
        let mut state = AppState::new();
        state.apply(Event::ImageSelected(vec![0]));
        state.apply(Event::AnalyzeRequested);
        state.apply(Event::FeedbackResolved(Feedback::failure("timeout")));
        state.apply(Event::Reset);
        state.apply(Event::ImageSelected(vec![1]));
        assert!(state.feedback().is_none());
    }

    #[test]
    fn test_export_lock_admits_one() {
        let lock = ExportLock::new();
        let ticket = lock.try_begin().expect("first trigger acquires");
        assert!(lock.try_begin().is_none());
        assert!(lock.is_in_flight());

        drop(ticket);
        assert!(!lock.is_in_flight());
        assert!(lock.try_begin().is_some());
    }

    #[test]
    fn test_export_lock_releases_on_failure_path() {
        let lock = ExportLock::new();
        let result: Result<(), &str> = (|| {
            let _ticket = lock.try_begin().unwrap();
            Err("export blew up")
        })();
        assert!(result.is_err());
        assert!(!lock.is_in_flight());
    }
}
