//! Domain types: events, markers, verdicts, and grades.

pub mod events;

pub use events::{
    AnnotatedEvent, CandidateEvent, ColorClass, ColorVerdict, ConfidenceTier, GradedEvent,
    MarkerPoint, MatchMethod, Rationale, SourceTag,
};
