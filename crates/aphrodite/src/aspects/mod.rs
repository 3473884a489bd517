pub mod calculator;
pub mod relationship;
pub mod types;

pub use calculator::AspectCalculator;
pub use relationship::{relationship_score, RelationshipScore, ScoreDescription, ScoredAspect};
pub use types::{AspectCore, AspectKind, AspectPair, AspectSettings};
