pub mod config;
pub mod dates;
pub mod disambiguate;
pub mod error;
pub mod event;
pub mod keywords;
pub mod model;
pub mod parser;
pub mod paths;
pub mod patterns;
pub mod reconcile;
pub mod render;
pub mod store;
pub mod title;

#[cfg(test)]
pub(crate) mod tests;

pub use config::Config;
pub use dates::reference_now;
pub use error::{ParseFailure, ReconcileError};
pub use event::{Action, ActionedEvent, EventRecord, ParsedEvent};
pub use model::{ModelParser, TextGenerator};
pub use parser::{EventParser, RuleBasedParser};
pub use reconcile::Applied;
pub use store::JsonEventStore;
