// Job-description scanner: locates experience claims on known technologies,
// flags the chronologically impossible ones and rewrites them.
// Pure and synchronous; handlers supply the catalog snapshot and the year.

pub mod clock;
pub mod corrector;
pub mod handlers;
pub mod locator;
pub mod text;

pub use clock::{FixedYearClock, SystemYearClock, YearClock};
pub use corrector::{correct, ChangelogEntry};
pub use locator::{locate, ParsedRequirement};
