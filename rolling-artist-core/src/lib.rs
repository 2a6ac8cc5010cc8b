//! Rolling Artist Core — seeded artist selection and weighted prompt tags.
//!
//! One call runs four phases off a single seeded random stream:
//! - Partition the reference list into top / non-top by a ratio
//! - Sample a top quota plus non-top fill, then shuffle
//! - Distribute bounded one-decimal weights that sum to a clamped target
//! - Format `(prefix+name:weight)` tags joined by `,`
//!
//! Plus the pieces around it: reference list loading, TOML configuration,
//! and the offline normalizer for raw reference lines.

pub mod config;
pub mod format;
pub mod normalize;
pub mod partition;
pub mod reference;
pub mod request;
pub mod rng;
pub mod roller;
pub mod sampler;
pub mod weights;

pub use config::{ConfigError, RollerConfig};
pub use format::{format_items, format_prompt, WeightedItem};
pub use normalize::{normalize_file, normalize_line, normalize_text, NormalizeError};
pub use partition::Partition;
pub use reference::{ReferenceError, ReferenceList};
pub use request::{RollError, RollRequest};
pub use roller::{roll, ArtistRoller, Roll, DEFAULT_PREFIX};
pub use sampler::{sample, Quota};
pub use weights::{distribute, Weight, WeightBounds, WeightError};
