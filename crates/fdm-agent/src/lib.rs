//! `fdm-agent`: household storage for the flood displacement model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`status`]    | `Status`, `Transition`, `StatusCounts`                     |
//! | [`village`]   | `Village` (grouping key of the trapped-probability model)  |
//! | [`record`]    | `HouseholdRecord`: one row of external population data    |
//! | [`store`]     | `HouseholdStore` (SoA arrays, one element per household)   |
//! | [`builder`]   | `HouseholdStoreBuilder` (fluent construction + validation) |
//! | [`trapped`]   | `TrappedCoefficients`, `TrappedProbabilityModel`           |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod builder;
pub mod error;
pub mod record;
pub mod status;
pub mod store;
pub mod trapped;
pub mod village;


pub use builder::HouseholdStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use record::HouseholdRecord;
pub use status::{Status, StatusCounts, Transition};
pub use store::HouseholdStore;
pub use trapped::{logistic, TrappedCoefficients, TrappedProbabilityModel};
pub use village::Village;

// Construction material lives with the damage curves it keys.
pub use fdm_hazard::Material;
