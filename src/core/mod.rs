pub mod advisor;
pub mod batch;
pub mod estimator;
pub mod prompt;
pub mod session;

pub use crate::domain::model::{FormInput, PriceEstimate, VehicleAttributes, VehicleForm};
pub use crate::domain::ports::{AdvisoryClient, VariationSource};
pub use crate::utils::error::Result;
