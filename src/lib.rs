mod aqstat;
mod dataset;
mod error;
mod filtering;
mod pipeline;
mod types;

pub use aqstat::*;
pub use error::AqStatError;

pub use dataset::error::DatasetError;
pub use dataset::schema::DatasetSchema;
pub use dataset::store::Dataset;

pub use filtering::AqFrameFilterExt;

pub use pipeline::categories::*;
pub use pipeline::insights::*;
pub use pipeline::resample::*;
pub use pipeline::stations::*;
pub use pipeline::time_of_day::*;

pub use types::category::*;
pub use types::frequency::*;
pub use types::reading::Reading;
pub use types::time_of_day::TimeOfDayOrder;
