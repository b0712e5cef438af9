// Domain Layer - request/response records of the iServer REST API

pub mod geometry;
pub mod job;
pub mod layer_status;
pub mod measure;
pub mod record;
pub mod summary_attributes;
pub mod unit;

pub use geometry::{GeoJsonGeometry, Geometry, GeometryKind, LineString, Point2D, Polygon};
pub use job::{AddJobResponse, JobId, JobInfo, JobStatus, RunState, ServerError};
pub use layer_status::{
    FieldValuesDisplayFilter, FieldValuesDisplayMode, LayerStatus, LayerStatusOptions,
};
pub use measure::{MeasureOptions, MeasureParameters, MeasureResult};
pub use record::{JobParameter, JsonNumber, ParameterRecord};
pub use summary_attributes::{
    OutputSetting, OutputType, StatisticAnalystMode, SummaryAttributesJobsOptions,
    SummaryAttributesJobsParameter,
};
pub use unit::{DistanceMode, Unit};
