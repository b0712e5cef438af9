// Summary Attributes Job Parameter Record
//
// Group-by statistics over a dataset, run as a distributed analysis job.

use super::record::{overlay, JobParameter, ParameterRecord};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Statistic computed per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatisticAnalystMode {
    Max,
    Min,
    Average,
    Sum,
    Variance,
    StdDeviation,
}

impl StatisticAnalystMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticAnalystMode::Max => "max",
            StatisticAnalystMode::Min => "min",
            StatisticAnalystMode::Average => "average",
            StatisticAnalystMode::Sum => "sum",
            StatisticAnalystMode::Variance => "variance",
            StatisticAnalystMode::StdDeviation => "stdDeviation",
        }
    }
}

impl FromStr for StatisticAnalystMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(StatisticAnalystMode::Max),
            "min" => Ok(StatisticAnalystMode::Min),
            "average" => Ok(StatisticAnalystMode::Average),
            "sum" => Ok(StatisticAnalystMode::Sum),
            "variance" => Ok(StatisticAnalystMode::Variance),
            "stddeviation" => Ok(StatisticAnalystMode::StdDeviation),
            other => Err(format!("unknown statistic mode: {}", other)),
        }
    }
}

/// Storage type of an analysis result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputType {
    Udb,
    Postgresql,
    Mongodb,
}

/// Where the job writes its result dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSetting {
    #[serde(rename = "type")]
    pub output_type: OutputType,
    pub dataset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// Datasource connection info, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource_info: Option<Value>,
}

impl Default for OutputSetting {
    fn default() -> Self {
        Self {
            output_type: OutputType::Udb,
            dataset_name: "analystResult".to_string(),
            output_path: None,
            datasource_info: None,
        }
    }
}

/// Summary attributes job request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryAttributesJobsParameter {
    pub dataset_name: Option<String>,
    pub group_field: Option<String>,
    pub attribute_field: Option<String>,
    pub statistic_modes: Option<Vec<StatisticAnalystMode>>,
    pub output: Option<OutputSetting>,
    /// Result map rendering parameters, passed through untouched
    pub mapping_parameters: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct SummaryAttributesJobsOptions {
    pub dataset_name: Option<String>,
    pub group_field: Option<String>,
    pub attribute_field: Option<String>,
    pub statistic_modes: Option<Vec<StatisticAnalystMode>>,
    pub output: Option<OutputSetting>,
    pub mapping_parameters: Option<Value>,
}

impl SummaryAttributesJobsParameter {
    pub fn new(options: SummaryAttributesJobsOptions) -> Self {
        let mut params = Self::default();
        params.apply(options);
        params
    }

    pub fn apply(&mut self, options: SummaryAttributesJobsOptions) {
        overlay(&mut self.dataset_name, options.dataset_name);
        overlay(&mut self.group_field, options.group_field);
        overlay(&mut self.attribute_field, options.attribute_field);
        overlay(&mut self.statistic_modes, options.statistic_modes);
        overlay(&mut self.output, options.output);
        overlay(&mut self.mapping_parameters, options.mapping_parameters);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InputJson<'a> {
    dataset_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalystJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    group_field: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute_field: Option<&'a str>,
    /// comma-joined, e.g. `"max,min"`
    #[serde(skip_serializing_if = "Option::is_none")]
    statistic_modes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mapping_parameters: Option<&'a Value>,
}

#[derive(Serialize)]
struct RequestJson<'a> {
    input: InputJson<'a>,
    analyst: AnalystJson<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a OutputSetting>,
}

impl SummaryAttributesJobsParameter {
    fn request(&self) -> Result<RequestJson<'_>> {
        let dataset_name = self
            .dataset_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(CoreError::MissingRequired("datasetName"))?;

        let statistic_modes = self.statistic_modes.as_ref().map(|modes| {
            modes
                .iter()
                .map(StatisticAnalystMode::as_str)
                .collect::<Vec<_>>()
                .join(",")
        });

        Ok(RequestJson {
            input: InputJson { dataset_name },
            analyst: AnalystJson {
                group_field: self.group_field.as_deref(),
                attribute_field: self.attribute_field.as_deref(),
                statistic_modes,
                mapping_parameters: self.mapping_parameters.as_ref(),
            },
            output: self.output.as_ref(),
        })
    }
}

impl ParameterRecord for SummaryAttributesJobsParameter {
    const CLASS_NAME: &'static str = "SuperMap.SummaryAttributesJobsParameter";

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.request()?)?)
    }

    fn release(&mut self) {
        self.dataset_name = None;
        self.group_field = None;
        self.attribute_field = None;
        self.statistic_modes = None;
        self.output = None;
        self.mapping_parameters = None;
    }
}

impl JobParameter for SummaryAttributesJobsParameter {
    const SERVICE_PATH: &'static str = "spatialanalyst/summaryattributes";

    fn to_request_body(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.request()?)?)
    }
}
