//! iServer CLI - Command-line interface for the iServer SDK

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use iserver_sdk::domain::{
    DistanceMode, FieldValuesDisplayFilter, FieldValuesDisplayMode, GeoJsonGeometry, Geometry,
    JobInfo, LayerStatus, LayerStatusOptions, LineString, MeasureOptions, MeasureParameters,
    OutputSetting, ParameterRecord, Point2D, Polygon, StatisticAnalystMode,
    SummaryAttributesJobsOptions, SummaryAttributesJobsParameter, Unit,
};
use iserver_sdk::{ClientConfig, IServerClient, MeasureMode, ServiceOptions, DEFAULT_URL};
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "iserver")]
#[command(about = "iServer REST API CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Services root URL
    #[arg(long, env = "ISERVER_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Access token appended to every request
    #[arg(long, env = "ISERVER_TOKEN")]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "ISERVER_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// Give up on a job after this many polls (0 = no limit)
    #[arg(long, env = "ISERVER_MAX_POLLS")]
    max_polls: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the JSON of a layer display status
    LayerStatus {
        /// Layer name
        #[arg(short, long)]
        name: String,

        /// Whether the layer is visible
        #[arg(long)]
        visible: Option<bool>,

        /// SQL display filter (e.g. "smid < 10")
        #[arg(long)]
        display_filter: Option<String>,

        #[arg(long)]
        min_scale: Option<f64>,

        #[arg(long)]
        max_scale: Option<f64>,

        /// Numeric field used by the value filter
        #[arg(long, requires = "filter_values")]
        filter_field: Option<String>,

        /// Comma-separated field values
        #[arg(long, value_delimiter = ',', requires = "filter_field")]
        filter_values: Vec<f64>,

        #[arg(long, value_enum, default_value = "display")]
        filter_mode: FilterMode,
    },

    /// Measure a distance or an area
    Measure {
        #[arg(value_enum)]
        mode: MeasureKind,

        /// Map resource, absolute or relative to the services root
        #[arg(short, long)]
        map: String,

        /// Vertices as "x,y;x,y;..."
        #[arg(short, long, conflicts_with = "geojson")]
        points: Option<String>,

        /// GeoJSON geometry (inline or @file)
        #[arg(long)]
        geojson: Option<String>,

        /// Result unit (default: METER)
        #[arg(long)]
        unit: Option<Unit>,

        /// Geodesic or Planar
        #[arg(long)]
        distance_mode: Option<DistanceMode>,

        #[arg(long)]
        prj_coord_sys: Option<String>,
    },

    /// Summary attributes analysis jobs
    SummaryAttributes {
        #[command(subcommand)]
        action: JobAction,
    },
}

#[derive(Subcommand)]
enum JobAction {
    /// List all jobs
    List,

    /// Show one job
    Get {
        /// Job ID
        id: String,
    },

    /// Submit a job and wait for it to finish
    Add {
        /// Input dataset
        #[arg(short, long)]
        dataset: String,

        #[arg(long)]
        group_field: Option<String>,

        #[arg(long)]
        attribute_field: Option<String>,

        /// Comma-separated statistics (max,min,average,sum,variance,stdDeviation)
        #[arg(long, value_delimiter = ',')]
        modes: Vec<StatisticAnalystMode>,

        /// Result dataset name
        #[arg(long)]
        output_dataset: Option<String>,

        /// Poll interval in milliseconds (0 = client default)
        #[arg(long, env = "ISERVER_POLL_INTERVAL_MS", default_value = "0")]
        poll_ms: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterMode {
    Display,
    Disable,
}

impl From<FilterMode> for FieldValuesDisplayMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Display => FieldValuesDisplayMode::Display,
            FilterMode::Disable => FieldValuesDisplayMode::Disable,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MeasureKind {
    Distance,
    Area,
}

#[derive(Tabled)]
struct JobRow {
    id: String,
    state: String,
    elapsed_ms: String,
    error: String,
}

impl From<&JobInfo> for JobRow {
    fn from(job: &JobInfo) -> Self {
        Self {
            id: job.id.clone(),
            state: job.state.run_state.to_string(),
            elapsed_ms: job
                .state
                .elapsed_time
                .map(|ms| ms.to_string())
                .unwrap_or_else(|| "-".to_string()),
            error: job.state.error_msg.clone().unwrap_or_default(),
        }
    }
}

fn init_logging() -> Result<()> {
    // ISERVER_LOG_FORMAT=json for machine-readable logs
    let log_format = std::env::var("ISERVER_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("iserver=warn"))?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

/// Parse "x,y;x,y;..." into vertices
fn parse_points(input: &str) -> Result<Vec<Point2D>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("Invalid point '{}', expected x,y", pair))?;
            Ok(Point2D::new(
                x.trim().parse().with_context(|| format!("Invalid x in '{}'", pair))?,
                y.trim().parse().with_context(|| format!("Invalid y in '{}'", pair))?,
            ))
        })
        .collect()
}

fn load_geojson(input: &str) -> Result<GeoJsonGeometry> {
    let text = match input.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read GeoJSON file {}", path))?,
        None => input.to_string(),
    };
    let value: serde_json::Value = serde_json::from_str(&text).context("Invalid GeoJSON")?;
    Ok(GeoJsonGeometry::new(value)?)
}

fn measure_geometry(
    mode: MeasureKind,
    points: Option<&str>,
    geojson: Option<&str>,
) -> Result<Arc<dyn Geometry>> {
    let geometry: Arc<dyn Geometry> = match (points, geojson) {
        (_, Some(geojson)) => Arc::new(load_geojson(geojson)?),
        (Some(points), None) => {
            let points = parse_points(points)?;
            match mode {
                MeasureKind::Distance => Arc::new(LineString::new(points)),
                MeasureKind::Area => Arc::new(Polygon::new(points)),
            }
        }
        (None, None) => bail!("Either --points or --geojson is required"),
    };
    Ok(geometry)
}

fn print_jobs(jobs: &[JobInfo]) {
    if jobs.is_empty() {
        println!("{}", "No jobs".yellow());
        return;
    }
    let rows: Vec<JobRow> = jobs.iter().map(JobRow::from).collect();
    println!("{}", Table::new(rows));
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    info!("iServer CLI v{}", VERSION);

    let config = ClientConfig {
        url: cli.url.clone(),
        token: cli.token.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        max_polls: cli.max_polls,
        ..ClientConfig::from_env()
    };

    match cli.command {
        Commands::LayerStatus {
            name,
            visible,
            display_filter,
            min_scale,
            max_scale,
            filter_field,
            filter_values,
            filter_mode,
        } => {
            let field_values_display_filter = filter_field
                .map(|field| FieldValuesDisplayFilter::new(field, filter_values, filter_mode.into()));

            let status = LayerStatus::new(LayerStatusOptions {
                layer_name: Some(name),
                is_visible: visible,
                display_filter,
                min_scale,
                max_scale,
                field_values_display_filter,
            });

            println!("{}", status.to_json()?);
        }

        Commands::Measure {
            mode,
            map,
            points,
            geojson,
            unit,
            distance_mode,
            prj_coord_sys,
        } => {
            let geometry = measure_geometry(mode, points.as_deref(), geojson.as_deref())?;
            let params = MeasureParameters::new(
                Some(geometry),
                MeasureOptions {
                    unit,
                    prj_coord_sys,
                    distance_mode,
                },
            )?;

            let client = IServerClient::new(config)?;
            let service = client.measure(&map);
            let (label, mode) = match mode {
                MeasureKind::Distance => ("Distance", MeasureMode::Distance),
                MeasureKind::Area => ("Area", MeasureMode::Area),
            };

            let result = service
                .measure(mode, &params)
                .await
                .context("Measurement failed")?;
            let value = match mode {
                MeasureMode::Distance => result.distance,
                MeasureMode::Area => result.area,
            };
            let unit = result
                .unit
                .or(params.unit)
                .map(|u| u.to_string())
                .unwrap_or_default();

            println!("{} {} {}", format!("{}:", label).cyan().bold(), value, unit);
        }

        Commands::SummaryAttributes { action } => {
            let client = IServerClient::new(config)?;
            let service = client.summary_attributes_jobs(ServiceOptions::default());

            match action {
                JobAction::List => {
                    let jobs = service.list_jobs().await.context("Failed to list jobs")?;
                    print_jobs(&jobs);
                }

                JobAction::Get { id } => {
                    let job = service
                        .get_job(&id)
                        .await
                        .with_context(|| format!("Failed to fetch job {}", id))?;
                    print_jobs(std::slice::from_ref(&job));
                    if let Some(setting) = &job.setting {
                        println!("{}", serde_json::to_string_pretty(setting)?);
                    }
                }

                JobAction::Add {
                    dataset,
                    group_field,
                    attribute_field,
                    modes,
                    output_dataset,
                    poll_ms,
                } => {
                    let params = SummaryAttributesJobsParameter::new(SummaryAttributesJobsOptions {
                        dataset_name: Some(dataset),
                        group_field,
                        attribute_field,
                        statistic_modes: (!modes.is_empty()).then_some(modes),
                        output: output_dataset.map(|dataset_name| OutputSetting {
                            dataset_name,
                            ..Default::default()
                        }),
                        mapping_parameters: None,
                    });

                    println!("{}", "Submitting summary attributes job...".cyan().bold());
                    let job = service
                        .submit_job(&params, Duration::from_millis(poll_ms))
                        .await
                        .context("Job did not complete")?;

                    println!("{}", format!("✓ Job {} finished", job.id).green().bold());
                    print_jobs(std::slice::from_ref(&job));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points("0,0; 3, 4 ;").unwrap();
        assert_eq!(points, vec![Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0)]);
    }

    #[test]
    fn test_parse_points_rejects_garbage() {
        assert!(parse_points("0;1").is_err());
        assert!(parse_points("a,1").is_err());
    }

    #[test]
    fn test_area_points_become_polygon() {
        let geometry = measure_geometry(MeasureKind::Area, Some("0,0;1,0;1,1"), None).unwrap();
        assert_eq!(geometry.kind(), iserver_sdk::domain::GeometryKind::Polygon);
    }

    #[test]
    fn test_layer_status_args() {
        let cli = Cli::try_parse_from([
            "iserver",
            "layer-status",
            "--name",
            "roads",
            "--visible",
            "false",
            "--min-scale",
            "0",
        ])
        .unwrap();

        match cli.command {
            Commands::LayerStatus {
                visible, min_scale, ..
            } => {
                assert_eq!(visible, Some(false));
                assert_eq!(min_scale, Some(0.0));
            }
            _ => panic!("expected layer-status"),
        }
    }
}
