use anyhow::{Context, Result, anyhow};
use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::LogExporter;
use opentelemetry_otlp::SpanExporter;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_otlp::WithHttpConfig;
use opentelemetry_otlp::WithTonicConfig;
use opentelemetry_otlp::tonic_types;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_semantic_conventions::resource::{DEPLOYMENT_ENVIRONMENT_NAME, SERVICE_VERSION};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::{filter, prelude::*};

// default name (fixed)
const APP_SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
const OTLP_TIMEOUT: Duration = Duration::from_secs(10);
static GLOBAL_TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::const_new();
static GLOBAL_LOGGER_PROVIDER: OnceCell<SdkLoggerProvider> = OnceCell::const_new();

/// Logging settings, read from `LOG_*` environment variables
///
/// Console output goes to stderr so that stdout only carries the summary.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub app_name: Option<String>,
    pub level: Option<String>,
    pub file_name: Option<String>,
    pub file_dir: Option<String>,
    pub use_json: bool,
    pub use_stderr: bool,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self {
            app_name: None,
            level: None,
            file_name: None,
            file_dir: None,
            use_json: false,
            use_stderr: true,
        }
    }

    pub fn level(&self) -> tracing::Level {
        self.level
            .as_deref()
            .and_then(|l| tracing::Level::from_str(l).ok())
            .unwrap_or(tracing::Level::INFO)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn shutdown_tracer_provider() {
    if let Some(provider) = GLOBAL_TRACER_PROVIDER.get() {
        let _ = provider.shutdown().inspect_err(|e| {
            eprintln!("failed to shutdown tracer provider: {:?}", e);
        });
    }
    if let Some(provider) = GLOBAL_LOGGER_PROVIDER.get() {
        let _ = provider.shutdown().inspect_err(|e| {
            eprintln!("failed to shutdown logger provider: {:?}", e);
        });
    }
}

pub fn load_tracing_config_from_env() -> Result<LoggingConfig> {
    envy::prefixed("LOG_")
        .from_env::<LoggingConfig>()
        .context("cannot read logging config from env:")
}

pub async fn tracing_init(conf: LoggingConfig) -> Result<()> {
    let layer = setup_layer_from_logging_config(&conf).await?;
    tracing::subscriber::set_global_default(layer).context("setting default subscriber failed")?;
    Ok(())
}

pub async fn tracing_init_from_env() -> Result<()> {
    let conf = load_tracing_config_from_env().unwrap_or_else(|e| {
        eprintln!("failed to load logging config from env, using defaults: {:?}", e);
        LoggingConfig::default()
    });
    tracing_init(conf).await
}

// Create a Resource that captures information about the entity for which telemetry is recorded.
fn resource(app_service_name: String) -> opentelemetry_sdk::Resource {
    opentelemetry_sdk::Resource::builder()
        .with_service_name(app_service_name)
        .with_attribute(KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")))
        .with_attribute(KeyValue::new(
            DEPLOYMENT_ENVIRONMENT_NAME,
            env::var("DEPLOYMENT_ENVIRONMENT_NAME").unwrap_or_else(|_| "development".to_string()),
        ))
        .build()
}

/// Install an OTLP span exporter when `OTLP_ADDR` (grpc) or `OTLP_HTTP_ADDR` is set
fn create_otlp_tracer_provider_from_env(
    app_service_name: String,
) -> Result<Option<SdkTracerProvider>> {
    let addr = env::var("OTLP_ADDR").ok();
    let http_addr = env::var("OTLP_HTTP_ADDR").ok();
    // Basic Auth: base64(public_key:secret_key)
    let auth_header = env::var("OTLP_AUTH_TOKEN")
        .ok()
        .map(|t| format!("Basic {}", t));

    let exporter = match (addr, http_addr) {
        (Some(addr), _) => {
            let mut metadata = tonic_types::metadata::MetadataMap::new();
            if let Some(auth) = auth_header {
                let value = auth
                    .parse()
                    .map_err(|e| anyhow!("invalid OTLP_AUTH_TOKEN: {:?}", e))?;
                metadata.insert("authorization", value);
            }
            SpanExporter::builder()
                .with_tonic()
                .with_endpoint(&addr)
                .with_timeout(OTLP_TIMEOUT)
                .with_metadata(metadata)
                .build()?
        }
        (_, Some(http_addr)) => {
            let mut headers = HashMap::new();
            if let Some(auth) = auth_header {
                headers.insert("Authorization".to_string(), auth);
            }
            SpanExporter::builder()
                .with_http()
                .with_endpoint(&http_addr)
                .with_timeout(OTLP_TIMEOUT)
                .with_headers(headers)
                .build()?
        }
        // not specified
        (None, None) => return Ok(None),
    };

    let provider = SdkTracerProvider::builder()
        .with_resource(resource(app_service_name))
        .with_batch_exporter(exporter)
        .build();
    global::set_tracer_provider(provider.clone());
    global::set_text_map_propagator(TraceContextPropagator::new());
    GLOBAL_TRACER_PROVIDER.set(provider.clone()).ok();
    Ok(Some(provider))
}

fn create_otlp_logger_provider_layer_from_env(
    app_service_name: String,
) -> Option<OpenTelemetryTracingBridge<SdkLoggerProvider, opentelemetry_sdk::logs::SdkLogger>> {
    let addr = env::var("OTLP_ADDR").ok()?;
    // "none" (default) disables the log exporter
    let protocol = env::var("OTLP_LOG_PROTOCOL").unwrap_or_else(|_| "none".to_string());
    let log_endpoint = env::var("OTLP_LOG_ENDPOINT").unwrap_or(addr);
    let builder = LogExporter::builder();

    let exporter = match protocol.as_str() {
        "grpc" => builder
            .with_tonic()
            .with_endpoint(&log_endpoint)
            .with_timeout(OTLP_TIMEOUT)
            .build(),
        "http" | "http/protobuf" => builder
            .with_http()
            .with_endpoint(&log_endpoint)
            .with_timeout(OTLP_TIMEOUT)
            .build(),
        _ => return None,
    };
    match exporter {
        Ok(exp) => {
            let provider = SdkLoggerProvider::builder()
                .with_resource(resource(app_service_name))
                .with_batch_exporter(exp)
                .build();
            let otel_layer = OpenTelemetryTracingBridge::new(&provider);
            GLOBAL_LOGGER_PROVIDER.set(provider).ok();
            Some(otel_layer)
        }
        Err(e) => {
            eprintln!(
                "Failed to create OTLP log exporter: {:?}. Log telemetry will be disabled.",
                e
            );
            None
        }
    }
}

fn create_log_file(conf: &LoggingConfig) -> Result<Option<File>> {
    let Some(file_name) = conf.file_name.as_deref() else {
        return Ok(None);
    };
    let dir = match conf.file_dir.as_deref() {
        Some(d) => PathBuf::from(d),
        None => env::current_dir()?,
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create log file directory {:?}", dir))?;
    let path = dir.join(file_name);
    let file = File::create(&path).with_context(|| format!("create log file to {:?}", path))?;
    Ok(Some(file))
}

pub async fn setup_layer_from_logging_config(
    conf: &LoggingConfig,
) -> Result<Box<dyn Subscriber + Send + Sync + 'static>> {
    let lv = conf.level();
    let filter = filter::Targets::new().with_default(lv);
    let env_filter = EnvFilter::from_default_env();

    let app_service_name = conf
        .app_name
        .clone()
        .unwrap_or_else(|| APP_SERVICE_NAME.to_string());

    let tracer_provider = create_otlp_tracer_provider_from_env(app_service_name.clone())?;
    let span_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(app_service_name.clone()))
    });
    let otlp_log_layer = create_otlp_logger_provider_layer_from_env(app_service_name);
    let filter_otel = EnvFilter::new("info")
        .add_directive("hyper=off".parse()?)
        .add_directive("h2=off".parse()?)
        .add_directive("reqwest=off".parse()?);
    let otlp_log_layer = otlp_log_layer.with_filter(filter_otel);

    let log_file = create_log_file(conf)?;
    let (json_file, text_file) = match log_file {
        Some(f) if conf.use_json => (Some(f), None),
        Some(f) => (None, Some(f)),
        None => (None, None),
    };

    let subscriber = Box::new(
        tracing_subscriber::registry()
            .with(filter)
            .with(env_filter)
            .with(span_layer)
            .with(otlp_log_layer)
            .with(json_file.map(|f| {
                Layer::new()
                    .with_writer(f.with_max_level(lv))
                    .with_ansi(false)
                    .json()
            }))
            .with(text_file.map(|f| {
                Layer::new()
                    .with_writer(f.with_max_level(lv))
                    .with_ansi(false)
            }))
            .with(if !conf.use_json && conf.use_stderr {
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .compact(),
                )
            } else {
                None
            })
            .with(if conf.use_json && conf.use_stderr {
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .json(),
                )
            } else {
                None
            }),
    );
    Ok(subscriber)
}

// for simple stderr logging
pub fn tracing_init_test(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
