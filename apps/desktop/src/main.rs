use std::{
    io::{self, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    controller::ResultPanel, load_settings, ClientSettings, FormController, FormState,
    PredictionApi, PredictionClient, SubmissionOutcome,
};
use shared::protocol::{local_feature_catalog, PredictionRequest};
use tracing_subscriber::EnvFilter;

mod render;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "bike-predict", about = "Bike rental demand prediction client")]
struct Cli {
    /// Base URL of the prediction service; overrides config and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Config file; defaults to ./predictor.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit the given conditions and show the predicted rentals.
    Predict(PredictArgs),
    /// Ask the service whether its model is ready.
    Health,
    /// List the input features and their ranges.
    Features {
        /// Print the raw JSON catalog.
        #[arg(long)]
        json: bool,
        /// Describe the features known locally instead of asking the service.
        #[arg(long)]
        local: bool,
    },
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// 1=Spring, 2=Summer, 3=Fall, 4=Winter
    #[arg(long, default_value_t = 3)]
    season: i64,
    /// 0=2011, 1=2012
    #[arg(long, default_value_t = 1)]
    yr: i64,
    #[arg(long, default_value_t = 9)]
    mnth: i64,
    #[arg(long, default_value_t = 17)]
    hr: i64,
    #[arg(long, default_value_t = 0)]
    holiday: i64,
    /// 0=Sunday .. 6=Saturday
    #[arg(long, default_value_t = 4)]
    weekday: i64,
    #[arg(long, default_value_t = 1)]
    workingday: i64,
    /// 1=Clear, 2=Mist, 3=Light Rain, 4=Heavy Rain
    #[arg(long, default_value_t = 1)]
    weathersit: i64,
    /// Normalized temperature (actual / 41)
    #[arg(long, default_value_t = 0.76)]
    temp: f64,
    /// Normalized feeling temperature (actual / 50)
    #[arg(long, default_value_t = 0.72)]
    atemp: f64,
    /// Normalized humidity (actual / 100)
    #[arg(long, default_value_t = 0.45)]
    hum: f64,
    /// Normalized wind speed (actual / 67)
    #[arg(long, default_value_t = 0.15)]
    windspeed: f64,
    /// Print the final result without the count-up.
    #[arg(long)]
    no_animation: bool,
}

impl PredictArgs {
    fn form_state(&self) -> FormState {
        FormState::new(PredictionRequest {
            season: self.season,
            yr: self.yr,
            mnth: self.mnth,
            hr: self.hr,
            holiday: self.holiday,
            weekday: self.weekday,
            workingday: self.workingday,
            weathersit: self.weathersit,
            temp: self.temp,
            atemp: self.atemp,
            hum: self.hum,
            windspeed: self.windspeed,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings =
        load_settings(cli.config.as_deref()).context("failed to load client settings")?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    let client =
        PredictionClient::from_settings(&settings).context("failed to create prediction client")?;
    tracing::info!(api_url = %client.api_url(), "using prediction service");

    match cli.command {
        Command::Predict(args) => run_predict(&client, &settings, &args).await,
        Command::Health => run_health(&client).await,
        Command::Features { json, local } => run_features(&client, json, local).await,
    }
}

async fn run_predict(
    client: &PredictionClient,
    settings: &ClientSettings,
    args: &PredictArgs,
) -> Result<()> {
    let mut controller = FormController::new(args.form_state(), settings.timing());

    for (feature, readout) in controller.form().readouts() {
        println!("{:<12} {readout}", feature.title());
    }
    println!("Predicting...");

    submit_alongside_health(&mut controller, client).await;

    if let Some(panel) = controller.result_panel() {
        if args.no_animation {
            println!(
                "{}",
                render::result_line(panel.prediction().round() as i64, panel.gauge_target_percent())
            );
        } else {
            animate_result(panel).await.context("failed to draw result")?;
        }
        println!("{}", panel.message());
        return Ok(());
    }

    match controller.error_panel() {
        Some(panel) => bail!("{}", panel.message()),
        None => bail!("prediction finished without a result"),
    }
}

/// Sends the prediction while the liveness check runs next to it. The health
/// answer is applied only if it arrived before the prediction finished.
async fn submit_alongside_health<A>(
    controller: &mut FormController,
    api: &A,
) -> Option<SubmissionOutcome>
where
    A: PredictionApi + ?Sized,
{
    let request = controller.begin_submission()?;
    tracing::info!(
        season = request.season,
        hr = request.hr,
        weathersit = request.weathersit,
        "submitting prediction request"
    );

    let mut health = api.health();
    let mut predict = api.predict(&request);
    let mut health_answer = None;
    let result = loop {
        tokio::select! {
            result = &mut predict => break result,
            answer = &mut health, if health_answer.is_none() => health_answer = Some(answer),
        }
    };

    let now = Instant::now();
    match health_answer {
        Some(answer) => {
            controller.apply_health(answer, now);
            if let Some(warning) = controller.error_panel() {
                eprintln!("warning: {}", warning.message());
            }
        }
        None => tracing::debug!("health check still pending when the prediction finished"),
    }

    let outcome = SubmissionOutcome::from(result);
    controller.complete_submission(outcome.clone(), now);
    Some(outcome)
}

async fn animate_result(panel: &ResultPanel) -> io::Result<()> {
    let mut ticker = tokio::time::interval(FRAME);
    let mut stdout = io::stdout();
    loop {
        ticker.tick().await;
        let now = Instant::now();
        write!(
            stdout,
            "\r{}",
            render::result_line(panel.displayed_value(now), panel.gauge_percent(now))
        )?;
        stdout.flush()?;
        if !panel.is_animating(now) {
            break;
        }
    }
    writeln!(stdout)
}

async fn run_health(client: &PredictionClient) -> Result<()> {
    let health = client.health().await.context("health check failed")?;
    for line in render::health_lines(&health) {
        println!("{line}");
    }
    if !health.model_loaded {
        eprintln!("warning: {}", client_core::controller::MODEL_NOT_LOADED);
    }
    Ok(())
}

async fn run_features(client: &PredictionClient, json: bool, local: bool) -> Result<()> {
    let catalog = if local {
        local_feature_catalog()
    } else {
        client
            .features()
            .await
            .context("failed to fetch feature catalog")?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        for line in render::catalog_lines(&catalog) {
            println!("{line}");
        }
    }
    Ok(())
}
