use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, http::StatusCode, web};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use rv_gen_core::{GenError, ReviewGenerator, Settings};

/// Step cap applied when neither the flags nor the settings name one.
const DEFAULT_MAX_STEPS: usize = 100_000;

/// Command-line options of the review generation server.
#[derive(Parser, Debug)]
#[command(name = "rv-gen-server", about = "HTTP endpoint serving Markov-generated product reviews")]
struct Cli {
	/// TOML settings file with an [app_settings] table
	#[arg(long)]
	config: Option<PathBuf>,

	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	bind: String,

	/// Port to listen on
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Override the training data file
	#[arg(long)]
	training_data: Option<PathBuf>,

	/// Override the chain order (1 to 5)
	#[arg(long)]
	order: Option<usize>,

	/// Override the per-request step cap
	#[arg(long)]
	max_steps: Option<usize>,
}

impl Cli {
	/// Settings from the config file (or defaults), with the flags applied on top.
	fn settings(&self) -> anyhow::Result<Settings> {
		let mut settings = match &self.config {
			Some(path) => Settings::from_toml_file(path)
				.with_context(|| format!("failed to load settings from {}", path.display()))?,
			None => Settings::default(),
		};

		if let Some(path) = &self.training_data {
			settings.training_data_file = path.clone();
		}
		if let Some(order) = self.order {
			settings.markov_order = order;
		}
		// A request must never spin forever.
		settings.max_steps = self.max_steps.or(settings.max_steps).or(Some(DEFAULT_MAX_STEPS));

		Ok(settings)
	}
}

/// JSON body of every failed request.
#[derive(Serialize)]
struct ErrorBody {
	error: String,
	retryable: bool,
}

#[derive(Serialize)]
struct Health {
	status: &'static str,
	order: usize,
	states: usize,
}

fn error_response(error: &GenError) -> HttpResponse {
	let status = if error.is_retryable() {
		StatusCode::SERVICE_UNAVAILABLE
	} else {
		StatusCode::INTERNAL_SERVER_ERROR
	};
	HttpResponse::build(status).json(ErrorBody {
		error: error.to_string(),
		retryable: error.is_retryable(),
	})
}

/// HTTP GET endpoint `/API/generate`
///
/// Generates one review from the shared chain and returns it as JSON.
/// Generation runs on the blocking pool with its own thread-local random source.
#[get("/API/generate")]
async fn get_generated(data: web::Data<ReviewGenerator>) -> impl Responder {
	let generator = data.into_inner();
	let result = web::block(move || generator.generate(&mut rand::rng())).await;

	match result {
		Ok(Ok(review)) => HttpResponse::Ok().json(review),
		Ok(Err(e)) => {
			log::error!("review generation failed: {e}");
			error_response(&e)
		}
		Err(e) => {
			log::error!("generation task failed: {e}");
			HttpResponse::InternalServerError().json(ErrorBody {
				error: "generation task failed".to_owned(),
				retryable: true,
			})
		}
	}
}

/// HTTP GET endpoint `/API/health`
#[get("/API/health")]
async fn get_health(data: web::Data<ReviewGenerator>) -> impl Responder {
	HttpResponse::Ok().json(Health {
		status: "ok",
		order: data.table().order(),
		states: data.table().len(),
	})
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated).service(get_health);
}

fn init_logging() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Main entry point for the server.
///
/// Trains the chain once, then serves it read-only: the generator is shared
/// between workers without a lock.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	init_logging();
	let cli = Cli::parse();

	let settings = cli.settings()?;
	let generator = ReviewGenerator::from_settings(&settings).with_context(|| {
		format!("failed to train from {}", settings.training_data_file.display())
	})?;
	log::info!(
		"order-{} chain ready with {} states, listening on {}:{}",
		generator.table().order(),
		generator.table().len(),
		cli.bind,
		cli.port
	);

	let shared_generator = web::Data::new(generator);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(Logger::default())
			.app_data(shared_generator.clone())
			.configure(routes)
	})
	.bind((cli.bind.as_str(), cli.port))?
	.run()
	.await?;

	Ok(())
}
