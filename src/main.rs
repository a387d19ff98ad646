use domain::coherence::LengthHeuristic;
use domain::evaluation::{create_answer, Collaborators, EvaluationOptions};
use domain::gateway::assembly_ai::AssemblyAiClient;
use domain::gateway::recorded::RecordedResults;
use domain::Content;
use log::{error, info, warn};
use media_ai::traits::audio;
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!("Starting answer evaluation [{}]", config.runtime_env());

    let content = Content::new(config.media_url().unwrap_or_default());
    let recorded = RecordedResults::from_config(&config);

    let assembly_ai = match (config.assembly_ai_api_key(), config.media_url()) {
        (Some(_), Some(_)) => match AssemblyAiClient::from_config(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                error!("Failed to create AssemblyAI client: {e}");
                print_error_and_exit(&e);
            }
        },
        (Some(_), None) => {
            warn!("AssemblyAI API key set without a media URL, using the recorded audio result");
            None
        }
        _ => None,
    };
    let audio: &dyn audio::Provider = match &assembly_ai {
        Some(client) => client,
        None => &recorded,
    };

    let collaborators = Collaborators {
        audio,
        facial: &recorded,
        coherence: &LengthHeuristic,
        star: None,
    };

    match create_answer(&content, collaborators, EvaluationOptions::from(&config)).await {
        Ok(evaluation) => match serde_json::to_string_pretty(&evaluation) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize evaluation: {e}");
                print_error_and_exit(&domain::error::Error::from(e));
            }
        },
        Err(e) => {
            error!("Answer evaluation failed: {e}");
            print_error_and_exit(&e);
        }
    }
}

fn print_error_and_exit(err: &domain::error::Error) -> ! {
    match serde_json::to_string_pretty(&err.report()) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize error report: {e}"),
    }
    std::process::exit(1);
}
