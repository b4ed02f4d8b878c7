use finatic::{llm::OpenAiChatModel, Config, Responder};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    dotenv::dotenv().ok();

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        eprintln!("Uso: finatic <pregunta o cálculo financiero>");
        eprintln!("Ejemplo: finatic \"interés compuesto de 1000 al 10 por 3 años\"");
        std::process::exit(2);
    }

    // Fails here, before any question is answered, when OPENAI_API_KEY is missing
    let config = Config::from_env()?;
    let responder = Responder::new(Arc::new(OpenAiChatModel::from_config(&config)?));

    info!(question = %question, "Answering question");

    match responder.respond(&question).await {
        Ok(answer) => {
            info!(source = ?answer.source, "Answer ready");
            println!("{}", answer.text);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ No se pudo obtener una respuesta del asesor: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
