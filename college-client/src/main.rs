use college_client::{run, ClientError, ClientSettings};
use service_core::observability::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let settings = ClientSettings::from_env()?;

    if let Err(e) = init_tracing("college-client", &settings.log_level, None) {
        eprintln!("Failed to initialize tracing: {}", e);
    }

    let rendered = run(&settings).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch students");
        e
    })?;
    print!("{}", rendered);

    Ok(())
}
