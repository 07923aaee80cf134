use farm_advisor_http::{markup, CropType, DiagnosisClient, Locale};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let image_path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: diagnose <image> [potato|mango|wheat]"))?;
    let crop: CropType = args
        .next()
        .map(|value| value.parse())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let client = DiagnosisClient::from_env().map_err(anyhow::Error::msg)?;
    let image = std::fs::read(&image_path)?;

    match client.diagnose_image(&image, crop).await {
        Ok(diagnosis) => println!("{}", markup::to_plain_text(&diagnosis.render(Locale::Arabic))),
        Err(err) => {
            let message = err.user_message(Locale::Arabic);
            eprintln!("{}: {}", message.title, message.detail);
        }
    }

    Ok(())
}
