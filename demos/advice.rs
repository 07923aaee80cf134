use farm_advisor_http::{markup, AdvisorClient, FarmProfile, Locale};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let advisor = AdvisorClient::from_env().map_err(anyhow::Error::msg)?;

    let mut args = std::env::args().skip(1);
    let profile = FarmProfile::new(
        args.next().unwrap_or_else(|| "قمح".to_owned()),
        args.next().unwrap_or_else(|| "5 فدان".to_owned()),
        args.next().unwrap_or_else(|| "تربة طينية".to_owned()),
    );

    match advisor.get_advice(&profile).await {
        Ok(advice) => {
            println!("{}", markup::to_plain_text(&advice.text));
            for citation in advice.citations {
                println!("• {} <{}>", citation.title, citation.uri);
            }
        }
        Err(err) => {
            let message = err.user_message(Locale::Arabic);
            eprintln!("{}: {}", message.title, message.detail);
        }
    }

    Ok(())
}
