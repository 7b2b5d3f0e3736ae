use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::{error, info};
use mileage_form::{AlertKind, AppConfig, Event, Model, Submitter, Transport, form};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    initialize();

    info!("module version: {}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("failed to load configuration")?;
    info!("records are posted to {}", config.submission.endpoint);

    let submitter = Submitter::from_config(&config.submission)?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut model = Model::new();

    while edit_fields(&mut input, &mut model, &submitter).await? {
        form::process(Event::Submit, &mut model, &submitter).await;
        render(&model);

        let submitted = model
            .alert
            .as_ref()
            .is_some_and(|alert| alert.kind == AlertKind::Success);
        form::process(Event::DismissAlert, &mut model, &submitter).await;

        if submitted && !confirm(&mut input, "Submit another record? [y/N]").await? {
            break;
        }
    }

    Ok(())
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| writeln!(f, "[{}] {}", record.level(), record.args()));

    // stdout belongs to the form prompts
    builder.target(Target::Stderr).init();
}

/// Prompt for every field, keeping the current value on empty input.
///
/// Returns `false` once the input is closed.
async fn edit_fields<T>(
    input: &mut Input,
    model: &mut Model,
    submitter: &Submitter<T>,
) -> Result<bool>
where
    T: Transport,
{
    let fields = &model.fields;
    let prompts: [(&str, String, fn(String) -> Event); 4] = [
        ("Date", fields.date.clone(), Event::DateChanged),
        ("Car plate", fields.car_plate.clone(), Event::CarPlateChanged),
        ("Mileage", fields.mileage.clone(), Event::MileageChanged),
        ("Agent", fields.agent.clone(), Event::AgentChanged),
    ];

    for (label, current, event) in prompts {
        let Some(value) = read_line(input, &prompt_text(label, &current)).await? else {
            return Ok(false);
        };
        let value = if value.trim().is_empty() { current } else { value };

        form::process(event(value), model, submitter).await;
    }

    Ok(true)
}

fn prompt_text(label: &str, current: &str) -> String {
    if current.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{current}]: ")
    }
}

async fn confirm(input: &mut Input, question: &str) -> Result<bool> {
    Ok(read_line(input, &format!("{question} "))
        .await?
        .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
}

async fn read_line(input: &mut Input, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout()
        .flush()
        .context("failed to flush stdout")?;

    input.next_line().await.context("failed to read input")
}

fn render(model: &Model) {
    if let Some(alert) = &model.alert {
        match alert.kind {
            AlertKind::Success => println!("Success: {}", alert.message),
            AlertKind::Error => println!("Error: {}", alert.message),
        }
    }
}
