use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meal_planner::{
    client::{self, form::render_day, ClientMode, FormSession, DEFAULT_API_URL},
    models::{validate_date, MealDay, MealPart, DATE_FORMAT},
};

#[derive(Parser)]
#[command(name = "meals-client")]
#[command(version)]
#[command(about = "Plan lunch and dinner from the terminal, locally or against the meal planner API")]
struct Cli {
    /// Keep records in memory or send them to the API
    #[arg(short, long, value_enum, default_value = "local")]
    mode: ClientMode,

    /// Base URL of the meal planner API
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log level
    #[arg(short = 'v', long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive form (default)
    Form,
    /// Save one day
    Save {
        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        lunch: String,
        #[arg(long)]
        lunch_frozen: bool,
        #[arg(long, default_value = "")]
        dinner: String,
        #[arg(long)]
        dinner_frozen: bool,
    },
    /// Print the plan stored for one day
    Show {
        /// Date as YYYY-MM-DD, defaults to today
        date: Option<String>,
    },
}

fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("meal_planner={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut planner = client::planner(cli.mode, &cli.api_url)?;

    match cli.command.unwrap_or(Command::Form) {
        Command::Form => {
            let stdin = BufReader::new(tokio::io::stdin());
            let today = chrono::Local::now().date_naive();
            let mut form = FormSession::new(stdin, tokio::io::stdout(), today);
            form.run(planner.as_mut()).await?;
        }
        Command::Save {
            date,
            lunch,
            lunch_frozen,
            dinner,
            dinner_frozen,
        } => {
            let date = date.unwrap_or_else(today);
            validate_date(&date)?;
            let day = MealDay::new(
                date,
                MealPart::from_form(&lunch, lunch_frozen),
                MealPart::from_form(&dinner, dinner_frozen),
            );
            println!("{}", planner.save(&day).await?);
        }
        Command::Show { date } => {
            let date = date.unwrap_or_else(today);
            validate_date(&date)?;
            match planner.view(&date).await? {
                Some(day) => println!("{}", render_day(&day)?),
                None => println!("No meals stored for {date}."),
            }
        }
    }

    Ok(())
}
