//! Line oriented meal form
//!
//! Reads answers one line at a time so the same flow works on an
//! interactive terminal and on piped input. End of input quits.

use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::{ClientResult, MealPlanner};
use crate::models::{validate_date, MealDay, MealPart, DATE_FORMAT};

enum Action {
    Save,
    View,
    Quit,
}

pub struct FormSession<R, W> {
    input: R,
    output: W,
    today: NaiveDate,
}

impl<R, W> FormSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            today,
        }
    }

    /// Run the form until the user quits or input ends
    pub async fn run(&mut self, planner: &mut dyn MealPlanner) -> ClientResult<()> {
        let today = self.today.format(DATE_FORMAT).to_string();

        loop {
            let Some(date) = self.ask(&format!("Date [{today}]: ")).await? else {
                return Ok(());
            };
            let date = if date.is_empty() { today.clone() } else { date };

            if let Err(e) = validate_date(&date) {
                self.say(&format!("Error: {e}")).await?;
                continue;
            }

            let action = match self.ask("Action ([s]ave, [v]iew, [q]uit) [v]: ").await? {
                None => return Ok(()),
                Some(answer) => match answer.to_lowercase().as_str() {
                    "s" | "save" => Action::Save,
                    "" | "v" | "view" => Action::View,
                    "q" | "quit" => Action::Quit,
                    other => {
                        self.say(&format!("Unknown action '{other}'")).await?;
                        continue;
                    }
                },
            };

            match action {
                Action::Quit => return Ok(()),
                Action::Save => {
                    let Some(lunch) = self.ask_part("Lunch").await? else {
                        return Ok(());
                    };
                    let Some(dinner) = self.ask_part("Dinner").await? else {
                        return Ok(());
                    };
                    let day = MealDay::new(date, lunch, dinner);
                    match planner.save(&day).await {
                        Ok(message) => self.say(&message).await?,
                        Err(e) => self.say(&format!("Error: {e}")).await?,
                    }
                }
                Action::View => match planner.view(&date).await {
                    Ok(Some(day)) => {
                        let rendered = render_day(&day)?;
                        self.say(&rendered).await?;
                    }
                    Ok(None) => self.say(&format!("No meals stored for {date}.")).await?,
                    Err(e) => self.say(&format!("Error: {e}")).await?,
                },
            }
        }
    }

    async fn ask_part(&mut self, label: &str) -> ClientResult<Option<MealPart>> {
        let Some(dish) = self.ask(&format!("{label} dish: ")).await? else {
            return Ok(None);
        };
        let Some(frozen) = self.ask(&format!("{label} frozen? [y/N]: ")).await? else {
            return Ok(None);
        };
        let frozen = matches!(frozen.to_lowercase().as_str(), "y" | "yes");
        Ok(Some(MealPart::from_form(&dish, frozen)))
    }

    /// Prompt and read one trimmed line; `None` at end of input
    async fn ask(&mut self, prompt: &str) -> ClientResult<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn say(&mut self, text: &str) -> ClientResult<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Pretty JSON of the record followed by one summary line per meal
pub fn render_day(day: &MealDay) -> ClientResult<String> {
    let json = serde_json::to_string_pretty(day)?;
    Ok(format!(
        "{json}\nLunch: {}\nDinner: {}",
        day.lunch.summary(),
        day.dinner.summary()
    ))
}
