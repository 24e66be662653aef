use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use super::CliError;

/// Line-oriented prompt over any async reader and writer.
///
/// The `read_*` helpers keep asking until the answer is valid.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub async fn say(&mut self, text: impl AsRef<str>) -> Result<(), CliError> {
        self.writer.write_all(text.as_ref().as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Shows `prompt` and returns the trimmed answer.
    pub async fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub async fn read_text(&mut self, prompt: &str) -> Result<String, CliError> {
        loop {
            let text = self.ask(prompt).await?;
            if !text.is_empty() {
                return Ok(text);
            }
            self.say("Error: cannot be empty.").await?;
        }
    }

    pub async fn read_u32(&mut self, prompt: &str) -> Result<u32, CliError> {
        loop {
            let text = self.ask(prompt).await?;
            match text.parse::<i64>() {
                Ok(n) if n < 0 => self.say("Error: must be >= 0.").await?,
                Ok(n) => match u32::try_from(n) {
                    Ok(n) => return Ok(n),
                    Err(_) => self.say(format!("Error: must be <= {}.", u32::MAX)).await?,
                },
                Err(_) => self.say("Error: enter a valid whole number.").await?,
            }
        }
    }

    pub async fn read_f64_min(&mut self, prompt: &str, min: f64) -> Result<f64, CliError> {
        loop {
            let text = self.ask(prompt).await?;
            match text.parse::<f64>() {
                Ok(n) if !n.is_finite() => self.say("Error: enter a valid number (e.g. 12.50).").await?,
                Ok(n) if n < min => self.say(format!("Error: must be >= {}.", min)).await?,
                Ok(n) => return Ok(n),
                Err(_) => self.say("Error: enter a valid number (e.g. 12.50).").await?,
            }
        }
    }

    pub async fn read_date(&mut self, prompt: &str) -> Result<NaiveDate, CliError> {
        loop {
            let text = self.ask(prompt).await?;
            match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                Ok(date) => return Ok(date),
                Err(_) => self.say("Error: use the YYYY-MM-DD format.").await?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(console: Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.into_writer()).unwrap()
    }

    #[tokio::test]
    async fn test_numbers_retry_until_valid() {
        let mut console = Console::new(&b"abc\n-4\n7\n\n-1\n2.5\n"[..], Vec::new());

        assert_eq!(console.read_u32("Qty: ").await.unwrap(), 7);
        assert_eq!(console.read_f64_min("Price: ", 0.0).await.unwrap(), 2.5);

        let out = output(console);
        assert!(out.contains("Error: enter a valid whole number."));
        assert_eq!(out.matches("Error: must be >= 0.").count(), 2);
        assert_eq!(out.matches("Error: enter a valid number").count(), 1);
    }

    #[tokio::test]
    async fn test_text_and_dates() {
        let mut console = Console::new(&b"   \n Rice \n2025-13-01\n2025-12-01\n"[..], Vec::new());

        assert_eq!(console.read_text("Name: ").await.unwrap(), "Rice");
        assert_eq!(
            console.read_date("Date: ").await.unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
        );

        let out = output(console);
        assert!(out.contains("Error: cannot be empty."));
        assert!(out.contains("Error: use the YYYY-MM-DD format."));
    }

    #[tokio::test]
    async fn test_end_of_input() {
        let mut console = Console::new(&b"x\n"[..], Vec::new());
        assert!(matches!(console.read_u32("Qty: ").await, Err(CliError::InputClosed)));
    }
}
