//! Menu-driven console over generate / validate, plus secret provisioning

use std::io::{self, BufRead, Write};

use vericode_core::{Clock, GenerationParams, SecretKey, Vericode};

/// Interactive session reading from `input` and printing to `output`
pub struct Console<'a, C: Clock, R, W> {
    vericode: &'a Vericode<C>,
    defaults: GenerationParams,
    input: R,
    output: W,
}

impl<'a, C: Clock, R: BufRead, W: Write> Console<'a, C, R, W> {
    pub fn new(vericode: &'a Vericode<C>, defaults: GenerationParams, input: R, output: W) -> Self {
        Console {
            vericode,
            defaults,
            input,
            output,
        }
    }

    /// Run until the user picks exit or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Verification Code Generator ---")?;
            writeln!(self.output, "1. Generate a new verification code")?;
            writeln!(self.output, "2. Validate a verification code")?;
            writeln!(self.output, "3. Generate a new secret key")?;
            writeln!(self.output, "4. Exit")?;

            let Some(choice) = self.prompt("Choose an option (1/2/3/4): ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.generate()?,
                "2" => self.validate()?,
                "3" => self.new_secret()?,
                "4" => return Ok(()),
                _ => writeln!(self.output, "Invalid option, please choose 1, 2, 3 or 4.")?,
            }
        }
    }

    fn generate(&mut self) -> io::Result<()> {
        let user_id = self.prompt("Enter User ID: ")?.unwrap_or_default();

        let default_length = self.defaults.length;
        let length = self
            .prompt(&format!("Enter code length (default: {}): ", default_length))?
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default_length);

        let charset = self.ask_charset("Use")?;
        let counter = self.ask_counter("Enter optional counter (integer, leave blank for none): ")?;
        let params = charset.with_length(length).with_counter(counter);

        match self.vericode.generate(&user_id, &params) {
            Ok(code) => writeln!(self.output, "\nGenerated Code: {}", code),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    fn validate(&mut self) -> io::Result<()> {
        let user_id = self.prompt("Enter User ID: ")?.unwrap_or_default();
        let code = self.prompt("Enter verification code: ")?.unwrap_or_default();

        // Length follows the submitted code, as the menu never asks for it
        let charset = self.ask_charset("Was it generated with")?;
        let counter = self.ask_counter("Was a counter used? (integer, leave blank for none): ")?;
        let params = charset
            .with_length(code.chars().count().max(1))
            .with_counter(counter);

        match self.vericode.validate(&code, &user_id, &params) {
            Ok(true) => writeln!(self.output, "\nThe code is valid."),
            Ok(false) => writeln!(self.output, "\nThe code is invalid."),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    /// Printed for the operator to store in `VERICODE_SECRET_KEY` or
    /// `config.json`; the running session keeps its current key.
    fn new_secret(&mut self) -> io::Result<()> {
        let secret = SecretKey::generate();
        writeln!(
            self.output,
            "\nNew secret key: {}",
            String::from_utf8_lossy(secret.as_bytes())
        )
    }

    fn ask_charset(&mut self, lead: &str) -> io::Result<GenerationParams> {
        let classes = self.defaults.classes;
        let digits = self.ask_flag(&format!("{} digits (0-9)?", lead), classes.digits)?;
        let upper = self.ask_flag(&format!("{} uppercase (A-Z)?", lead), classes.uppercase)?;
        let lower = self.ask_flag(&format!("{} lowercase (a-z)?", lead), classes.lowercase)?;

        Ok(self
            .defaults
            .with_digits(digits)
            .with_uppercase(upper)
            .with_lowercase(lower))
    }

    fn ask_flag(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "y" } else { "n" };
        let answer = self.prompt(&format!("{} (y/n, default: {}): ", question, hint))?;
        Ok(match answer.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("y") | Some("yes") => true,
            Some("n") | Some("no") => false,
            _ => default,
        })
    }

    fn ask_counter(&mut self, question: &str) -> io::Result<Option<u64>> {
        Ok(self.prompt(question)?.and_then(|s| s.parse().ok()))
    }

    /// Print `text`, read one trimmed line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vericode_core::{generate_at, FixedClock, SecretKey};

    fn session(vericode: &Vericode<FixedClock>, script: &str) -> String {
        let mut out = Vec::new();
        Console::new(
            vericode,
            GenerationParams::default(),
            Cursor::new(script.as_bytes().to_vec()),
            &mut out,
        )
        .run()
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn vericode_at(now: i64) -> Vericode<FixedClock> {
        Vericode::with_clock(SecretKey::try_from("console-secret").unwrap(), FixedClock(now))
    }

    #[test]
    fn test_generate_with_defaults() {
        let out = session(&vericode_at(1000), "1\nalice\n\n\n\n\n\n4\n");
        let secret = SecretKey::try_from("console-secret").unwrap();
        let expected = generate_at("alice", &secret, &GenerationParams::default(), 1000).unwrap();
        assert!(out.contains(&format!("Generated Code: {}", expected)));
    }

    #[test]
    fn test_generate_custom() {
        let out = session(&vericode_at(1000), "1\nalice\n8\ny\ny\ny\n4\n4\n");
        let secret = SecretKey::try_from("console-secret").unwrap();
        let params = GenerationParams::new()
            .with_length(8)
            .with_uppercase(true)
            .with_lowercase(true)
            .with_counter(Some(4));
        let expected = generate_at("alice", &secret, &params, 1000).unwrap();
        assert!(out.contains(&format!("Generated Code: {}", expected)));
    }

    #[test]
    fn test_generate_reports_config_error() {
        let out = session(&vericode_at(1000), "1\nalice\n\nn\nn\nn\n\n4\n");
        assert!(out.contains("Error: At least one character set must be selected"));
    }

    #[test]
    fn test_validate_valid_and_invalid() {
        let secret = SecretKey::try_from("console-secret").unwrap();
        let code = generate_at("alice", &secret, &GenerationParams::default(), 1000).unwrap();

        let script = format!("2\nalice\n{}\n\n\n\n\n4\n", code);
        let out = session(&vericode_at(1350), &script);
        assert!(out.contains("The code is valid."));

        let out = session(&vericode_at(1650), &script);
        assert!(out.contains("The code is invalid."));
    }

    #[test]
    fn test_generate_rejects_oversized_length() {
        let out = session(&vericode_at(1000), "1\nalice\n18446744073709551615\n\n\n\n\n4\n");
        assert!(out.contains("Error: Invalid length"));
    }

    #[test]
    fn test_new_secret() {
        let out = session(&vericode_at(1000), "3\n4\n");
        let line = out
            .lines()
            .find_map(|l| l.strip_prefix("New secret key: "))
            .unwrap();
        assert_eq!(line.len(), 64);
        assert!(line.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(SecretKey::try_from(line).is_ok());
    }

    #[test]
    fn test_eof_exits() {
        let out = session(&vericode_at(1000), "");
        assert!(out.contains("Choose an option"));
    }

    #[test]
    fn test_unknown_option() {
        let out = session(&vericode_at(1000), "9\n4\n");
        assert!(out.contains("Invalid option"));
    }
}
