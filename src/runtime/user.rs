//! User interaction operations (line prompts).

use anyhow::Result;

use super::RealRuntime;

use std::io::{self, BufRead, Write};

/// Core, testable implementation that reads from any BufRead and writes to any Write.
pub(crate) fn prompt_line_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim().to_string())
}

impl RealRuntime {
    pub(crate) fn prompt_line_impl(&self, prompt: &str) -> Result<String> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        prompt_line_with_io(prompt, &mut stdin_lock, &mut stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::prompt_line_with_io;
    use anyhow::Result;
    use std::io::Cursor;

    #[test]
    fn reads_and_trims_one_line() -> Result<()> {
        let mut input = Cursor::new(b"  ./bin/tool  \nsecond line\n".to_vec());
        let mut output = Vec::new();
        let line = prompt_line_with_io("Enter path to binary: ", &mut input, &mut output)?;
        assert_eq!(line, "./bin/tool");
        assert_eq!(String::from_utf8(output)?, "Enter path to binary: ");
        Ok(())
    }

    #[test]
    fn keeps_inner_spaces() -> Result<()> {
        let mut input = Cursor::new(b"java -jar app.jar --port 8080\n".to_vec());
        let mut output = Vec::new();
        let line = prompt_line_with_io("Enter command: ", &mut input, &mut output)?;
        assert_eq!(line, "java -jar app.jar --port 8080");
        Ok(())
    }

    #[test]
    fn empty_input_yields_empty_string() -> Result<()> {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let line = prompt_line_with_io("Enter alias name: ", &mut input, &mut output)?;
        assert!(line.is_empty());
        Ok(())
    }
}
