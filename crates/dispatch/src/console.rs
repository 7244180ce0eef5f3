//! Menu console: the single producer feeding the shared buffer.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use ring_queue::RingBuffer;
use tracing::{debug, warn};

use crate::Command;

/// Parsed menu input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Enqueue this command
    Submit(Command),
    /// Stop reading input
    Quit,
    /// Nothing typed
    Blank,
    /// Anything else, with the reason it was refused
    Invalid(String),
}

/// Interpret one line of menu input
#[must_use]
pub fn parse_choice(line: &str) -> MenuChoice {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return MenuChoice::Blank;
    }
    if matches!(trimmed.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
        return MenuChoice::Quit;
    }

    match trimmed.parse::<u32>() {
        Ok(tag) => Command::try_from(tag)
            .map_or_else(|error| MenuChoice::Invalid(error.to_string()), MenuChoice::Submit),
        Err(_) => MenuChoice::Invalid(format!("Not a number: {trimmed}")),
    }
}

/// Options menu shown before every prompt
#[must_use]
pub fn render_menu() -> String {
    let mut menu = String::from("Options\n");
    for command in Command::ALL {
        menu.push_str(&command.to_string());
        menu.push('\n');
    }
    menu.push_str("q. Quit\n");
    menu
}

/// What the console did before it stopped
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSummary {
    /// Commands pushed into the buffer
    pub submitted: u64,
    /// Lines refused at the menu
    pub rejected: u64,
}

/// Reads menu choices and pushes the matching commands
#[derive(Debug, Clone)]
pub struct Console {
    queue: Arc<RingBuffer<Command>>,
}

impl Console {
    /// Producer for `queue`
    #[must_use]
    pub const fn new(queue: Arc<RingBuffer<Command>>) -> Self {
        Self { queue }
    }

    /// Run the menu until end of input or a quit choice
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<ConsoleSummary> {
        let mut summary = ConsoleSummary::default();
        let mut lines = input.lines();

        loop {
            output.write_all(render_menu().as_bytes())?;
            output.flush()?;

            let Some(line) = lines.next().transpose()? else {
                debug!("console input closed");
                break;
            };

            match parse_choice(&line) {
                MenuChoice::Submit(command) => {
                    self.queue.push(command);
                    summary.submitted += 1;
                    debug!(tag = command.tag(), queued = self.queue.len(), "command submitted");
                    writeln!(output, "Option entered: {}", command.tag())?;
                }
                MenuChoice::Quit => break,
                MenuChoice::Blank => {}
                MenuChoice::Invalid(reason) => {
                    summary.rejected += 1;
                    warn!(input = %line.trim(), %reason, "rejected menu input");
                    writeln!(output, "Invalid option: {reason}")?;
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1"), MenuChoice::Submit(Command::RtcTime));
        assert_eq!(parse_choice(" 3 \n"), MenuChoice::Submit(Command::Ipv4Address));
        assert_eq!(parse_choice("Q"), MenuChoice::Quit);
        assert_eq!(parse_choice("exit"), MenuChoice::Quit);
        assert_eq!(parse_choice("   "), MenuChoice::Blank);
        assert_eq!(
            parse_choice("9"),
            MenuChoice::Invalid("Unknown tag: 9".to_owned())
        );
        assert!(matches!(parse_choice("abc"), MenuChoice::Invalid(_)));
        assert!(matches!(parse_choice("-1"), MenuChoice::Invalid(_)));
    }

    #[test]
    fn test_render_menu() {
        let menu = render_menu();
        assert!(menu.starts_with("Options\n"));
        assert!(menu.contains("1. RTC time\n"));
        assert!(menu.contains("2. RTC date\n"));
        assert!(menu.contains("3. IP address of this machine\n"));
        assert!(menu.ends_with("q. Quit\n"));
    }

    #[test]
    fn test_run_submits_valid_choices() {
        let queue = Arc::new(RingBuffer::new(3).unwrap());
        let console = Console::new(Arc::clone(&queue));
        let mut output = Vec::new();

        let summary = console
            .run(Cursor::new("2\n\n7\n1\nq\n3\n"), &mut output)
            .unwrap();

        assert_eq!(summary, ConsoleSummary { submitted: 2, rejected: 1 });
        assert_eq!(queue.pop(), Some(Command::RtcDate));
        assert_eq!(queue.pop(), Some(Command::RtcTime));
        assert_eq!(queue.pop(), None);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Option entered: 2"));
        assert!(text.contains("Invalid option: Unknown tag: 7"));
        assert!(!text.contains("Option entered: 3"));
    }

    #[test]
    fn test_run_stops_at_eof() {
        let queue = Arc::new(RingBuffer::new(2).unwrap());
        let console = Console::new(Arc::clone(&queue));

        let summary = console.run(Cursor::new("1\n2\n3"), Vec::new()).unwrap();
        assert_eq!(summary.submitted, 3);
        // capacity 2: the first command was overwritten
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.pop(), Some(Command::RtcDate));
    }
}
